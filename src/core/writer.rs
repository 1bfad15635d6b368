use crate::domain::model::BanRecord;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Append target for one class of bans.
pub struct BanWriter<W> {
    inner: W,
    count: usize,
    failures: usize,
}

impl<W: AsyncWrite + Unpin> BanWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            count: 0,
            failures: 0,
        }
    }

    /// Writes the record's original line. The record is counted even when
    /// the write fails.
    pub async fn append(&mut self, record: &BanRecord) -> std::io::Result<()> {
        self.count += 1;
        let result = self.write_line(&record.original_text).await;
        if result.is_err() {
            self.failures += 1;
        }
        result
    }

    async fn write_line(&mut self, text: &str) -> std::io::Result<()> {
        self.inner.write_all(text.as_bytes()).await?;
        self.inner.write_all(b"\n").await
    }

    pub async fn finish(&mut self) -> std::io::Result<()> {
        self.inner.flush().await?;
        self.inner.shutdown().await
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.inner
    }
}
