use crate::core::classifier::partition;
use crate::core::clock::{describe_expiration, SystemClock};
use crate::core::loader::{load_bans, BanReader};
use crate::core::writer::BanWriter;
use crate::core::{
    BanRecord, ClassifiedBans, Clock, ConfigProvider, LineWarning, LoadedBans, Pipeline,
    RunSummary, Storage,
};
use crate::utils::error::Result;
use std::io::Cursor;

/// Reads a ban list, splits it at a single reference time and writes both halves.
pub struct SweepPipeline<S: Storage, C: ConfigProvider, K: Clock = SystemClock> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) clock: K,
}

impl<S: Storage, C: ConfigProvider> SweepPipeline<S, C, SystemClock> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_clock(storage, config, SystemClock)
    }
}

impl<S: Storage, C: ConfigProvider, K: Clock> SweepPipeline<S, C, K> {
    pub fn with_clock(storage: S, config: C, clock: K) -> Self {
        Self {
            storage,
            config,
            clock,
        }
    }

    /// Configured time wins over the clock; sampled once per run.
    fn reference_time(&self) -> i64 {
        self.config.now().unwrap_or_else(|| self.clock.now_unix())
    }

    async fn write_all(
        &self,
        writer: &mut BanWriter<S::Writer>,
        records: &[BanRecord],
        class: &str,
        warnings: &mut Vec<LineWarning>,
    ) {
        for record in records {
            if let Err(e) = writer.append(record).await {
                tracing::warn!(
                    "Failed to write {} {} ban from line {}: {}",
                    class,
                    record.format,
                    record.line,
                    e
                );
                warnings.push(LineWarning {
                    line: record.line,
                    reason: format!("failed to write {} {} ban: {}", class, record.format, e),
                });
            }
        }

        if let Err(e) = writer.finish().await {
            tracing::warn!("Failed to flush {} bans: {}", class, e);
            warnings.push(LineWarning {
                line: 0,
                reason: format!("failed to flush {} bans: {}", class, e),
            });
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, K: Clock> Pipeline for SweepPipeline<S, C, K> {
    async fn extract(&self) -> Result<LoadedBans> {
        let input = self.config.input_path();
        tracing::debug!("Reading bans from: {}", input);

        let data = self.storage.read_file(input).await?;
        tracing::debug!("Read {} bytes", data.len());

        let mut reader = BanReader::new(Cursor::new(data));
        let loaded = load_bans(&mut reader)?;

        if loaded.skipped > 0 {
            tracing::info!(
                "Skipped {} line(s) that are neither 'id:expiration' nor 'admin:id:expiration'",
                loaded.skipped
            );
        }

        Ok(loaded)
    }

    async fn transform(&self, data: LoadedBans) -> Result<ClassifiedBans> {
        let now = self.reference_time();
        tracing::debug!("Classifying against {} ({})", now, describe_expiration(now));

        for record in &data.records {
            tracing::trace!(
                "Ban {} on line {} ({} format) expires {}",
                record.subject_id,
                record.line,
                record.format,
                describe_expiration(record.expiration)
            );
        }

        let (expired, active) = partition(data.records, now);

        Ok(ClassifiedBans {
            now,
            expired,
            active,
            warnings: data.warnings,
            skipped: data.skipped,
        })
    }

    async fn load(&self, result: ClassifiedBans) -> Result<RunSummary> {
        // both targets exist before anything is written
        let expired_name = self.config.expired_file();
        let active_name = self.config.active_file();
        let mut expired_writer = BanWriter::new(self.storage.create_file(expired_name).await?);
        let mut active_writer = BanWriter::new(self.storage.create_file(active_name).await?);

        let malformed_count = result.warnings.len();
        let mut warnings = result.warnings;

        self.write_all(&mut expired_writer, &result.expired, "expired", &mut warnings)
            .await;
        self.write_all(&mut active_writer, &result.active, "active", &mut warnings)
            .await;

        Ok(RunSummary {
            now: result.now,
            expired_count: expired_writer.count(),
            active_count: active_writer.count(),
            skipped_count: result.skipped,
            malformed_count,
            write_failures: expired_writer.failures() + active_writer.failures(),
            warnings,
            expired_path: self.storage.resolve(expired_name),
            active_path: self.storage.resolve(active_name),
        })
    }
}
