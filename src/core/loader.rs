//! Reads ban records from a line-oriented source.

use crate::core::parser::parse_ban_line;
use crate::domain::model::{BanRecord, LineWarning, LoadedBans};
use crate::utils::error::{BanParseError, LineError, Result};
use std::io::BufRead;

/// Lazy, single-pass iterator of ban records.
///
/// Comments, blank lines and lines of an unsupported shape are consumed
/// without producing an item. A per-line parse failure is yielded as
/// [`LineError::Parse`] and iteration can continue; [`LineError::Read`]
/// means the source itself failed.
pub struct BanReader<R> {
    source: R,
    buf: Vec<u8>,
    line: usize,
    skipped: usize,
    done: bool,
}

impl<R: BufRead> BanReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            buf: Vec::new(),
            line: 0,
            skipped: 0,
            done: false,
        }
    }

    /// Lines dropped so far because of an unsupported segment count.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn next_line(&mut self) -> Option<std::result::Result<(), std::io::Error>> {
        self.buf.clear();
        match self.source.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line += 1;
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                }
                // also drops a lone CR left on the last line at EOF
                if self.buf.last() == Some(&b'\r') {
                    self.buf.pop();
                }
                Some(Ok(()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

impl<R: BufRead> Iterator for BanReader<R> {
    type Item = std::result::Result<BanRecord, LineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.next_line()? {
                Ok(()) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(LineError::Read(e)));
                }
            }

            let line = self.line;
            let text = match std::str::from_utf8(&self.buf) {
                Ok(text) => text,
                Err(_) => {
                    return Some(Err(LineError::Parse {
                        line,
                        source: BanParseError::InvalidEncoding,
                    }))
                }
            };

            match parse_ban_line(text) {
                Ok(Some(mut record)) => {
                    record.line = line;
                    return Some(Ok(record));
                }
                Ok(None) => {
                    if !crate::core::parser::is_ignored(text) {
                        self.skipped += 1;
                        tracing::debug!("Skipping line {}: unsupported ban format", line);
                    }
                }
                Err(source) => return Some(Err(LineError::Parse { line, source })),
            }
        }
    }
}

/// Drains a reader into memory, turning per-line failures into warnings.
pub fn load_bans<R: BufRead>(reader: &mut BanReader<R>) -> Result<LoadedBans> {
    let mut loaded = LoadedBans::default();

    for item in reader.by_ref() {
        match item {
            Ok(record) => loaded.records.push(record),
            Err(LineError::Parse { line, source }) => {
                tracing::warn!("Failed to parse ban on line {}: {}", line, source);
                loaded.warnings.push(LineWarning {
                    line,
                    reason: source.to_string(),
                });
            }
            Err(LineError::Read(e)) => return Err(e.into()),
        }
    }

    loaded.skipped = reader.skipped();
    Ok(loaded)
}
