use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Expiration value of a ban that never lapses.
pub const PERMANENT: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BanFormat {
    /// `subject:expiration`
    Simple,
    /// `admin:subject:expiration`
    Complex,
}

/// One parsed ban entry. `original_text` is written back out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanRecord {
    pub subject_id: String,
    pub expiration: i64,
    pub format: BanFormat,
    pub original_text: String,
    /// 1-based position in the source file, 0 when not read from a file.
    #[serde(default)]
    pub line: usize,
}

impl std::fmt::Display for BanFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BanFormat::Simple => f.write_str("simple"),
            BanFormat::Complex => f.write_str("complex"),
        }
    }
}

impl BanRecord {
    pub fn is_permanent(&self) -> bool {
        self.expiration == PERMANENT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BanStatus {
    Expired,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineWarning {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoadedBans {
    pub records: Vec<BanRecord>,
    pub warnings: Vec<LineWarning>,
    /// Lines dropped because they had neither two nor three segments.
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ClassifiedBans {
    pub now: i64,
    pub expired: Vec<BanRecord>,
    pub active: Vec<BanRecord>,
    pub warnings: Vec<LineWarning>,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub now: i64,
    pub expired_count: usize,
    pub active_count: usize,
    pub skipped_count: usize,
    pub malformed_count: usize,
    pub write_failures: usize,
    pub warnings: Vec<LineWarning>,
    pub expired_path: PathBuf,
    pub active_path: PathBuf,
}
