use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cannot read ban list '{path}': {source}")]
    InputUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create output file '{path}': {source}")]
    OutputUncreatable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid reference time '{value}': expected unix seconds or an RFC 3339 timestamp")]
    InvalidTimestamp { value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SweepError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SweepError::ConfigError { .. }
            | SweepError::ConfigValidationError { .. }
            | SweepError::InvalidConfigValueError { .. }
            | SweepError::MissingConfigError { .. }
            | SweepError::InvalidTimestamp { .. } => ErrorCategory::Configuration,
            SweepError::InputUnreadable { .. } => ErrorCategory::Input,
            SweepError::OutputUncreatable { .. } => ErrorCategory::Output,
            SweepError::IoError(_) | SweepError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Input | ErrorCategory::Output => ErrorSeverity::Critical,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SweepError::InputUnreadable { path, .. } => {
                format!("Failed to read bans from '{}'", path)
            }
            SweepError::OutputUncreatable { path, .. } => {
                format!("Failed to create output file '{}'", path)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the command line flags or the TOML configuration file",
            ErrorCategory::Input => "Make sure the ban list exists and is readable",
            ErrorCategory::Output => "Make sure the output directory exists and is writable",
            ErrorCategory::Internal => "Re-run with --verbose for more detail",
        }
    }

    /// Process exit code for a fatal error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

/// Why a single ban line could not be turned into a record.
#[derive(Error, Debug)]
pub enum BanParseError {
    #[error("no trailing digits in expiration '{text}'")]
    NoTrailingDigits { text: String },

    #[error("expiration '{digits}' is not a valid timestamp: {source}")]
    InvalidTimestamp {
        digits: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line is not valid UTF-8")]
    InvalidEncoding,
}

/// Item error produced by the ban reader.
#[derive(Error, Debug)]
pub enum LineError {
    /// The underlying source failed; the pass cannot continue.
    #[error("failed to read ban list: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse ban on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: BanParseError,
    },
}

pub type Result<T> = std::result::Result<T, SweepError>;
