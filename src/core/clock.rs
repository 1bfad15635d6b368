use crate::domain::ports::Clock;
use crate::utils::error::{Result, SweepError};
use chrono::{DateTime, Utc};

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock pinned to a single timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}

/// Accepts Unix seconds (`1700000000`) or RFC 3339 (`2023-11-14T22:13:20Z`).
pub fn parse_reference_time(value: &str) -> Result<i64> {
    let value = value.trim();
    if let Ok(seconds) = value.parse::<i64>() {
        return Ok(seconds);
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.timestamp())
        .map_err(|_| SweepError::InvalidTimestamp {
            value: value.to_string(),
        })
}

/// Human-readable rendering of a ban expiration for logs.
pub fn describe_expiration(expiration: i64) -> String {
    if expiration == crate::domain::model::PERMANENT {
        return "never".to_string();
    }
    DateTime::<Utc>::from_timestamp(expiration, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| expiration.to_string())
}
