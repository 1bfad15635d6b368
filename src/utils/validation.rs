use crate::utils::error::{Result, SweepError};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SweepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SweepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Output targets must be plain file names, since they are joined onto the output directory.
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;

    let path = Path::new(name);
    if path.file_name().map(|f| f == path.as_os_str()) != Some(true) {
        return Err(SweepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Expected a file name without directory components".to_string(),
        });
    }

    Ok(())
}

pub fn validate_distinct(field_a: &str, a: &str, field_b: &str, b: &str) -> Result<()> {
    if a == b {
        return Err(SweepError::ConfigValidationError {
            field: format!("{}/{}", field_a, field_b),
            message: format!("'{}' would receive both expired and active bans", a),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| SweepError::MissingConfigError {
        field: field_name.to_string(),
    })
}
