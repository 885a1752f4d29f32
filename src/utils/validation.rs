use crate::utils::error::{AlphaError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AlphaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AlphaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_input_file(field_name: &str, path: &str) -> Result<()> {
    // 不檢查副檔名；無法解碼的內容由 image 解碼時回報
    validate_path(field_name, path)?;

    if !Path::new(path).is_file() {
        return Err(AlphaError::InputNotFound {
            path: path.to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AlphaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Half-open range check: `min <= value < max`.
pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if !(value >= min && value < max) {
        return Err(AlphaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {} and below {}", min, max),
        });
    }
    Ok(())
}

/// Output is always PNG-encoded; other extensions only warrant a warning.
pub fn warn_if_not_png(path: &str) {
    let is_png = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    if !is_png {
        tracing::warn!(
            "Output '{}' does not end in .png; it will still be written as PNG",
            path
        );
    }
}
