use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlphaError {
    #[error("Image decode/encode failed: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error(
        "Dimension mismatch: Images must be identical size. (white {}x{}, black {}x{})",
        .white.0, .white.1, .black.0, .black.1
    )]
    DimensionMismatch { white: (u32, u32), black: (u32, u32) },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl AlphaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AlphaError::ImageError(_)
            | AlphaError::DimensionMismatch { .. }
            | AlphaError::InputNotFound { .. } => ErrorCategory::Input,
            AlphaError::ConfigError { .. }
            | AlphaError::ConfigValidationError { .. }
            | AlphaError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AlphaError::ProcessingError { .. } | AlphaError::SerializationError(_) => {
                ErrorCategory::Processing
            }
            AlphaError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Processing => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AlphaError::DimensionMismatch { .. } => {
                "Render both variants at the same resolution with the subject in the same position"
            }
            AlphaError::ImageError(_) => {
                "Check that both inputs are image files (PNG, JPEG, GIF, BMP, WebP, TIFF, ...)"
            }
            AlphaError::InputNotFound { .. } => "Check the input paths and try again",
            AlphaError::IoError(_) => {
                "Check file permissions and that the output directory is writable"
            }
            AlphaError::ConfigError { .. }
            | AlphaError::ConfigValidationError { .. }
            | AlphaError::InvalidConfigValueError { .. } => {
                "Review the command line arguments or the TOML configuration file"
            }
            AlphaError::ProcessingError { .. } | AlphaError::SerializationError(_) => {
                "Re-run with --verbose to see more detail"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AlphaError::DimensionMismatch { white, black } => format!(
                "The two images differ in size ({}x{} vs {}x{}); they must be identical",
                white.0, white.1, black.0, black.1
            ),
            AlphaError::InputNotFound { path } => format!("Cannot find input image: {}", path),
            AlphaError::ImageError(e) => format!("Could not read or write image: {}", e),
            other => format!("Error: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, AlphaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let err = AlphaError::DimensionMismatch {
            white: (4, 4),
            black: (4, 5),
        };
        assert!(err
            .to_string()
            .contains("Dimension mismatch: Images must be identical size."));
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_dimension_mismatch_user_message() {
        let err = AlphaError::DimensionMismatch {
            white: (640, 480),
            black: (640, 360),
        };
        assert_eq!(
            err.user_friendly_message(),
            "The two images differ in size (640x480 vs 640x360); they must be identical"
        );
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: AlphaError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
