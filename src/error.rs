use thiserror::Error;

/// Main error type for the secam-fire library
#[derive(Error, Debug)]
pub enum SecamError {
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("Plugin error: {0}")]
    Plugin(#[from] PluginError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Errors raised by the filter core
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid frame dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        reason: String,
    },

    #[error("Failed to allocate {bytes} bytes of working memory")]
    AllocationFailed { bytes: usize },

    #[error("{buffer} buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Frame loading and saving errors
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Failed to load image file: {path}")]
    LoadFailed { path: String },

    #[error("Failed to save image file: {path} - {reason}")]
    SaveFailed { path: String, reason: String },

    #[error("Frame too small after cropping to even dimensions: {width}x{height}")]
    TooSmall { width: u32, height: u32 },
}

/// Host adapter errors
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Unknown parameter index: {index}")]
    UnknownParameter { index: usize },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using SecamError
pub type Result<T> = std::result::Result<T, SecamError>;

impl SecamError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Frame(FrameError::LoadFailed { path }) => {
                format!("Could not load image '{}'. Please check the file exists and is a PNG or JPEG.", path)
            }
            Self::Filter(FilterError::InvalidDimensions { width, height, .. }) => {
                format!("Frames must have non-zero even dimensions, got {}x{}.", width, height)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        let err: SecamError = FilterError::AllocationFailed { bytes: 16 }.into();
        assert!(matches!(err, SecamError::Filter(_)));

        let err: SecamError = PluginError::UnknownParameter { index: 7 }.into();
        assert_eq!(err.to_string(), "Plugin error: Unknown parameter index: 7");
    }

    #[test]
    fn test_user_message() {
        let err: SecamError = FilterError::InvalidDimensions {
            width: 3,
            height: 2,
            reason: "width must be even".to_string(),
        }
        .into();
        assert!(err.user_message().contains("3x2"));

        let err = SecamError::generic("boom");
        assert_eq!(err.user_message(), "Generic error: boom");
    }
}
