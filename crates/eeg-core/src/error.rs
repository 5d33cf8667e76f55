//! Error handling for the EEG simulator
//!
//! One error type shared by every crate in the workspace. Variants carry
//! owned data so errors can cross crate boundaries and be compared in tests.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Result type alias for EEG simulator operations
pub type EegResult<T> = Result<T, EegError>;

/// Error type for all EEG simulator operations
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EegError {
    /// A numeric parameter is out of its valid domain
    InvalidParameter {
        /// Parameter name as the caller knows it
        name: &'static str,
        /// Offending value
        value: f32,
        /// What the parameter must satisfy
        reason: &'static str,
    },

    /// Signal containers are inconsistent or unusable
    InvalidSignalData {
        /// Description of the data problem
        reason: String,
    },

    /// Fourier transform failure
    SpectrumError {
        /// Description of the transform error
        reason: String,
    },

    /// Filesystem failure while preparing or writing output
    Io {
        /// Path being created or written
        path: PathBuf,
        /// Underlying I/O error kind
        kind: io::ErrorKind,
        /// Underlying error message
        message: String,
    },

    /// Image could not be encoded
    ImageEncoding {
        /// Destination of the image
        path: PathBuf,
        /// Encoder error description
        reason: String,
    },

    /// Image written to a sink that was never prepared
    SinkNotReady {
        /// Sink location
        sink: String,
        /// Name of the rejected image
        image: String,
    },

    /// Configuration (de)serialization failure
    ConfigurationError {
        /// Description of the configuration problem
        message: String,
    },
}

impl EegError {
    /// Wrap an I/O error raised while touching `path`
    pub fn io(path: impl AsRef<Path>, err: &io::Error) -> Self {
        EegError::Io {
            path: path.as_ref().to_path_buf(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// True for the filesystem class of errors
    pub fn is_io(&self) -> bool {
        matches!(self, EegError::Io { .. })
    }
}

impl fmt::Display for EegError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EegError::InvalidParameter { name, value, reason } => {
                write!(f, "Invalid parameter {}: {} ({})", name, value, reason)
            }
            EegError::InvalidSignalData { reason } => {
                write!(f, "Invalid signal data: {}", reason)
            }
            EegError::SpectrumError { reason } => {
                write!(f, "Spectrum computation failed: {}", reason)
            }
            EegError::Io { path, message, .. } => {
                write!(f, "I/O error at {}: {}", path.display(), message)
            }
            EegError::ImageEncoding { path, reason } => {
                write!(f, "Failed to encode image {}: {}", path.display(), reason)
            }
            EegError::SinkNotReady { sink, image } => {
                write!(f, "Sink {} is not ready for image {}", sink, image)
            }
            EegError::ConfigurationError { message } => {
                write!(f, "Configuration error: {}", message)
            }
        }
    }
}

impl std::error::Error for EegError {}

/// Convenience macro for creating parameter errors
#[macro_export]
macro_rules! invalid_parameter {
    ($name:literal, $value:expr, $reason:literal) => {
        $crate::error::EegError::InvalidParameter {
            name: $name,
            value: $value,
            reason: $reason,
        }
    };
}

/// Fails with `InvalidParameter` unless `value` is finite and strictly positive
pub fn ensure_positive(name: &'static str, value: f32) -> EegResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EegError::InvalidParameter {
            name,
            value,
            reason: "must be a positive finite number",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = EegError::InvalidParameter {
            name: "sampling_rate",
            value: -250.0,
            reason: "must be a positive finite number",
        };
        let display = format!("{}", error);
        assert!(display.contains("sampling_rate"));
        assert!(display.contains("-250"));
    }

    #[test]
    fn test_io_error_wrapping() {
        let source = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error = EegError::io("plots", &source);

        assert!(error.is_io());
        match &error {
            EegError::Io { path, kind, .. } => {
                assert_eq!(path, Path::new("plots"));
                assert_eq!(*kind, io::ErrorKind::PermissionDenied);
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(error.to_string().contains("plots"));
    }

    #[test]
    fn test_sink_not_ready_display() {
        let error = EegError::SinkNotReady {
            sink: "memory".to_string(),
            image: "time_series".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("memory"));
        assert!(display.contains("time_series"));
        assert!(!error.is_io());
    }

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("duration", 10.0).is_ok());
        assert!(ensure_positive("duration", 0.0).is_err());
        assert!(ensure_positive("duration", -1.0).is_err());
        assert!(ensure_positive("duration", f32::NAN).is_err());
        assert!(ensure_positive("duration", f32::INFINITY).is_err());
    }

    #[test]
    fn test_macro_builds_parameter_error() {
        let error = invalid_parameter!("width", 10.0, "too small");
        assert_eq!(
            error,
            EegError::InvalidParameter { name: "width", value: 10.0, reason: "too small" }
        );
    }
}
