//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (port nonzero, limits nonzero)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ExtensionConfig → Result<(), Vec<ValidationError>>
//! - Runs before a session is allowed to connect with the config

use crate::config::schema::ExtensionConfig;

/// A single semantic violation in a config.
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// `daemon.host` is empty.
    EmptyHost,
    /// `daemon.port` is zero.
    ZeroPort,
    /// `limits.max_frame_bytes` is zero; no frame could ever be read.
    ZeroFrameLimit,
    /// `timeouts.connect_secs` is zero.
    ZeroConnectTimeout,
    /// `timeouts.write_secs` is zero; every reply would time out.
    ZeroWriteTimeout,
    /// `logging.level` is empty.
    EmptyLogLevel,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyHost => write!(f, "daemon.host must not be empty"),
            ValidationError::ZeroPort => write!(f, "daemon.port must be nonzero"),
            ValidationError::ZeroFrameLimit => {
                write!(f, "limits.max_frame_bytes must be nonzero")
            }
            ValidationError::ZeroConnectTimeout => {
                write!(f, "timeouts.connect_secs must be nonzero")
            }
            ValidationError::ZeroWriteTimeout => {
                write!(f, "timeouts.write_secs must be nonzero")
            }
            ValidationError::EmptyLogLevel => write!(f, "logging.level must not be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a deserialized config for semantic problems, collecting every
/// violation rather than stopping at the first.
pub fn validate_config(config: &ExtensionConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.daemon.host.is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if config.daemon.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.limits.max_frame_bytes == 0 {
        errors.push(ValidationError::ZeroFrameLimit);
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroConnectTimeout);
    }
    if config.timeouts.write_secs == 0 {
        errors.push(ValidationError::ZeroWriteTimeout);
    }
    if config.logging.level.is_empty() {
        errors.push(ValidationError::EmptyLogLevel);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
