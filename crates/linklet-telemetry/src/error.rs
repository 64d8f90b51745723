use crate::payload::Stack;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum TelemetryError {
    #[error("invalid stack: {0} (must be one of: backend, frontend)")]
    InvalidStack(String),
    #[error("invalid level: {0} (must be one of: debug, info, warn, error, fatal)")]
    InvalidLevel(String),
    #[error("invalid package '{package}' for stack '{stack}'")]
    InvalidPackage { package: String, stack: Stack },
    #[error("log request failed: {0}")]
    Transport(String),
    #[error("log collector returned {status}: {body}")]
    Api { status: u16, body: String },
}
