use crate::error::TelemetryError;
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

/// Which half of the system a log entry originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stack {
    Backend,
    Frontend,
}

impl FromStr for Stack {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "backend" => Ok(Stack::Backend),
            "frontend" => Ok(Stack::Frontend),
            _ => Err(TelemetryError::InvalidStack(s.to_string())),
        }
    }
}

impl Display for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stack::Backend => f.write_str("backend"),
            Stack::Frontend => f.write_str("frontend"),
        }
    }
}

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl FromStr for Level {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            _ => Err(TelemetryError::InvalidLevel(s.to_string())),
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Debug => f.write_str("debug"),
            Level::Info => f.write_str("info"),
            Level::Warn => f.write_str("warn"),
            Level::Error => f.write_str("error"),
            Level::Fatal => f.write_str("fatal"),
        }
    }
}

/// Packages only valid for backend entries.
pub const BACKEND_PACKAGES: &[&str] = &[
    "cache",
    "controller",
    "cron_job",
    "db",
    "domain",
    "handler",
    "repository",
    "route",
    "service",
];

/// Packages only valid for frontend entries.
pub const FRONTEND_PACKAGES: &[&str] = &["api", "component", "hook", "page", "state", "style"];

/// Packages valid for either stack.
pub const UNIVERSAL_PACKAGES: &[&str] = &["auth", "config", "middleware", "utils"];

/// Validates `package` against the allow-list for `stack`,
/// case-insensitively, returning the normalized lowercase form.
pub fn validate_package(stack: Stack, package: &str) -> Result<String, TelemetryError> {
    let normalized = package.to_ascii_lowercase();
    let stack_specific = match stack {
        Stack::Backend => BACKEND_PACKAGES,
        Stack::Frontend => FRONTEND_PACKAGES,
    };

    if stack_specific.contains(&normalized.as_str())
        || UNIVERSAL_PACKAGES.contains(&normalized.as_str())
    {
        Ok(normalized)
    } else {
        Err(TelemetryError::InvalidPackage {
            package: package.to_string(),
            stack,
        })
    }
}

/// The JSON body POSTed to the collector.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub stack: Stack,
    pub level: Level,
    pub package: String,
    pub message: String,
}
