//! Remote log collaborator for the linklet registry.
//!
//! An enum-validated `(stack, level, package, message)` payload POSTed
//! to a remote collector with a bearer credential. Payload validation
//! fails synchronously before any network I/O; delivery failures are
//! logged locally and returned to the immediate caller, but the
//! [`RemoteSink`] adapter swallows them so the registry is never
//! affected.

pub mod client;
pub mod error;
pub mod payload;
pub mod sink;

pub use client::LogClient;
pub use error::TelemetryError;
pub use payload::{Level, LogEntry, Stack};
pub use sink::RemoteSink;
