use crate::error::TelemetryError;
use crate::payload::{validate_package, Level, LogEntry, Stack};
use tracing::error;

/// HTTP client for the remote log collector.
#[derive(Debug, Clone)]
pub struct LogClient {
    endpoint: String,
    token: String,
    http: reqwest::Client,
}

impl LogClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Validates the payload and forwards it to the collector.
    ///
    /// An invalid package fails before any network I/O. Transport
    /// failures and non-success responses are logged locally and then
    /// returned to the caller. On success the decoded response body is
    /// returned.
    pub async fn log(
        &self,
        stack: Stack,
        level: Level,
        package: &str,
        message: &str,
    ) -> Result<serde_json::Value, TelemetryError> {
        let package = validate_package(stack, package)?;
        let entry = LogEntry {
            stack,
            level,
            package,
            message: message.to_string(),
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&entry)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, stack = %stack, level = %level, message, "failed to reach log collector");
                TelemetryError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), stack = %stack, level = %level, message, "log collector rejected entry");
            return Err(TelemetryError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| TelemetryError::Transport(e.to_string()))
    }
}
