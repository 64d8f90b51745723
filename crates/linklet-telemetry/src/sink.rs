use crate::client::LogClient;
use crate::payload::{Level, Stack};
use linklet_core::{EventSink, LinkEvent};
use std::sync::Arc;
use tracing::warn;

/// `EventSink` adapter that forwards registry events to the remote
/// collector as fire-and-forget log entries.
///
/// Each event spawns a delivery task on the current tokio runtime;
/// failures are logged locally and dropped, never surfaced to the
/// registry. Must be constructed inside a runtime.
#[derive(Debug, Clone)]
pub struct RemoteSink {
    client: Arc<LogClient>,
}

impl RemoteSink {
    pub fn new(client: LogClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl EventSink for RemoteSink {
    fn emit(&self, event: LinkEvent) {
        let client = Arc::clone(&self.client);
        let message = match event {
            LinkEvent::Created { id, shortcode } => {
                format!("shortened link {} created with code {}", id, shortcode)
            }
            LinkEvent::Visited { id, shortcode } => {
                format!("click recorded for link {} ({})", id, shortcode)
            }
        };

        tokio::spawn(async move {
            if let Err(error) = client
                .log(Stack::Backend, Level::Info, "service", &message)
                .await
            {
                warn!(%error, "dropping telemetry event");
            }
        });
    }
}
