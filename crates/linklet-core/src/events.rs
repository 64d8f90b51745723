use crate::record::LinkId;

/// Activity events the registry reports to an external collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// A new shortened link was created.
    Created { id: LinkId, shortcode: String },
    /// An active link was visited and the click recorded.
    Visited { id: LinkId, shortcode: String },
}

/// Fire-and-forget sink for registry activity events.
///
/// Contract: `emit` must not block the caller and implementations must
/// swallow their own delivery failures. The registry never observes a
/// sink error; a broken collector cannot affect registry state.
pub trait EventSink: Send + Sync + 'static {
    fn emit(&self, event: LinkEvent);
}

/// Sink that discards every event. Used when no collector is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: LinkEvent) {}
}
