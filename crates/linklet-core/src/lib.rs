//! Core types and traits for the linklet URL shortener.
//!
//! This crate provides the domain model (link records, click events,
//! shortcodes), the error types, and the seams the registry is built
//! against: the [`Store`] persistence trait and the [`EventSink`]
//! activity-log trait.

pub mod error;
pub mod events;
pub mod record;
pub mod shortcode;
pub mod store;

pub use error::{CreateError, StoreError, ValidationError, ValidationErrors, VisitError};
pub use events::{EventSink, LinkEvent, NoopSink};
pub use record::{ClickEvent, LinkId, LinkRecord, LinkStatus, CLICK_LOCATION, CLICK_SOURCE};
pub use shortcode::Shortcode;
pub use store::Store;
