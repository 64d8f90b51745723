use crate::shortcode::Shortcode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Origin label recorded for every click. The system has no real
/// referrer tracking, so this is a fixed placeholder.
pub const CLICK_SOURCE: &str = "Direct Click";

/// Geo label recorded for every click. Fixed placeholder, same as above.
pub const CLICK_LOCATION: &str = "Hyderabad, India";

/// Unique, monotonically assigned identifier of a link record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LinkId(u64);

impl LinkId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for LinkId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One visit to a shortened link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Time of the visit.
    pub timestamp: Timestamp,
    /// Origin label (currently always [`CLICK_SOURCE`]).
    pub source: String,
    /// Geo label (currently always [`CLICK_LOCATION`]).
    pub location: String,
}

impl ClickEvent {
    /// Builds the placeholder click event recorded for a direct visit.
    pub fn direct(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            source: CLICK_SOURCE.to_string(),
            location: CLICK_LOCATION.to_string(),
        }
    }
}

/// Whether a link is still usable, computed from wall-clock time.
///
/// Status is never stored; a record transitions from `Active` to
/// `Expired` purely by the clock moving past `expiry_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Active,
    Expired,
}

impl Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkStatus::Active => f.write_str("Active"),
            LinkStatus::Expired => f.write_str("Expired"),
        }
    }
}

/// One shortened URL.
///
/// Every field except `clicks` and `click_events` is write-once: records
/// are only ever mutated by appending a click event, and
/// `clicks == click_events.len()` holds at all times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: LinkId,
    pub original_url: String,
    pub shortcode: Shortcode,
    pub created_at: Timestamp,
    pub expiry_at: Timestamp,
    pub clicks: u64,
    pub click_events: Vec<ClickEvent>,
}

impl LinkRecord {
    /// Computes the record's status at the given instant.
    ///
    /// A record is `Active` up to and including `expiry_at`; it is
    /// `Expired` strictly after.
    pub fn status(&self, now: Timestamp) -> LinkStatus {
        if now <= self.expiry_at {
            LinkStatus::Active
        } else {
            LinkStatus::Expired
        }
    }

    pub fn is_active(&self, now: Timestamp) -> bool {
        self.status(now) == LinkStatus::Active
    }

    /// The display form of the shortened URL: `<base>/<shortcode>`.
    ///
    /// Derived on demand, never persisted.
    pub fn short_url(&self, base_url: &str) -> String {
        self.shortcode.to_url(base_url)
    }

    /// Appends a click event, keeping the click counter in sync.
    ///
    /// This is the only mutation a record supports.
    pub fn record_click(&mut self, event: ClickEvent) {
        self.click_events.push(event);
        self.clicks += 1;
    }
}
