use crate::generator::Generator;
use jiff::{SignedDuration, Timestamp};
use linklet_core::{
    ClickEvent, CreateError, EventSink, LinkEvent, LinkId, LinkRecord, LinkStatus, NoopSink,
    Shortcode, Store, StoreError, ValidationError, ValidationErrors, VisitError,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;
use url::Url;

/// Validity applied when a create request does not specify one.
pub const DEFAULT_VALIDITY_MINUTES: u32 = 30;

/// Upper bound on regeneration attempts when a generated shortcode
/// collides with an existing one. With a 62^6 code space this is never
/// reached in practice.
const MAX_GENERATION_ATTEMPTS: usize = 16;

/// Parameters for creating a shortened link.
///
/// The custom code is carried as a raw string so that format and
/// uniqueness problems can be reported alongside the other field
/// errors instead of failing early.
#[derive(Debug, Clone, TypedBuilder)]
pub struct CreateRequest {
    /// The original URL to be shortened.
    #[builder(setter(into))]
    pub original_url: String,
    /// Validity period in minutes; defaults to
    /// [`DEFAULT_VALIDITY_MINUTES`] when absent.
    #[builder(default)]
    pub validity_minutes: Option<u32>,
    /// Optional user-supplied shortcode.
    #[builder(default, setter(strip_option, into))]
    pub custom_code: Option<String>,
}

/// The link registry: owns validation, creation, expiry computation,
/// and click recording for the whole link collection.
///
/// Wraps a [`Store`] (which persists every mutation) and a
/// [`Generator`] for shortcodes. Activity events go to an optional
/// [`EventSink`] whose failures never reach the registry.
#[derive(Clone)]
pub struct LinkRegistry<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
    sink: Arc<dyn EventSink>,
    next_id: Arc<AtomicU64>,
}

impl<S: Store, G: Generator> LinkRegistry<S, G> {
    /// Creates a registry over the given store, seeding the id counter
    /// from the highest id already persisted.
    pub async fn new(store: S, generator: G) -> Result<Self, StoreError> {
        let max_id = store
            .list()
            .await?
            .iter()
            .map(|record| record.id.get())
            .max()
            .unwrap_or(0);

        Ok(Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            sink: Arc::new(NoopSink),
            next_id: Arc::new(AtomicU64::new(max_id + 1)),
        })
    }

    /// Attaches an activity event sink.
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Validates the request and creates a new shortened link.
    ///
    /// Every check runs even after one fails, so a single response
    /// carries all field errors at once. On success the record is
    /// appended to the store (which persists the collection) before it
    /// is returned.
    pub async fn create(&self, request: CreateRequest) -> Result<LinkRecord, CreateError> {
        let mut errors = Vec::new();

        if let Err(error) = validate_url(&request.original_url) {
            errors.push(error);
        }

        let created_at = Timestamp::now();
        let validity_minutes = request
            .validity_minutes
            .unwrap_or(DEFAULT_VALIDITY_MINUTES);
        let expiry = compute_expiry(created_at, validity_minutes);
        if let Err(error) = &expiry {
            errors.push(error.clone());
        }

        let mut custom_code = None;
        if let Some(raw) = &request.custom_code {
            match Shortcode::new(raw.clone()) {
                Ok(code) => {
                    if self.store.contains_code(&code).await? {
                        errors.push(ValidationError::ShortcodeTaken(code.to_string()));
                    } else {
                        custom_code = Some(code);
                    }
                }
                Err(error) => errors.push(error),
            }
        }

        if !errors.is_empty() {
            return Err(ValidationErrors::new(errors).into());
        }

        let expiry_at = expiry.map_err(|error| ValidationErrors::new(vec![error]))?;
        let shortcode = match custom_code {
            Some(code) => code,
            None => self.generate_unique_code().await?,
        };

        let record = LinkRecord {
            id: LinkId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
            original_url: request.original_url,
            shortcode,
            created_at,
            expiry_at,
            clicks: 0,
            click_events: Vec::new(),
        };

        self.store.insert(record.clone()).await?;

        info!(
            id = %record.id,
            shortcode = %record.shortcode,
            expiry_at = %record.expiry_at,
            "created shortened link"
        );
        self.sink.emit(LinkEvent::Created {
            id: record.id,
            shortcode: record.shortcode.as_str().to_string(),
        });

        Ok(record)
    }

    /// Records a visit to the link with the given id.
    ///
    /// Visiting an expired link fails without mutating anything;
    /// callers surface that as a non-fatal notice and must not open
    /// the target URL. On success the click event is appended, the
    /// counter incremented, and the collection persisted. Navigating
    /// to the original URL is the caller's side effect.
    pub async fn record_visit(&self, id: LinkId) -> Result<ClickEvent, VisitError> {
        let Some(mut record) = self.store.get(id).await? else {
            return Err(VisitError::NotFound(id));
        };

        let now = Timestamp::now();
        if record.status(now) == LinkStatus::Expired {
            warn!(id = %id, expiry_at = %record.expiry_at, "visit to expired link rejected");
            return Err(VisitError::Expired(id));
        }

        let event = ClickEvent::direct(now);
        record.record_click(event.clone());
        self.store.update(record.clone()).await?;

        debug!(id = %id, clicks = record.clicks, "recorded click");
        self.sink.emit(LinkEvent::Visited {
            id,
            shortcode: record.shortcode.as_str().to_string(),
        });

        Ok(event)
    }

    /// Returns every record that has not yet expired, in insertion
    /// order. Recomputed on each call; expiry is a function of
    /// wall-clock time and is never cached.
    pub async fn list_active(&self) -> Result<Vec<LinkRecord>, StoreError> {
        let now = Timestamp::now();
        Ok(self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|record| record.is_active(now))
            .collect())
    }

    /// Returns the last `limit` active records, most recently created
    /// first. This backs the shortener view's "recent links" panel.
    pub async fn recent(&self, limit: usize) -> Result<Vec<LinkRecord>, StoreError> {
        let mut active = self.list_active().await?;
        let start = active.len().saturating_sub(limit);
        let mut recent: Vec<_> = active.drain(start..).collect();
        recent.reverse();
        Ok(recent)
    }

    /// Returns every record regardless of expiry, in insertion order.
    /// This backs the statistics view.
    pub async fn list_all(&self) -> Result<Vec<LinkRecord>, StoreError> {
        self.store.list().await
    }

    /// Retrieves a single record by id, expired or not.
    pub async fn get(&self, id: LinkId) -> Result<Option<LinkRecord>, StoreError> {
        self.store.get(id).await
    }

    /// Generates a shortcode and re-checks it against the store,
    /// retrying on collision.
    async fn generate_unique_code(&self) -> Result<Shortcode, CreateError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let code = self.generator.generate();
            if !self.store.contains_code(&code).await? {
                return Ok(code);
            }
            debug!(shortcode = %code, "generated shortcode collided, retrying");
        }

        Err(CreateError::Generation(format!(
            "no unique shortcode after {} attempts",
            MAX_GENERATION_ATTEMPTS
        )))
    }
}

/// Validates the validity period and computes the expiry timestamp.
///
/// A validity that pushes the expiry past the representable timestamp
/// range is an input error, not a panic.
fn compute_expiry(created_at: Timestamp, minutes: u32) -> Result<Timestamp, ValidationError> {
    if minutes < 1 {
        return Err(ValidationError::InvalidValidity(
            "validity must be a positive integer (minutes)".to_string(),
        ));
    }

    created_at
        .checked_add(SignedDuration::from_secs(i64::from(minutes) * 60))
        .map_err(|_| {
            ValidationError::InvalidValidity(format!(
                "validity of {} minutes exceeds the representable time range",
                minutes
            ))
        })
}

/// Validates that the input is a well-formed absolute URL with a host.
fn validate_url(raw: &str) -> Result<(), ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::InvalidUrl(
            "original url is required".to_string(),
        ));
    }

    match Url::parse(raw) {
        Ok(url) if url.has_host() => Ok(()),
        Ok(_) => Err(ValidationError::InvalidUrl(format!(
            "url must have a scheme and host: {}",
            raw
        ))),
        Err(error) => Err(ValidationError::InvalidUrl(format!("{}: {}", raw, error))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::seq::SeqGenerator;
    use linklet_store::MemoryStore;
    use std::sync::Mutex;

    async fn test_registry() -> LinkRegistry<MemoryStore, SeqGenerator> {
        LinkRegistry::new(MemoryStore::new(), SeqGenerator::with_prefix("lk"))
            .await
            .unwrap()
    }

    fn request(url: &str) -> CreateRequest {
        CreateRequest::builder().original_url(url).build()
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<LinkEvent>>,
    }

    impl EventSink for RecordingSink {
        fn emit(&self, event: LinkEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[tokio::test]
    async fn create_with_generated_code() {
        let registry = test_registry().await;

        let record = registry.create(request("https://example.com")).await.unwrap();

        assert_eq!(record.shortcode.as_str(), "lk000000");
        assert_eq!(record.clicks, 0);
        assert!(record.click_events.is_empty());
    }

    #[tokio::test]
    async fn random_codes_are_six_alphanumeric_chars() {
        let registry = LinkRegistry::new(MemoryStore::new(), crate::RandomGenerator::new())
            .await
            .unwrap();

        let record = registry.create(request("https://example.com")).await.unwrap();

        assert_eq!(record.shortcode.as_str().len(), 6);
        assert!(record
            .shortcode
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn expiry_is_exactly_validity_minutes_after_creation() {
        let registry = test_registry().await;

        let req = CreateRequest::builder()
            .original_url("https://example.com")
            .validity_minutes(Some(1))
            .build();
        let record = registry.create(req).await.unwrap();

        assert_eq!(
            record.expiry_at.duration_since(record.created_at),
            SignedDuration::from_secs(60)
        );
        assert_eq!(record.status(record.created_at), LinkStatus::Active);
        assert_eq!(
            record.status(record.expiry_at + SignedDuration::from_secs(1)),
            LinkStatus::Expired
        );
    }

    #[tokio::test]
    async fn validity_defaults_to_thirty_minutes() {
        let registry = test_registry().await;

        let record = registry.create(request("https://example.com")).await.unwrap();

        assert_eq!(
            record.expiry_at.duration_since(record.created_at),
            SignedDuration::from_secs(i64::from(DEFAULT_VALIDITY_MINUTES) * 60)
        );
    }

    #[tokio::test]
    async fn create_with_custom_code() {
        let registry = test_registry().await;

        let req = CreateRequest::builder()
            .original_url("https://example.com")
            .custom_code("myCustomCode")
            .build();
        let record = registry.create(req).await.unwrap();

        assert_eq!(record.shortcode.as_str(), "myCustomCode");
    }

    #[tokio::test]
    async fn duplicate_custom_code_fails_with_taken() {
        let registry = test_registry().await;

        let req = CreateRequest::builder()
            .original_url("https://a.com")
            .custom_code("abc123")
            .build();
        registry.create(req.clone()).await.unwrap();

        let err = registry.create(req).await.unwrap_err();
        let CreateError::Validation(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors.errors()[0],
            ValidationError::ShortcodeTaken(_)
        ));
    }

    #[tokio::test]
    async fn invalid_url_is_the_only_error_for_an_otherwise_valid_request() {
        let registry = test_registry().await;

        let err = registry.create(request("not-a-url")).await.unwrap_err();

        let CreateError::Validation(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors.errors()[0], ValidationError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn url_without_host_is_rejected() {
        let registry = test_registry().await;

        let err = registry.create(request("mailto:user@example.com")).await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn zero_validity_is_rejected() {
        let registry = test_registry().await;

        let req = CreateRequest::builder()
            .original_url("https://a.com")
            .validity_minutes(Some(0))
            .build();
        let err = registry.create(req).await.unwrap_err();

        let CreateError::Validation(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors.errors()[0],
            ValidationError::InvalidValidity(_)
        ));
    }

    #[tokio::test]
    async fn overflowing_validity_is_rejected_without_panicking() {
        let registry = test_registry().await;

        // u32::MAX minutes lands past the maximum representable
        // timestamp, so the expiry computation cannot succeed.
        let req = CreateRequest::builder()
            .original_url("https://a.com")
            .validity_minutes(Some(u32::MAX))
            .build();
        let err = registry.create(req).await.unwrap_err();

        let CreateError::Validation(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors.errors()[0],
            ValidationError::InvalidValidity(_)
        ));
    }

    #[tokio::test]
    async fn all_field_errors_are_reported_together() {
        let registry = test_registry().await;

        let req = CreateRequest::builder()
            .original_url("not-a-url")
            .validity_minutes(Some(0))
            .custom_code("has spaces")
            .build();
        let err = registry.create(req).await.unwrap_err();

        let CreateError::Validation(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 3);
    }

    #[tokio::test]
    async fn generated_code_retries_on_collision() {
        let registry = test_registry().await;

        // Take the deterministic generator's first output as a custom code.
        let req = CreateRequest::builder()
            .original_url("https://a.com")
            .custom_code("lk000000")
            .build();
        registry.create(req).await.unwrap();

        let record = registry.create(request("https://b.com")).await.unwrap();
        assert_eq!(record.shortcode.as_str(), "lk000001");
    }

    #[tokio::test]
    async fn ids_are_unique_and_monotonic() {
        let registry = test_registry().await;

        let first = registry.create(request("https://a.com")).await.unwrap();
        let second = registry.create(request("https://b.com")).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn id_counter_resumes_past_persisted_records() {
        let store = MemoryStore::new();
        let registry = LinkRegistry::new(store.clone(), SeqGenerator::with_prefix("lk"))
            .await
            .unwrap();
        let first = registry.create(request("https://a.com")).await.unwrap();

        // A registry reopened over the same store continues the sequence.
        let reopened = LinkRegistry::new(store, SeqGenerator::with_prefix("xy"))
            .await
            .unwrap();
        let second = reopened.create(request("https://b.com")).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn visit_increments_clicks_by_exactly_one() {
        let registry = test_registry().await;
        let record = registry.create(request("https://example.com")).await.unwrap();

        let event = registry.record_visit(record.id).await.unwrap();
        assert_eq!(event.source, linklet_core::CLICK_SOURCE);
        assert_eq!(event.location, linklet_core::CLICK_LOCATION);

        let updated = registry
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .find(|r| r.id == record.id)
            .unwrap();
        assert_eq!(updated.clicks, 1);
        assert_eq!(updated.click_events.len(), 1);
        assert_eq!(updated.click_events[0], event);
    }

    #[tokio::test]
    async fn visit_unknown_id_fails_with_not_found() {
        let registry = test_registry().await;

        let err = registry.record_visit(LinkId::new(999)).await.unwrap_err();
        assert!(matches!(err, VisitError::NotFound(_)));
    }

    #[tokio::test]
    async fn visit_expired_link_fails_and_mutates_nothing() {
        let store = MemoryStore::new();
        let now = Timestamp::now();
        let expired = LinkRecord {
            id: LinkId::new(1),
            original_url: "https://example.com".to_string(),
            shortcode: Shortcode::new_unchecked("old123"),
            created_at: now - SignedDuration::from_secs(120),
            expiry_at: now - SignedDuration::from_secs(60),
            clicks: 0,
            click_events: Vec::new(),
        };
        store.insert(expired.clone()).await.unwrap();

        let registry = LinkRegistry::new(store.clone(), SeqGenerator::with_prefix("lk"))
            .await
            .unwrap();

        let err = registry.record_visit(expired.id).await.unwrap_err();
        assert!(matches!(err, VisitError::Expired(_)));

        let untouched = store.get(expired.id).await.unwrap().unwrap();
        assert_eq!(untouched.clicks, 0);
        assert!(untouched.click_events.is_empty());
    }

    #[tokio::test]
    async fn list_active_excludes_expired_records() {
        let store = MemoryStore::new();
        let now = Timestamp::now();
        let expired = LinkRecord {
            id: LinkId::new(1),
            original_url: "https://old.com".to_string(),
            shortcode: Shortcode::new_unchecked("old123"),
            created_at: now - SignedDuration::from_secs(120),
            expiry_at: now - SignedDuration::from_secs(60),
            clicks: 0,
            click_events: Vec::new(),
        };
        store.insert(expired).await.unwrap();

        let registry = LinkRegistry::new(store, SeqGenerator::with_prefix("lk"))
            .await
            .unwrap();
        let live = registry.create(request("https://new.com")).await.unwrap();

        let active = registry.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, live.id);

        // The expired record is still visible to the statistics view.
        assert_eq!(registry.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn recent_returns_newest_first_and_is_bounded() {
        let registry = test_registry().await;

        for i in 0..7 {
            registry
                .create(request(&format!("https://example{}.com", i)))
                .await
                .unwrap();
        }

        let recent = registry.recent(5).await.unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].original_url, "https://example6.com");
        assert_eq!(recent[4].original_url, "https://example2.com");
    }

    #[tokio::test]
    async fn list_all_is_idempotent_between_mutations() {
        let registry = test_registry().await;
        registry.create(request("https://a.com")).await.unwrap();
        registry.create(request("https://b.com")).await.unwrap();

        let first = registry.list_all().await.unwrap();
        let second = registry.list_all().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn create_and_visit_emit_events() {
        let sink = Arc::new(RecordingSink::default());
        let registry = LinkRegistry::new(MemoryStore::new(), SeqGenerator::with_prefix("lk"))
            .await
            .unwrap()
            .with_sink(sink.clone());

        let record = registry.create(request("https://example.com")).await.unwrap();
        registry.record_visit(record.id).await.unwrap();

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], LinkEvent::Created { .. }));
        assert!(matches!(events[1], LinkEvent::Visited { .. }));
    }

    #[tokio::test]
    async fn failed_creation_emits_nothing_and_stores_nothing() {
        let sink = Arc::new(RecordingSink::default());
        let registry = LinkRegistry::new(MemoryStore::new(), SeqGenerator::with_prefix("lk"))
            .await
            .unwrap()
            .with_sink(sink.clone());

        registry.create(request("not-a-url")).await.unwrap_err();

        assert!(sink.events.lock().unwrap().is_empty());
        assert!(registry.list_all().await.unwrap().is_empty());
    }
}
