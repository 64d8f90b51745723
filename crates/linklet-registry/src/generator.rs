pub mod random;
pub mod seq;

use linklet_core::Shortcode;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

/// Trait for generating shortcodes.
///
/// Implementations are pure generators that don't interact with
/// storage; the registry re-checks generated codes against the store
/// and retries on collision.
pub trait Generator: Send + Sync + 'static {
    /// Generates a candidate shortcode.
    ///
    /// The output must be ASCII alphanumeric.
    fn generate(&self) -> Shortcode;
}
