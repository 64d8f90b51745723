use crate::generator::Generator;
use linklet_core::Shortcode;

/// A deterministic shortcode generator using a sequential counter.
///
/// Produces codes like "lk000000", "lk000001", etc. Used in tests where
/// generated codes must be predictable. The prefix must be
/// alphanumeric so every emitted code passes format validation.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: std::sync::atomic::AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: std::sync::atomic::AtomicU64::new(
                self.counter.load(std::sync::atomic::Ordering::SeqCst),
            ),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with the given prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            counter: std::sync::atomic::AtomicU64::new(0),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    fn generate(&self) -> Shortcode {
        let count = self
            .counter
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Shortcode::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_sequential_codes() {
        let generator = SeqGenerator::with_prefix("lk");

        assert_eq!(generator.generate().as_str(), "lk000000");
        assert_eq!(generator.generate().as_str(), "lk000001");
        assert_eq!(generator.generate().as_str(), "lk000002");
    }

    #[test]
    fn codes_pass_validation() {
        let generator = SeqGenerator::with_prefix("lk");
        assert!(Shortcode::new(generator.generate().as_str()).is_ok());
    }

    #[test]
    fn clone_preserves_counter_state() {
        let generator = SeqGenerator::with_prefix("lk");
        generator.generate();

        let cloned = generator.clone();

        assert_eq!(generator.generate().as_str(), "lk000001");
        assert_eq!(cloned.generate().as_str(), "lk000001");
    }
}
