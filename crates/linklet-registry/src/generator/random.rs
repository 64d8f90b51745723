use crate::generator::Generator;
use linklet_core::Shortcode;
use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of generated shortcodes.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Generates 6-character codes drawn uniformly from the 62-character
/// alphanumeric alphabet.
///
/// Codes are not unique by construction; the registry checks the store
/// and asks for a fresh code on collision.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl RandomGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> Shortcode {
        let code: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(GENERATED_CODE_LENGTH)
            .map(char::from)
            .collect();
        Shortcode::new_unchecked(code)
    }
}
