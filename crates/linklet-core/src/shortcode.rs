use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A validated shortcode identifier for a shortened URL.
///
/// Shortcodes are non-empty and contain only ASCII alphanumeric
/// characters, whether user-supplied or generated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shortcode(String);

impl Shortcode {
    /// Creates a new `Shortcode` after validating the input.
    pub fn new(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `Shortcode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (generators that are guaranteed to emit alphanumeric output).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the shortcode as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> Result<(), ValidationError> {
        if code.is_empty() {
            return Err(ValidationError::InvalidShortcodeFormat(
                "shortcode cannot be empty".to_string(),
            ));
        }

        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidShortcodeFormat(format!(
                "must contain only alphanumeric characters: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for Shortcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
