use crate::record::LinkId;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// A single failed input check during link creation.
///
/// Creation runs every check and reports all failures together, so the
/// submitter can fix multiple fields at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid validity: {0}")]
    InvalidValidity(String),
    #[error("invalid shortcode: {0}")]
    InvalidShortcodeFormat(String),
    #[error("shortcode already taken: {0}")]
    ShortcodeTaken(String),
}

/// The full set of input failures from one create request.
///
/// Always non-empty when returned as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self(errors)
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Errors from the persistence backend.
///
/// Message payloads are strings so the error stays `Clone`able across
/// the trait seam.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store i/o failed: {0}")]
    Io(String),
    #[error("stored data is invalid: {0}")]
    Serialization(String),
    #[error("shortcode already exists: {0}")]
    CodeConflict(String),
    #[error("no record with id {0}")]
    UnknownId(u64),
}

/// Errors from the registry's create operation.
#[derive(Debug, Clone, Error)]
pub enum CreateError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("shortcode generation failed: {0}")]
    Generation(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors from recording a visit to a shortened link.
#[derive(Debug, Clone, Error)]
pub enum VisitError {
    #[error("no link with id {0}")]
    NotFound(LinkId),
    #[error("link {0} has expired")]
    Expired(LinkId),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
