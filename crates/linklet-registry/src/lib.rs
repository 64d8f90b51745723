//! The Link Registry: validation, creation, expiry tracking, and click
//! recording for shortened URLs.
//!
//! This crate provides the [`LinkRegistry`] service and the shortcode
//! [`Generator`] trait. Domain types are re-exported from
//! `linklet_core`.

pub mod generator;
pub mod registry;

pub use generator::{Generator, RandomGenerator, SeqGenerator};
pub use registry::{CreateRequest, LinkRegistry, DEFAULT_VALIDITY_MINUTES};
