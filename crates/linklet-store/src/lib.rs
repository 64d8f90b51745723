//! Storage backends for the linklet link collection.
//!
//! Two implementations of the `Store` trait: an in-memory store for
//! tests and a JSON-file store that keeps the whole collection in one
//! flat blob, rewritten on every mutation.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
