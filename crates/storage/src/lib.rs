//! Storage abstraction and implementations for StudyDesk.
//!
//! This crate provides a trait-based store interface with an in-memory
//! implementation and JSON snapshot import/export.

#![warn(missing_docs)]

pub mod trait_;
pub mod memory;
pub mod snapshot;

pub use trait_::{Store, StorageError, Result};
pub use memory::MemoryStore;
pub use snapshot::Snapshot;
