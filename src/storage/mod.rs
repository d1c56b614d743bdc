//! Storage layer for the persisted session record.
//!
//! The session is persisted as a single JSON string under one fixed key. This
//! module provides the key-value abstraction it is written through and the
//! backends that implement it.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: in-process implementation

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
