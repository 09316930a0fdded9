//! Storage layer for MedAlert
//!
//! This crate provides the persistent key-value store the client screens
//! delegate to, plus the schema of the settings kept in it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod settings;

pub use kv::{KeyValueStore, KvConfig, KvError, KvStore, MemoryStore};
pub use settings::{keys, ColorMode};
