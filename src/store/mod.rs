//! Persistent Store
//!
//! Storage seam (`KeyValueSlot`) and the collection document on top of it.

mod document;
mod slot;

pub use document::{DocumentStore, LoadSource, Loaded, DEFAULT_STORAGE_KEY};
pub use slot::{FileSlot, KeyValueSlot, MemorySlot};
