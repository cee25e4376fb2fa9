//! Store Module
//!
//! Reads and writes the item collection persisted as a single JSON array.

mod file;
mod item;

use std::future::Future;

use crate::error::Result;

// Re-export public types
pub use file::ItemStore;
pub use item::{Item, NewItem};

// == Item Source ==
/// Anything that can hand out a full, consistent read of the item collection.
pub trait ItemSource: Send + Sync + 'static {
    /// Loads every item currently persisted.
    fn read_all(&self) -> impl Future<Output = Result<Vec<Item>>> + Send;
}
