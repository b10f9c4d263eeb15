pub mod json_backend;
pub mod memory;

use crate::{domain::RateBook, errors::Result};

/// Abstraction over persistence backends capable of storing the rate book.
///
/// `commit` replaces the stored book as one unit: after it returns either the
/// whole new book is visible to `load` or the previous one still is.
pub trait RateStore: Send + Sync {
    /// Loads the committed rate book; an empty book when nothing is stored yet.
    fn load(&self) -> Result<RateBook>;
    fn commit(&self, book: &RateBook) -> Result<()>;
}

pub use json_backend::JsonRateStore;
pub use memory::MemoryRateStore;
