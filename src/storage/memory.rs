use std::sync::RwLock;

use crate::{
    domain::RateBook,
    errors::{PricingError, Result},
};

use super::RateStore;

/// Process-local rate store for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryRateStore {
    book: RwLock<RateBook>,
}

impl MemoryRateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_book(book: RateBook) -> Self {
        Self {
            book: RwLock::new(book),
        }
    }
}

impl RateStore for MemoryRateStore {
    fn load(&self) -> Result<RateBook> {
        self.book
            .read()
            .map(|book| book.clone())
            .map_err(|_| PricingError::StorageError("rate store lock poisoned".into()))
    }

    fn commit(&self, book: &RateBook) -> Result<()> {
        book.validate()?;
        let mut stored = self
            .book
            .write()
            .map_err(|_| PricingError::StorageError("rate store lock poisoned".into()))?;
        *stored = book.clone();
        Ok(())
    }
}
