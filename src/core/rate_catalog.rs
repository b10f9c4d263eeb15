use std::sync::Mutex;

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    core::time::{Clock, SystemClock},
    domain::{Displayable, RateBook, RateConfiguration, RateDraft},
    errors::{PricingError, Result},
    storage::RateStore,
};

/// Effective-dated catalog of rate configurations.
///
/// Reads observe one committed snapshot of the rate book. Writes are
/// serialised, applied to a copy of the book, validated, and committed to the
/// store in a single call, so closing the previous current configuration and
/// adding the new one are never observed separately.
pub struct RateCatalog {
    storage: Box<dyn RateStore>,
    clock: Box<dyn Clock>,
    write_guard: Mutex<()>,
}

impl RateCatalog {
    pub fn new(storage: Box<dyn RateStore>) -> Self {
        Self::with_clock(storage, Box::new(SystemClock))
    }

    pub fn with_clock(storage: Box<dyn RateStore>, clock: Box<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            write_guard: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &dyn RateStore {
        self.storage.as_ref()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn get_current(&self) -> Result<RateConfiguration> {
        let book = self.storage.load()?;
        match book.current() {
            Some(config) => Ok(config.clone()),
            None => {
                warn!("no current rate configuration");
                Err(PricingError::NoCurrentConfiguration)
            }
        }
    }

    pub fn get_effective_at(&self, date: NaiveDate) -> Result<RateConfiguration> {
        let book = self.storage.load()?;
        match book.effective_at(date) {
            Some(config) => Ok(config.clone()),
            None => {
                warn!(%date, "no rate configuration in effect");
                Err(PricingError::NotConfigured { date })
            }
        }
    }

    pub fn get(&self, id: Uuid) -> Result<RateConfiguration> {
        let book = self.storage.load()?;
        book.get(id)
            .cloned()
            .ok_or(PricingError::ConfigurationNotFound(id))
    }

    /// All configurations, oldest first.
    pub fn list(&self) -> Result<Vec<RateConfiguration>> {
        Ok(self.storage.load()?.configurations().to_vec())
    }

    /// Adds a configuration, closing the current one the day before it starts.
    pub fn create(&self, draft: RateDraft) -> Result<RateConfiguration> {
        let today = self.today();
        let id = self.write(|book| book.supersede(draft, today))?;
        let created = self.get(id)?;
        info!(id = %created.id, rates = %created.display_label(), "rate configuration created");
        Ok(created)
    }

    /// Supersedes the current configuration; fails when there is none.
    pub fn replace(&self, draft: RateDraft) -> Result<RateConfiguration> {
        let today = self.today();
        let id = self.write(|book| {
            if book.current().is_none() {
                return Err(PricingError::NoCurrentConfiguration);
            }
            book.supersede(draft, today)
        })?;
        let created = self.get(id)?;
        info!(
            id = %created.id,
            rates = %created.display_label(),
            "current rate configuration replaced"
        );
        Ok(created)
    }

    /// Edits a configuration whose start date is still in the future.
    pub fn update(&self, id: Uuid, draft: RateDraft) -> Result<RateConfiguration> {
        let today = self.today();
        self.write(|book| book.amend(id, draft, today))?;
        info!(%id, "rate configuration updated");
        self.get(id)
    }

    /// Deletes a configuration whose start date is still in the future.
    pub fn delete(&self, id: Uuid) -> Result<RateConfiguration> {
        let today = self.today();
        let removed = self.write(|book| book.withdraw(id, today))?;
        info!(%id, start = %removed.start_date(), "rate configuration deleted");
        Ok(removed)
    }

    fn write<T>(&self, apply: impl FnOnce(&mut RateBook) -> Result<T>) -> Result<T> {
        let _guard = self
            .write_guard
            .lock()
            .map_err(|_| PricingError::StorageError("rate catalog lock poisoned".into()))?;
        let mut book = self.storage.load()?;
        let outcome = apply(&mut book)?;
        self.storage.commit(&book)?;
        Ok(outcome)
    }
}
