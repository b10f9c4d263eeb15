use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::rate::{RateConfiguration, RateDraft},
    errors::{PricingError, Result},
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Effective-dated history of rate configurations, ordered by start date.
///
/// Every configuration except the last is closed, ranges never overlap, and
/// at most one configuration (the last) is open-ended. Mutations keep those
/// invariants or fail without changing anything the caller later commits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateBook {
    #[serde(default)]
    configurations: Vec<RateConfiguration>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "RateBook::schema_version_default")]
    pub schema_version: u8,
}

impl Default for RateBook {
    fn default() -> Self {
        Self::new()
    }
}

impl RateBook {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            configurations: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn configurations(&self) -> &[RateConfiguration] {
        &self.configurations
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    pub fn current(&self) -> Option<&RateConfiguration> {
        self.configurations.iter().find(|config| config.is_current())
    }

    pub fn effective_at(&self, date: NaiveDate) -> Option<&RateConfiguration> {
        self.configurations
            .iter()
            .find(|config| config.is_effective_on(date))
    }

    pub fn get(&self, id: Uuid) -> Option<&RateConfiguration> {
        self.configurations.iter().find(|config| config.id == id)
    }

    /// Closes the current configuration on the day before the draft's start
    /// and appends the draft as the new current configuration.
    ///
    /// Once a current configuration exists, new ones may not start before
    /// `today`; an empty book accepts any start date so history can be seeded.
    pub fn supersede(&mut self, draft: RateDraft, today: NaiveDate) -> Result<Uuid> {
        let config = RateConfiguration::from_draft(draft)?;
        let start = config.start_date();
        if let Some(current) = self.configurations.iter_mut().find(|c| c.is_current()) {
            if start < today {
                return Err(PricingError::invalid(
                    "start_date",
                    format!("{} is in the past; rates cannot be replaced retroactively", start),
                ));
            }
            current.effective.close_before(start)?;
        }
        let id = config.id;
        self.configurations.push(config);
        self.sort();
        self.validate()?;
        self.touch();
        Ok(id)
    }

    /// Rewrites a configuration that has not started yet, moving the end of
    /// its predecessor along with any change of start date.
    pub fn amend(&mut self, id: Uuid, draft: RateDraft, today: NaiveDate) -> Result<()> {
        let index = self.index_of(id)?;
        self.ensure_mutable(index, today)?;
        draft.fees.validate()?;
        let start = draft.start_date;
        if start <= today {
            return Err(PricingError::invalid(
                "start_date",
                format!("{} must be after today ({})", start, today),
            ));
        }
        if let Some(end) = self.configurations[index].end_date() {
            if start > end {
                return Err(PricingError::invalid(
                    "start_date",
                    format!("{} falls after this configuration's end {}", start, end),
                ));
            }
        }
        if index > 0 {
            self.configurations[index - 1].effective.close_before(start)?;
        }
        let config = &mut self.configurations[index];
        config.effective.start = start;
        config.fees = draft.fees;
        config.note = draft.note;
        self.validate()?;
        self.touch();
        Ok(())
    }

    /// Removes a configuration that has not started yet. Its predecessor
    /// inherits its end date, so withdrawing the current configuration
    /// re-opens the previous one.
    pub fn withdraw(&mut self, id: Uuid, today: NaiveDate) -> Result<RateConfiguration> {
        let index = self.index_of(id)?;
        self.ensure_mutable(index, today)?;
        let removed = self.configurations.remove(index);
        if index > 0 {
            self.configurations[index - 1].effective.end = removed.end_date();
        }
        self.validate()?;
        self.touch();
        Ok(removed)
    }

    /// Checks strict start-date ordering, the single-current rule and
    /// non-overlapping neighbours. Together these rule out any overlap.
    pub fn validate(&self) -> Result<()> {
        let last = self.configurations.len().saturating_sub(1);
        for (index, config) in self.configurations.iter().enumerate() {
            if let Some(end) = config.end_date() {
                if end < config.start_date() {
                    return Err(PricingError::InvariantViolation(format!(
                        "configuration {} ends before it starts",
                        config.id
                    )));
                }
            } else if index != last {
                return Err(PricingError::InvariantViolation(format!(
                    "configuration {} is open-ended but not the latest",
                    config.id
                )));
            }
            if let Some(next) = self.configurations.get(index + 1) {
                if next.start_date() <= config.start_date() {
                    return Err(PricingError::InvariantViolation(format!(
                        "configuration {} starts on or before its predecessor {}",
                        next.id, config.id
                    )));
                }
                if config.effective.overlaps(&next.effective) {
                    return Err(PricingError::InvariantViolation(format!(
                        "configurations {} and {} overlap",
                        config.id, next.id
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    fn sort(&mut self) {
        self.configurations.sort_by_key(|config| config.start_date());
    }

    fn index_of(&self, id: Uuid) -> Result<usize> {
        self.configurations
            .iter()
            .position(|config| config.id == id)
            .ok_or(PricingError::ConfigurationNotFound(id))
    }

    fn ensure_mutable(&self, index: usize, today: NaiveDate) -> Result<()> {
        let config = &self.configurations[index];
        if config.start_date() <= today {
            return Err(PricingError::ImmutableConfiguration {
                id: config.id,
                start_date: config.start_date(),
            });
        }
        Ok(())
    }
}
