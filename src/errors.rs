use std::result::Result as StdResult;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Error type shared by the rate catalog, calculators, and storage backends.
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("No rate configuration in effect on {date}")]
    NotConfigured { date: NaiveDate },
    #[error("No current rate configuration")]
    NoCurrentConfiguration,
    #[error("Rate configuration not found: {0}")]
    ConfigurationNotFound(Uuid),
    #[error("Rate configuration {id} started on {start_date} and can no longer be changed")]
    ImmutableConfiguration { id: Uuid, start_date: NaiveDate },
    #[error("Invalid input for `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("Rate catalog invariant violated: {0}")]
    InvariantViolation(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PricingError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        PricingError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True for lookups that found no applicable rate configuration.
    pub fn is_not_configured(&self) -> bool {
        matches!(
            self,
            PricingError::NotConfigured { .. } | PricingError::NoCurrentConfiguration
        )
    }
}

pub type Result<T> = StdResult<T, PricingError>;

impl From<std::io::Error> for PricingError {
    fn from(err: std::io::Error) -> Self {
        PricingError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for PricingError {
    fn from(err: serde_json::Error) -> Self {
        PricingError::StorageError(err.to_string())
    }
}
