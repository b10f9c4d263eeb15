#![doc(test(attr(deny(warnings))))]

//! Mailbox Core prices mailbox rentals: an effective-dated catalog of rate
//! configurations, a price calculator for a recipient composition, and a
//! renewal calculator that prorates minors who come of age mid-term.

pub mod billing;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::{Clock, FixedClock, PricingEngine, RateCatalog, SystemClock};
pub use domain::{
    FeeSchedule, MinorTransition, PriceBreakdown, PriceInput, RateConfiguration, RateDraft,
    RecipientSnapshot, RenewalPeriod, RenewalPriceBreakdown,
};
pub use errors::{PricingError, Result};
pub use storage::{JsonRateStore, MemoryRateStore, RateStore};

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    if utils::init_tracing() {
        tracing::info!("Mailbox Core tracing initialized.");
    }
}

/// Same as [`init`], filtering logs with `config.log_filter`. Tracing is
/// installed once per process, so a filter passed after an earlier `init`
/// is ignored and reported with a warning.
pub fn init_with_config(config: &config::Config) {
    if utils::init_tracing_with(&config.log_filter) {
        tracing::info!(filter = %config.log_filter, "Mailbox Core tracing initialized.");
    } else if utils::active_directive() != Some(config.log_filter.as_str()) {
        tracing::warn!(
            requested = %config.log_filter,
            active = ?utils::active_directive(),
            "tracing already initialized; log_filter ignored"
        );
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }

    #[test]
    fn config_filter_after_init_keeps_the_active_directive() {
        super::init();
        let active = super::utils::active_directive();
        let config = super::config::Config {
            log_filter: "mailbox_core=trace".into(),
            ..super::config::Config::default()
        };
        super::init_with_config(&config);
        assert_eq!(super::utils::active_directive(), active);
    }
}
