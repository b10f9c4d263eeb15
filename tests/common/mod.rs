#![allow(dead_code)]

use std::sync::Mutex;

use chrono::NaiveDate;
use mailbox_core::{
    config::ConfigManager,
    core::{FixedClock, PricingEngine, RateCatalog},
    domain::{FeeSchedule, RateDraft},
    storage::{JsonRateStore, MemoryRateStore},
};
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Fee schedule with a flat 2.00 surcharge for slots four through seven.
pub fn standard_fees() -> FeeSchedule {
    FeeSchedule {
        base_rate_three_month: dec!(51),
        base_rate_six_month: dec!(96),
        base_rate_twelve_month: dec!(180),
        business_account_fee: dec!(4),
        fourth_recipient_fee: dec!(2),
        fifth_recipient_fee: dec!(2),
        sixth_recipient_fee: dec!(2),
        seventh_recipient_fee: dec!(2),
        minor_recipient_fee: dec!(1),
        key_deposit: dec!(10),
    }
}

pub fn draft(start: NaiveDate) -> RateDraft {
    RateDraft::new(start, standard_fees())
}

/// Catalog over an in-memory store, pinned to `today`.
pub fn memory_catalog(today: NaiveDate) -> RateCatalog {
    RateCatalog::with_clock(
        Box::new(MemoryRateStore::new()),
        Box::new(FixedClock::new(today)),
    )
}

/// Engine over an in-memory store with one configuration starting 2024-01-01.
pub fn seeded_engine(today: NaiveDate) -> PricingEngine {
    let catalog = memory_catalog(today);
    catalog
        .create(draft(date(2024, 1, 1)))
        .expect("seed rate configuration");
    PricingEngine::new(catalog)
}

/// Creates an isolated JSON-backed catalog and config manager for each test.
pub fn setup_test_env(today: NaiveDate) -> (RateCatalog, ConfigManager, std::path::PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let storage = JsonRateStore::new(Some(base.join("data")), Some(3))
        .expect("create json storage backend");
    let catalog = RateCatalog::with_clock(Box::new(storage), Box::new(FixedClock::new(today)));
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");

    (catalog, config_manager, base)
}
