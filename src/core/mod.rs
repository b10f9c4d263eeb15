pub mod pricing_engine;
pub mod rate_catalog;
pub mod services;
pub mod time;
pub mod utils;

pub use pricing_engine::PricingEngine;
pub use rate_catalog::RateCatalog;
pub use time::{Clock, FixedClock, SystemClock};
