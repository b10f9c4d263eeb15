pub mod composition_service;
pub mod pricing_service;
pub mod renewal_service;

pub use composition_service::CompositionService;
pub use pricing_service::PricingService;
pub use renewal_service::RenewalService;
