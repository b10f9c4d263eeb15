//! Rate, recipient, and breakdown models shared by the pricing services.

pub mod breakdown;
pub mod calendar;
pub mod common;
pub mod rate;
pub mod rate_book;
pub mod recipient;
pub mod renewal;

pub use breakdown::{
    MinorTransition, PriceBreakdown, PriceInput, RecipientComposition, RenewalPriceBreakdown,
};
pub use common::{Displayable, Identifiable, NamedEntity};
pub use rate::{
    EffectivePeriod, FeeSchedule, RateConfiguration, RateDraft, INCLUDED_ADULT_SLOTS,
    MAX_RECIPIENTS,
};
pub use rate_book::RateBook;
pub use recipient::{RecipientKind, RecipientSnapshot};
pub use renewal::RenewalPeriod;
