use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{rate::INCLUDED_ADULT_SLOTS, renewal::RenewalPeriod};

/// Billable head-count of a mailbox as of a reference date.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipientComposition {
    pub adult_count: u32,
    pub minor_count: u32,
    pub has_business_recipient: bool,
    pub total_count: u32,
}

/// Arguments for a forward-looking price quote.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceInput {
    pub renewal_period: RenewalPeriod,
    pub adult_recipient_count: u32,
    pub minor_recipient_count: u32,
    pub has_business_recipient: bool,
}

impl PriceInput {
    pub fn from_composition(renewal_period: RenewalPeriod, composition: &RecipientComposition) -> Self {
        Self {
            renewal_period,
            adult_recipient_count: composition.adult_count,
            minor_recipient_count: composition.minor_count,
            has_business_recipient: composition.has_business_recipient,
        }
    }
}

/// Fees owed for one renewal term, itemized by category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub renewal_period: RenewalPeriod,
    /// Months every monthly surcharge is charged for.
    pub period_months: u32,
    /// Months of service the term covers, including any bonus month.
    pub service_months: u32,
    pub base_rate: Decimal,
    pub business_fee: Decimal,
    pub additional_recipient_fees: Decimal,
    pub minor_fees: Decimal,
    pub total_monthly: Decimal,
    pub total_for_period: Decimal,
}

/// A minor whose 18th birthday falls inside a renewal window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MinorTransition {
    pub recipient_id: Uuid,
    pub recipient_name: String,
    pub turns_adult_date: NaiveDate,
    pub months_as_minor: u32,
    pub months_as_adult: u32,
    /// Adult position the recipient takes once they come of age.
    pub adult_slot: u32,
    pub additional_adult_fee: Decimal,
    /// Minor fee no longer charged for the adult months.
    pub minor_fee_removed: Decimal,
}

impl MinorTransition {
    /// Net change this transition applies to the baseline total.
    pub fn net_adjustment(&self) -> Decimal {
        self.additional_adult_fee - self.minor_fee_removed
    }

    /// True when the recipient lands beyond the slots the base rate covers.
    pub fn occupies_additional_slot(&self) -> bool {
        self.adult_slot > INCLUDED_ADULT_SLOTS
    }
}

/// A renewal quote that accounts for minors coming of age mid-term.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenewalPriceBreakdown {
    #[serde(flatten)]
    pub breakdown: PriceBreakdown,
    pub renewal_start: NaiveDate,
    /// Exclusive end of the coverage window.
    pub renewal_end: NaiveDate,
    pub composition: RecipientComposition,
    pub minor_transitions: Vec<MinorTransition>,
    /// Net of added adult-slot fees and removed minor fees; may be negative.
    pub transition_fees: Decimal,
    pub adjusted_total_for_period: Decimal,
}

impl RenewalPriceBreakdown {
    pub fn has_transitions(&self) -> bool {
        !self.minor_transitions.is_empty()
    }
}
