use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        common::{Displayable, Identifiable},
        renewal::RenewalPeriod,
    },
    errors::{PricingError, Result},
};

/// Adult recipients covered by the base rate.
pub const INCLUDED_ADULT_SLOTS: u32 = 3;
/// Highest recipient position a mailbox may be billed for.
pub const MAX_RECIPIENTS: u32 = 7;

/// Date range a rate configuration applies to. `end` is inclusive; an open
/// end marks the current configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EffectivePeriod {
    pub start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl EffectivePeriod {
    pub fn open(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    pub fn closed(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(PricingError::invalid(
                "end_date",
                format!("end {} precedes start {}", end, start),
            ));
        }
        Ok(Self {
            start,
            end: Some(end),
        })
    }

    pub fn is_current(&self) -> bool {
        self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && self.end.map_or(true, |end| end >= date)
    }

    pub fn overlaps(&self, other: &EffectivePeriod) -> bool {
        let self_before_other_ends = other.end.map_or(true, |end| self.start <= end);
        let other_before_self_ends = self.end.map_or(true, |end| other.start <= end);
        self_before_other_ends && other_before_self_ends
    }

    /// Ends this period on the day before `next_start`.
    pub fn close_before(&mut self, next_start: NaiveDate) -> Result<()> {
        let end = next_start - Duration::days(1);
        if end < self.start {
            return Err(PricingError::invalid(
                "start_date",
                format!(
                    "must be after {}, the start of the configuration it supersedes",
                    self.start
                ),
            ));
        }
        self.end = Some(end);
        Ok(())
    }
}

/// Monetary terms of a rate configuration. Recurring surcharges are monthly;
/// base rates are quoted per term.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeeSchedule {
    pub base_rate_three_month: Decimal,
    pub base_rate_six_month: Decimal,
    pub base_rate_twelve_month: Decimal,
    pub business_account_fee: Decimal,
    pub fourth_recipient_fee: Decimal,
    pub fifth_recipient_fee: Decimal,
    pub sixth_recipient_fee: Decimal,
    pub seventh_recipient_fee: Decimal,
    pub minor_recipient_fee: Decimal,
    pub key_deposit: Decimal,
}

impl FeeSchedule {
    pub fn base_rate(&self, period: RenewalPeriod) -> Decimal {
        match period {
            RenewalPeriod::ThreeMonth => self.base_rate_three_month,
            RenewalPeriod::SixMonth => self.base_rate_six_month,
            RenewalPeriod::TwelveMonth => self.base_rate_twelve_month,
        }
    }

    /// Monthly surcharge for an additional adult slot (4 through 7).
    pub fn additional_slot_fee(&self, slot: u32) -> Option<Decimal> {
        match slot {
            4 => Some(self.fourth_recipient_fee),
            5 => Some(self.fifth_recipient_fee),
            6 => Some(self.sixth_recipient_fee),
            7 => Some(self.seventh_recipient_fee),
            _ => None,
        }
    }

    /// Rejects negative fees, non-positive base rates and sub-cent amounts,
    /// naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let base_rates = [
            ("base_rate_three_month", self.base_rate_three_month),
            ("base_rate_six_month", self.base_rate_six_month),
            ("base_rate_twelve_month", self.base_rate_twelve_month),
        ];
        for (field, amount) in base_rates {
            ensure_cents(field, amount)?;
            if amount <= Decimal::ZERO {
                return Err(PricingError::invalid(field, "base rate must be positive"));
            }
        }
        let surcharges = [
            ("business_account_fee", self.business_account_fee),
            ("fourth_recipient_fee", self.fourth_recipient_fee),
            ("fifth_recipient_fee", self.fifth_recipient_fee),
            ("sixth_recipient_fee", self.sixth_recipient_fee),
            ("seventh_recipient_fee", self.seventh_recipient_fee),
            ("minor_recipient_fee", self.minor_recipient_fee),
            ("key_deposit", self.key_deposit),
        ];
        for (field, amount) in surcharges {
            ensure_cents(field, amount)?;
            if amount < Decimal::ZERO {
                return Err(PricingError::invalid(field, "amount must not be negative"));
            }
        }
        Ok(())
    }
}

fn ensure_cents(field: &'static str, amount: Decimal) -> Result<()> {
    if amount.normalize().scale() > 2 {
        return Err(PricingError::invalid(
            field,
            format!("{} is finer than one cent", amount),
        ));
    }
    Ok(())
}

/// Input for creating or amending a rate configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateDraft {
    pub start_date: NaiveDate,
    pub fees: FeeSchedule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RateDraft {
    pub fn new(start_date: NaiveDate, fees: FeeSchedule) -> Self {
        Self {
            start_date,
            fees,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Immutable snapshot of the fees in effect over an [`EffectivePeriod`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateConfiguration {
    pub id: Uuid,
    pub effective: EffectivePeriod,
    pub fees: FeeSchedule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RateConfiguration {
    /// Builds an open-ended configuration from a validated draft.
    pub fn from_draft(draft: RateDraft) -> Result<Self> {
        draft.fees.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            effective: EffectivePeriod::open(draft.start_date),
            fees: draft.fees,
            note: draft.note,
            created_at: Utc::now(),
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.effective.start
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.effective.end
    }

    pub fn is_current(&self) -> bool {
        self.effective.is_current()
    }

    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective.contains(date)
    }

    pub fn base_rate(&self, period: RenewalPeriod) -> Decimal {
        self.fees.base_rate(period)
    }
}

impl Identifiable for RateConfiguration {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for RateConfiguration {
    fn display_label(&self) -> String {
        match self.effective.end {
            Some(end) => format!("Rates {} to {}", self.effective.start, end),
            None => format!("Rates from {} (current)", self.effective.start),
        }
    }
}
