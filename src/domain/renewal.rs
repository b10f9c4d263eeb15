use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    domain::calendar,
    errors::{PricingError, Result},
};

/// Bonus service months granted on the annual term.
const ANNUAL_BONUS_MONTHS: u32 = 1;

/// Supported billing terms for a mailbox renewal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenewalPeriod {
    ThreeMonth,
    SixMonth,
    TwelveMonth,
}

impl RenewalPeriod {
    pub const ALL: [RenewalPeriod; 3] = [
        RenewalPeriod::ThreeMonth,
        RenewalPeriod::SixMonth,
        RenewalPeriod::TwelveMonth,
    ];

    /// Number of months every monthly fee is multiplied by.
    pub fn pricing_months(self) -> u32 {
        match self {
            RenewalPeriod::ThreeMonth => 3,
            RenewalPeriod::SixMonth => 6,
            RenewalPeriod::TwelveMonth => 12,
        }
    }

    /// Length of the coverage window; the annual term includes a bonus month
    /// that is never charged.
    pub fn service_months(self) -> u32 {
        match self {
            RenewalPeriod::TwelveMonth => self.pricing_months() + ANNUAL_BONUS_MONTHS,
            other => other.pricing_months(),
        }
    }

    /// Exclusive end of the coverage window starting on `start`.
    pub fn service_end(self, start: NaiveDate) -> NaiveDate {
        calendar::shift_month(start, self.service_months() as i32)
    }

    pub fn label(self) -> &'static str {
        match self {
            RenewalPeriod::ThreeMonth => "3 months",
            RenewalPeriod::SixMonth => "6 months",
            RenewalPeriod::TwelveMonth => "12 months",
        }
    }
}

impl fmt::Display for RenewalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RenewalPeriod {
    type Err = PricingError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "3" | "THREE_MONTH" => Ok(RenewalPeriod::ThreeMonth),
            "6" | "SIX_MONTH" => Ok(RenewalPeriod::SixMonth),
            "12" | "TWELVE_MONTH" => Ok(RenewalPeriod::TwelveMonth),
            other => Err(PricingError::invalid(
                "renewal_period",
                format!("unsupported renewal period `{}`", other),
            )),
        }
    }
}
