use rust_decimal::Decimal;

use crate::{
    currency::{monthly_total, round_cents},
    domain::{
        FeeSchedule, PriceBreakdown, PriceInput, RateConfiguration, INCLUDED_ADULT_SLOTS,
        MAX_RECIPIENTS,
    },
    errors::{PricingError, Result},
};

pub struct PricingService;

impl PricingService {
    /// Validates `input` and prices one renewal term against `rate`.
    pub fn calculate(rate: &RateConfiguration, input: &PriceInput) -> Result<PriceBreakdown> {
        Self::validate_input(input)?;
        Ok(Self::price(&rate.fees, input))
    }

    /// Rejects recipient counts beyond the policy cap.
    pub fn validate_input(input: &PriceInput) -> Result<()> {
        if input.adult_recipient_count > MAX_RECIPIENTS {
            return Err(PricingError::invalid(
                "adult_recipient_count",
                format!(
                    "{} adults exceeds the limit of {}",
                    input.adult_recipient_count, MAX_RECIPIENTS
                ),
            ));
        }
        let total = input.adult_recipient_count + input.minor_recipient_count;
        if total > MAX_RECIPIENTS {
            return Err(PricingError::invalid(
                "minor_recipient_count",
                format!(
                    "{} recipients in total exceeds the limit of {}",
                    total, MAX_RECIPIENTS
                ),
            ));
        }
        Ok(())
    }

    /// Monthly surcharges for adult slots beyond the included ones.
    pub fn additional_slot_monthly(fees: &FeeSchedule, adult_count: u32) -> Decimal {
        let last_slot = adult_count.min(MAX_RECIPIENTS);
        (INCLUDED_ADULT_SLOTS + 1..=last_slot)
            .filter_map(|slot| fees.additional_slot_fee(slot))
            .sum()
    }

    pub(crate) fn price(fees: &FeeSchedule, input: &PriceInput) -> PriceBreakdown {
        let period = input.renewal_period;
        let months = period.pricing_months();

        let base_rate = fees.base_rate(period);
        let business_fee = if input.has_business_recipient {
            monthly_total(fees.business_account_fee, months)
        } else {
            Decimal::ZERO
        };
        let additional_recipient_fees = monthly_total(
            Self::additional_slot_monthly(fees, input.adult_recipient_count),
            months,
        );
        let minor_fees = monthly_total(
            fees.minor_recipient_fee * Decimal::from(input.minor_recipient_count),
            months,
        );

        let total_for_period = base_rate + business_fee + additional_recipient_fees + minor_fees;
        let total_monthly = round_cents(total_for_period / Decimal::from(months));

        PriceBreakdown {
            renewal_period: period,
            period_months: months,
            service_months: period.service_months(),
            base_rate,
            business_fee,
            additional_recipient_fees,
            minor_fees,
            total_monthly,
            total_for_period,
        }
    }
}
