use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    currency::monthly_total,
    domain::{
        calendar, Displayable, FeeSchedule, MinorTransition, PriceInput, RateConfiguration,
        RecipientComposition, RecipientSnapshot, RenewalPeriod, RenewalPriceBreakdown,
    },
    errors::Result,
};

use super::{CompositionService, PricingService};

pub struct RenewalService;

impl RenewalService {
    /// Prices a renewal starting on `renewal_start`, splitting the fees of any
    /// minor who comes of age inside the coverage window.
    ///
    /// The baseline is priced from the composition on `renewal_start`. Each
    /// transitioning minor stops accruing the minor fee for the months they are
    /// an adult, and takes the next adult slot in order of coming of age; when
    /// that slot carries a surcharge it is added for the same months.
    pub fn calculate(
        rate: &RateConfiguration,
        renewal_period: RenewalPeriod,
        recipients: &[RecipientSnapshot],
        renewal_start: NaiveDate,
    ) -> Result<RenewalPriceBreakdown> {
        let composition = CompositionService::analyze(recipients, renewal_start);
        let input = PriceInput::from_composition(renewal_period, &composition);
        PricingService::validate_input(&input)?;

        let breakdown = PricingService::price(&rate.fees, &input);
        let renewal_end = renewal_period.service_end(renewal_start);
        let minor_transitions = Self::transitions(
            &rate.fees,
            recipients,
            &composition,
            renewal_period,
            renewal_start,
            renewal_end,
        );
        let transition_fees: Decimal = minor_transitions
            .iter()
            .map(MinorTransition::net_adjustment)
            .sum();
        let adjusted_total_for_period = breakdown.total_for_period + transition_fees;

        Ok(RenewalPriceBreakdown {
            breakdown,
            renewal_start,
            renewal_end,
            composition,
            minor_transitions,
            transition_fees,
            adjusted_total_for_period,
        })
    }

    fn transitions(
        fees: &FeeSchedule,
        recipients: &[RecipientSnapshot],
        composition: &RecipientComposition,
        renewal_period: RenewalPeriod,
        renewal_start: NaiveDate,
        renewal_end: NaiveDate,
    ) -> Vec<MinorTransition> {
        let period_months = renewal_period.pricing_months();

        let mut coming_of_age: Vec<(&RecipientSnapshot, NaiveDate)> = recipients
            .iter()
            .filter(|recipient| recipient.is_minor_on(renewal_start))
            .filter_map(|recipient| recipient.turns_adult_date().map(|date| (recipient, date)))
            .filter(|(_, turns_adult)| *turns_adult < renewal_end)
            .collect();
        // Stable: same-day transitions keep recipient order.
        coming_of_age.sort_by_key(|(_, turns_adult)| *turns_adult);

        let mut adult_count = composition.adult_count;
        coming_of_age
            .into_iter()
            .map(|(recipient, turns_adult_date)| {
                adult_count += 1;
                let months_as_minor =
                    calendar::whole_months_between(renewal_start, turns_adult_date)
                        .min(period_months);
                let months_as_adult = period_months - months_as_minor;
                let additional_adult_fee = fees
                    .additional_slot_fee(adult_count)
                    .map(|fee| monthly_total(fee, months_as_adult))
                    .unwrap_or(Decimal::ZERO);
                let minor_fee_removed = monthly_total(fees.minor_recipient_fee, months_as_adult);

                debug!(
                    recipient = %recipient.display_label(),
                    %turns_adult_date,
                    months_as_minor,
                    months_as_adult,
                    adult_slot = adult_count,
                    "minor comes of age during renewal"
                );

                MinorTransition {
                    recipient_id: recipient.id,
                    recipient_name: recipient.name.clone(),
                    turns_adult_date,
                    months_as_minor,
                    months_as_adult,
                    adult_slot: adult_count,
                    additional_adult_fee,
                    minor_fee_removed,
                }
            })
            .collect()
    }
}
