//! Turns price breakdowns into invoice line items for the billing layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    currency::{format_currency_value, CurrencyCode, FormatOptions, LocaleConfig},
    domain::{PriceBreakdown, RateConfiguration, RenewalPriceBreakdown},
};

const DESCRIPTION_WIDTH: usize = 52;
const AMOUNT_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FeeCategory {
    BaseRate,
    BusinessFee,
    AdditionalRecipients,
    MinorRecipients,
    MinorTransition,
    KeyDeposit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    pub category: FeeCategory,
    pub description: String,
    pub amount: Decimal,
}

impl LineItem {
    fn new(category: FeeCategory, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            category,
            description: description.into(),
            amount,
        }
    }
}

impl PriceBreakdown {
    /// Base rate first, then each surcharge that is actually owed.
    pub fn line_items(&self) -> Vec<LineItem> {
        let term = self.renewal_period.label();
        let mut items = vec![LineItem::new(
            FeeCategory::BaseRate,
            format!("Mailbox rental ({})", term),
            self.base_rate,
        )];
        let surcharges = [
            (FeeCategory::BusinessFee, "Business account fee", self.business_fee),
            (
                FeeCategory::AdditionalRecipients,
                "Additional recipients",
                self.additional_recipient_fees,
            ),
            (FeeCategory::MinorRecipients, "Minor recipients", self.minor_fees),
        ];
        for (category, label, amount) in surcharges {
            if !amount.is_zero() {
                items.push(LineItem::new(category, format!("{} ({})", label, term), amount));
            }
        }
        items
    }
}

impl RenewalPriceBreakdown {
    /// Baseline items followed by one adjustment per minor coming of age.
    pub fn line_items(&self) -> Vec<LineItem> {
        let mut items = self.breakdown.line_items();
        for transition in &self.minor_transitions {
            items.push(LineItem::new(
                FeeCategory::MinorTransition,
                format!(
                    "{} turns 18 on {} ({} mo adult)",
                    transition.recipient_name,
                    transition.turns_adult_date,
                    transition.months_as_adult
                ),
                transition.net_adjustment(),
            ));
        }
        items
    }
}

/// Refundable key deposit charged when a mailbox is first rented.
pub fn key_deposit_item(rate: &RateConfiguration) -> LineItem {
    LineItem::new(FeeCategory::KeyDeposit, "Key deposit", rate.fees.key_deposit)
}

pub fn line_items_total(items: &[LineItem]) -> Decimal {
    items.iter().map(|item| item.amount).sum()
}

/// Plain-text invoice body with a closing total line.
pub fn render_line_items(
    items: &[LineItem],
    code: &CurrencyCode,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    let mut lines: Vec<String> = items
        .iter()
        .map(|item| {
            render_row(
                &item.description,
                &format_currency_value(item.amount, code, locale, options),
            )
        })
        .collect();
    lines.push(render_row(
        "Total",
        &format_currency_value(line_items_total(items), code, locale, options),
    ));
    lines.join("\n")
}

fn render_row(description: &str, amount: &str) -> String {
    format!(
        "{:<desc$}{:>amt$}",
        description,
        amount,
        desc = DESCRIPTION_WIDTH,
        amt = AMOUNT_WIDTH
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RenewalPeriod;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_surcharges_are_omitted() {
        let breakdown = PriceBreakdown {
            renewal_period: RenewalPeriod::ThreeMonth,
            period_months: 3,
            service_months: 3,
            base_rate: dec!(51),
            business_fee: Decimal::ZERO,
            additional_recipient_fees: dec!(12),
            minor_fees: Decimal::ZERO,
            total_monthly: dec!(21),
            total_for_period: dec!(63),
        };
        let items = breakdown.line_items();
        let categories: Vec<_> = items.iter().map(|item| item.category).collect();
        assert_eq!(
            categories,
            vec![FeeCategory::BaseRate, FeeCategory::AdditionalRecipients]
        );
        assert_eq!(line_items_total(&items), breakdown.total_for_period);
    }
}
