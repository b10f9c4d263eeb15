mod common;

use common::{date, seeded_engine};
use mailbox_core::{
    billing::{key_deposit_item, line_items_total, render_line_items, FeeCategory},
    currency::{CurrencyCode, FormatOptions, LocaleConfig},
    domain::{RecipientSnapshot, RenewalPeriod},
};
use rust_decimal_macros::dec;

fn household() -> Vec<RecipientSnapshot> {
    vec![
        RecipientSnapshot::person("Adult A", Some(date(1980, 6, 1))),
        RecipientSnapshot::person("Adult B", Some(date(1982, 9, 12))),
        RecipientSnapshot::person("Adult C", Some(date(1999, 2, 3))),
        RecipientSnapshot::person("Teen", Some(date(2007, 3, 15))),
    ]
}

#[test]
fn renewal_line_items_sum_to_adjusted_total() {
    let engine = seeded_engine(date(2025, 1, 1));
    let rate = engine.get_current_rates().expect("current rates");
    let renewal = engine
        .calculate_renewal_price_breakdown(
            &rate,
            RenewalPeriod::ThreeMonth,
            &household(),
            date(2025, 1, 15),
        )
        .expect("renewal");

    let items = renewal.line_items();
    let categories: Vec<_> = items.iter().map(|item| item.category).collect();
    assert_eq!(
        categories,
        vec![
            FeeCategory::BaseRate,
            FeeCategory::MinorRecipients,
            FeeCategory::MinorTransition,
        ]
    );
    assert_eq!(line_items_total(&items), renewal.adjusted_total_for_period);
}

#[test]
fn key_deposit_is_a_separate_item() {
    let engine = seeded_engine(date(2025, 1, 1));
    let rate = engine.get_current_rates().expect("current rates");
    let deposit = key_deposit_item(&rate);
    assert_eq!(deposit.category, FeeCategory::KeyDeposit);
    assert_eq!(deposit.amount, dec!(10));
}

#[test]
fn renders_invoice_body() {
    let engine = seeded_engine(date(2025, 1, 1));
    let renewal = engine
        .quote_renewal_for_payment(
            date(2025, 1, 10),
            RenewalPeriod::ThreeMonth,
            &household(),
            date(2025, 1, 15),
        )
        .expect("renewal");

    let rendered = render_line_items(
        &renewal.line_items(),
        &CurrencyCode::default(),
        &LocaleConfig::default(),
        &FormatOptions::default(),
    );
    insta::assert_snapshot!(rendered, @r"
    Mailbox rental (3 months)                                 $51.00
    Minor recipients (3 months)                                $3.00
    Teen turns 18 on 2025-03-15 (1 mo adult)                   $1.00
    Total                                                     $55.00
    ");
}
