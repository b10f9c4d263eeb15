//! Cent-precision money helpers and locale-aware currency formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

pub const CENT_SCALE: u32 = 2;

/// Rounds to whole cents, halves away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Multiplies a monthly amount by a month count, at cent precision.
pub fn monthly_total(monthly: Decimal, months: u32) -> Decimal {
    round_cents(monthly * Decimal::from(months))
}

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NegativeStyle {
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CurrencyDisplay {
    Symbol,
    Code,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormatOptions {
    pub currency_display: CurrencyDisplay,
    pub negative_style: NegativeStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            currency_display: CurrencyDisplay::Symbol,
            negative_style: NegativeStyle::Sign,
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "CAD" => "CA$".into(),
        "AUD" => "A$".into(),
        _ => code.into(),
    }
}

pub fn format_number(locale: &LocaleConfig, value: Decimal) -> String {
    let body = format!("{:.2}", round_cents(value));
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body.as_str(), "00"));
    let grouped = insert_grouping(int_part, locale.grouping_separator);
    format!("{}{}{}", grouped, locale.decimal_separator, frac_part)
}

fn insert_grouping(int_part: &str, separator: char) -> String {
    match int_part.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits, separator)),
        None => group_digits(int_part, separator),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

pub fn format_currency_value(
    amount: Decimal,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    let mut body = format_number(locale, amount.abs());
    if amount < Decimal::ZERO {
        body = match options.negative_style {
            NegativeStyle::Sign => format!("-{}", body),
            NegativeStyle::Parentheses => format!("({})", body),
        };
    }
    match options.currency_display {
        CurrencyDisplay::Symbol => {
            let symbol = symbol_for(code.as_str());
            match body.strip_prefix('-') {
                Some(rest) => format!("-{}{}", symbol, rest),
                None => format!("{}{}", symbol, body),
            }
        }
        CurrencyDisplay::Code => format!("{} {}", code.as_str(), body),
    }
}
