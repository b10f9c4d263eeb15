use chrono::NaiveDate;

use crate::{
    core::{
        rate_catalog::RateCatalog,
        services::{CompositionService, PricingService, RenewalService},
    },
    domain::{
        PriceBreakdown, PriceInput, RateConfiguration, RecipientComposition, RecipientSnapshot,
        RenewalPeriod, RenewalPriceBreakdown,
    },
    errors::Result,
};

/// Entry point for callers that need rates and quotes.
pub struct PricingEngine {
    catalog: RateCatalog,
}

impl PricingEngine {
    pub fn new(catalog: RateCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RateCatalog {
        &self.catalog
    }

    pub fn get_current_rates(&self) -> Result<RateConfiguration> {
        self.catalog.get_current()
    }

    pub fn get_rates_for_date(&self, date: NaiveDate) -> Result<RateConfiguration> {
        self.catalog.get_effective_at(date)
    }

    pub fn analyze_recipients(
        &self,
        recipients: &[RecipientSnapshot],
        reference_date: NaiveDate,
    ) -> RecipientComposition {
        CompositionService::analyze(recipients, reference_date)
    }

    pub fn calculate_price_breakdown(
        &self,
        rate: &RateConfiguration,
        input: &PriceInput,
    ) -> Result<PriceBreakdown> {
        PricingService::calculate(rate, input)
    }

    pub fn calculate_renewal_price_breakdown(
        &self,
        rate: &RateConfiguration,
        renewal_period: RenewalPeriod,
        recipients: &[RecipientSnapshot],
        renewal_start: NaiveDate,
    ) -> Result<RenewalPriceBreakdown> {
        RenewalService::calculate(rate, renewal_period, recipients, renewal_start)
    }

    /// Quotes a renewal at the rates that were live on `payment_date`, so a
    /// payment recorded for a past date is billed at that day's prices.
    pub fn quote_renewal_for_payment(
        &self,
        payment_date: NaiveDate,
        renewal_period: RenewalPeriod,
        recipients: &[RecipientSnapshot],
        renewal_start: NaiveDate,
    ) -> Result<RenewalPriceBreakdown> {
        let rate = self.get_rates_for_date(payment_date)?;
        self.calculate_renewal_price_breakdown(&rate, renewal_period, recipients, renewal_start)
    }
}
