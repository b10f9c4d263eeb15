use chrono::NaiveDate;

use crate::domain::{RecipientComposition, RecipientKind, RecipientSnapshot};

pub struct CompositionService;

impl CompositionService {
    /// Classifies recipients into billable adults and minors as of `reference`.
    ///
    /// The first business recipient is covered by the flat business fee and is
    /// not counted; each further business recipient counts as an adult.
    pub fn analyze(recipients: &[RecipientSnapshot], reference: NaiveDate) -> RecipientComposition {
        let mut composition = RecipientComposition::default();
        for recipient in recipients {
            match recipient.kind {
                RecipientKind::Business => {
                    if composition.has_business_recipient {
                        composition.adult_count += 1;
                    } else {
                        composition.has_business_recipient = true;
                    }
                }
                RecipientKind::Person => {
                    if recipient.is_minor_on(reference) {
                        composition.minor_count += 1;
                    } else {
                        composition.adult_count += 1;
                    }
                }
            }
        }
        composition.total_count = composition.adult_count + composition.minor_count;
        composition
    }
}
