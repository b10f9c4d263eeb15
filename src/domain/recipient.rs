use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    calendar,
    common::{Displayable, Identifiable, NamedEntity},
};

/// Point-in-time view of a mailbox recipient as supplied by account management.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipientSnapshot {
    pub id: Uuid,
    pub name: String,
    pub kind: RecipientKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<NaiveDate>,
}

impl RecipientSnapshot {
    /// A person recipient. Without a birthdate the person is billed as an adult.
    pub fn person(name: impl Into<String>, birthdate: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind: RecipientKind::Person,
            birthdate,
        }
    }

    pub fn business(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind: RecipientKind::Business,
            birthdate: None,
        }
    }

    pub fn is_business(&self) -> bool {
        self.kind == RecipientKind::Business
    }

    /// True when this is a person under the age of majority on `on`.
    pub fn is_minor_on(&self, on: NaiveDate) -> bool {
        match (&self.kind, self.birthdate) {
            (RecipientKind::Person, Some(birthdate)) => calendar::is_minor_on(birthdate, on),
            _ => false,
        }
    }

    /// The date a person recipient comes of age, when a birthdate is known.
    pub fn turns_adult_date(&self) -> Option<NaiveDate> {
        match self.kind {
            RecipientKind::Person => self.birthdate.map(calendar::majority_date),
            RecipientKind::Business => None,
        }
    }
}

impl Identifiable for RecipientSnapshot {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for RecipientSnapshot {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for RecipientSnapshot {
    fn display_label(&self) -> String {
        format!("{} ({:?})", self.name, self.kind)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecipientKind {
    Person,
    Business,
}
