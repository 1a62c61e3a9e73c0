use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::{generate_timestamp, generate_uuid_v7, normalize_name};

/// Typical use and dosage for one supplement. Empty strings mean unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FactSheet {
    pub typical_use: String,
    pub typical_dosage: String,
}

impl FactSheet {
    pub fn new(typical_use: impl Into<String>, typical_dosage: impl Into<String>) -> Self {
        Self {
            typical_use: typical_use.into(),
            typical_dosage: typical_dosage.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.typical_use.is_empty() && self.typical_dosage.is_empty()
    }

    /// Fills the fields that are still empty from `other`.
    pub fn or_fill(self, other: FactSheet) -> Self {
        Self {
            typical_use: if self.typical_use.is_empty() {
                other.typical_use
            } else {
                self.typical_use
            },
            typical_dosage: if self.typical_dosage.is_empty() {
                other.typical_dosage
            } else {
                self.typical_dosage
            },
        }
    }
}

/// Row of the known-facts table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementFact {
    pub id: Uuid,
    pub name: String,
    pub aliases: Vec<String>,
    pub typical_use: String,
    pub typical_dosage: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SupplementFact {
    pub fn new(name: &str, facts: FactSheet, source: impl Into<String>) -> Self {
        let (now, _) = generate_timestamp();

        Self {
            id: generate_uuid_v7(),
            name: normalize_name(name),
            aliases: Vec::new(),
            typical_use: facts.typical_use,
            typical_dosage: facts.typical_dosage,
            source: source.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<SupplementFact> for FactSheet {
    fn from(fact: SupplementFact) -> Self {
        Self {
            typical_use: fact.typical_use,
            typical_dosage: fact.typical_dosage,
        }
    }
}

/// Raw prose scraped from one reference page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedSection {
    pub source: String,
    pub uses_text: String,
    pub dosing_text: String,
}

impl ScrapedSection {
    pub fn is_empty(&self) -> bool {
        self.uses_text.trim().is_empty() && self.dosing_text.trim().is_empty()
    }
}
