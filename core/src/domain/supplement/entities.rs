use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::supplement_facts::entities::FactSheet;

/// A supplement as known by the external knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CanonicalAgent {
    pub identifier: String,
    pub preferred_name: String,
    pub aliases: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SupplementInfo {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub typical_use: String,
    pub typical_dosage: String,
}

impl SupplementInfo {
    pub fn new(agent: CanonicalAgent, facts: FactSheet) -> Self {
        Self {
            name: agent.preferred_name,
            aliases: agent.aliases,
            description: agent.description,
            typical_use: facts.typical_use,
            typical_dosage: facts.typical_dosage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AlternativeSuggestion {
    pub alternative: Option<String>,
    pub reason: String,
}
