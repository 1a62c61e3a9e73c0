use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    interaction::{entities::Severity, value_objects::PairInteraction},
    supplement_facts::entities::FactSheet,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SupplementFacts {
    pub name: String,
    pub typical_use: String,
    pub typical_dosage: String,
}

impl SupplementFacts {
    pub fn new(name: &str, facts: FactSheet) -> Self {
        Self {
            name: name.to_string(),
            typical_use: facts.typical_use,
            typical_dosage: facts.typical_dosage,
        }
    }
}

/// Result of one stack check.
///
/// `interactions` covers every unordered pair of resolved names;
/// `unresolved` lists the names left out of pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StackCheckReport {
    pub interactions: Vec<PairInteraction>,
    pub supplements: Vec<SupplementFacts>,
    pub unresolved: Vec<String>,
    pub checked_at: DateTime<Utc>,
}

impl StackCheckReport {
    pub fn has_interactions(&self) -> bool {
        self.interactions
            .iter()
            .any(|i| !matches!(i.severity, Severity::None | Severity::Unknown))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecentStack {
    pub stack: Vec<String>,
    pub has_interactions: bool,
    pub checked_at: DateTime<Utc>,
}

impl From<&StackCheckReport> for RecentStack {
    fn from(report: &StackCheckReport) -> Self {
        Self {
            stack: report.supplements.iter().map(|s| s.name.clone()).collect(),
            has_interactions: report.has_interactions(),
            checked_at: report.checked_at,
        }
    }
}

/// Bounded, newest-first history of stack checks. Process-local and not
/// authoritative.
#[derive(Debug, Clone)]
pub struct RecentStacks {
    capacity: usize,
    entries: VecDeque<RecentStack>,
}

impl RecentStacks {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, stack: RecentStack) {
        self.entries.push_front(stack);
        self.entries.truncate(self.capacity);
    }

    pub fn list(&self) -> Vec<RecentStack> {
        self.entries.iter().cloned().collect()
    }
}
