use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::normalize_name,
    interaction::entities::{InteractionRecord, RecordSource, Severity},
};

/// Cache identity of an unordered pair: normalized names, sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SupplementPair {
    first: String,
    second: String,
}

impl SupplementPair {
    pub fn new(a: &str, b: &str) -> Self {
        let (a, b) = (normalize_name(a), normalize_name(b));
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }
}

pub const PAIR_KEY_SEPARATOR: char = '-';

/// External address of the evidence for a pair of canonical identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvidencePairKey(String);

impl EvidencePairKey {
    pub fn new(id_a: &str, id_b: &str) -> Self {
        let (first, second) = if id_a <= id_b {
            (id_a, id_b)
        } else {
            (id_b, id_a)
        };
        Self(format!("{first}{PAIR_KEY_SEPARATOR}{second}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Caller-facing view of one pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PairInteraction {
    pub supplements: Vec<String>,
    pub severity: Severity,
    pub mechanism: String,
    pub side_effects: String,
    pub source: RecordSource,
}

impl PairInteraction {
    pub fn new(name_a: &str, name_b: &str, record: &InteractionRecord) -> Self {
        Self {
            supplements: vec![name_a.to_string(), name_b.to_string()],
            severity: record.severity,
            mechanism: record.mechanism.clone(),
            side_effects: record.side_effects.clone(),
            source: record.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplement_pair_is_order_independent() {
        let ab = SupplementPair::new("Creatine", " caffeine ");
        let ba = SupplementPair::new("CAFFEINE", "creatine");
        assert_eq!(ab, ba);
        assert_eq!(ab.first(), "caffeine");
        assert_eq!(ab.second(), "creatine");
    }

    #[test]
    fn test_supplement_pair_sorts_by_bytes() {
        let pair = SupplementPair::new("Açaí", "Ashwagandha");
        assert_eq!(pair.first(), "ashwagandha");
        assert_eq!(pair.second(), "açaí");
    }

    #[test]
    fn test_evidence_pair_key_sorts_identifiers() {
        let key = EvidencePairKey::new("C0010286", "C0006644");
        assert_eq!(key.as_str(), "C0006644-C0010286");
        assert_eq!(key, EvidencePairKey::new("C0006644", "C0010286"));
    }
}
