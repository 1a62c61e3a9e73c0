use crate::domain::{common::normalize_name, supplement_facts::entities::FactSheet};

struct CanonicalFacts {
    patterns: &'static [&'static str],
    typical_use: &'static str,
    typical_dosage: &'static str,
}

// Checked in order; the first entry with a pattern contained in the name wins.
const CANONICAL_FACTS: &[CanonicalFacts] = &[
    CanonicalFacts {
        patterns: &["protein", "whey", "casein"],
        typical_use: "Supports muscle recovery and growth after exercise.",
        typical_dosage: "20-40 g per serving, 1-2 servings per day",
    },
    CanonicalFacts {
        patterns: &["creatine"],
        typical_use: "Improves strength, power and high-intensity exercise performance.",
        typical_dosage: "Loading phase: 20 g per day for 5-7 days; Maintenance phase: 3-5 g per day",
    },
    CanonicalFacts {
        patterns: &["caffeine"],
        typical_use: "Increases alertness and endurance performance.",
        typical_dosage: "3-6 mg/kg bodyweight 30-60 minutes pre-workout",
    },
    CanonicalFacts {
        patterns: &["beta-alanine", "beta alanine"],
        typical_use: "Buffers muscle acidity to improve high-intensity endurance.",
        typical_dosage: "3.2-6.4 g per day in divided doses",
    },
    CanonicalFacts {
        patterns: &["bcaa", "branched-chain", "branched chain"],
        typical_use: "Supports muscle protein synthesis and reduces exercise soreness.",
        typical_dosage: "5-10 g before or after training",
    },
    CanonicalFacts {
        patterns: &["magnesium"],
        typical_use: "Supports muscle and nerve function and sleep quality.",
        typical_dosage: "200-400 mg per day",
    },
    CanonicalFacts {
        patterns: &["vitamin d"],
        typical_use: "Supports bone health and immune function.",
        typical_dosage: "1,000-4,000 IU per day",
    },
    CanonicalFacts {
        patterns: &["zinc"],
        typical_use: "Supports immune function and wound healing.",
        typical_dosage: "8-11 mg per day",
    },
    CanonicalFacts {
        patterns: &["omega-3", "omega 3", "fish oil"],
        typical_use: "Supports heart health and helps reduce inflammation.",
        typical_dosage: "1-3 g combined EPA and DHA per day",
    },
    CanonicalFacts {
        patterns: &["theanine"],
        typical_use: "Promotes calm focus and smooths the effects of caffeine.",
        typical_dosage: "100-200 mg per day",
    },
    CanonicalFacts {
        patterns: &["glutamine"],
        typical_use: "Supports gut health and recovery after intense training.",
        typical_dosage: "5-10 g per day",
    },
];

/// Canonical facts for well-known supplement families. Empty when the name
/// matches no entry.
pub fn canonical_facts(name: &str) -> FactSheet {
    let name = normalize_name(name);

    CANONICAL_FACTS
        .iter()
        .find(|entry| entry.patterns.iter().any(|pattern| name.contains(pattern)))
        .map(|entry| FactSheet::new(entry.typical_use, entry.typical_dosage))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protein_family_defaults_to_recovery() {
        let facts = canonical_facts("Whey Isolate");
        assert_eq!(
            facts.typical_use,
            "Supports muscle recovery and growth after exercise."
        );
    }

    #[test]
    fn test_vitamin_d3_matches_vitamin_d() {
        assert_eq!(canonical_facts("Vitamin D3").typical_dosage, "1,000-4,000 IU per day");
    }

    #[test]
    fn test_unknown_name_is_empty() {
        assert!(canonical_facts("Ashwagandha").is_empty());
    }
}
