use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{common::generate_timestamp, interaction::value_objects::SupplementPair};

pub const BASELINE_MECHANISM: &str = "No known interaction in available research.";
pub const BASELINE_SIDE_EFFECTS: &str = "No known side effects.";
pub const DATA_NOT_FOUND: &str = "Data not found.";

/// Closed severity scale.
///
/// `NotSpecified` is what the heuristic yields when no keyword tier matches.
/// `Unknown` marks a classification that could not be derived (an unparsable
/// model reply) and is stored as an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Severity {
    #[serde(rename = "None")]
    None,
    Mild,
    Moderate,
    Severe,
    #[serde(rename = "Not specified")]
    NotSpecified,
    #[serde(rename = "")]
    Unknown,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
            Severity::NotSpecified => "Not specified",
            Severity::Unknown => "",
        }
    }

    /// Normalizes a free-text label into the closed scale.
    ///
    /// Exact labels are matched first. Otherwise the most severe level named
    /// in the text wins; anything else is `NotSpecified`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();

        match label.as_str() {
            "" => return Severity::Unknown,
            "none" | "no interaction" | "no known interaction" => return Severity::None,
            "mild" | "minor" => return Severity::Mild,
            "moderate" => return Severity::Moderate,
            "severe" | "major" => return Severity::Severe,
            _ => {}
        }

        if label.contains("severe") || label.contains("major") {
            Severity::Severe
        } else if label.contains("moderate") {
            Severity::Moderate
        } else if label.contains("mild") || label.contains("minor") {
            Severity::Mild
        } else if label.starts_with("none") || label.starts_with("no ") {
            Severity::None
        } else {
            Severity::NotSpecified
        }
    }
}

impl From<&str> for Severity {
    fn from(value: &str) -> Self {
        Severity::from_label(value)
    }
}

/// Which resolution path produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    /// Empty evidence placeholder. Always considered stale.
    Baseline,
    Heuristic,
    Model,
    /// Sentinel for pairs where a name could not be resolved. Never stored.
    NotFound,
}

impl RecordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordSource::Baseline => "baseline",
            RecordSource::Heuristic => "heuristic",
            RecordSource::Model => "model",
            RecordSource::NotFound => "not_found",
        }
    }
}

impl From<&str> for RecordSource {
    /// Unrecognized tags map to `Baseline` so the row gets refreshed.
    fn from(value: &str) -> Self {
        match value {
            "heuristic" => RecordSource::Heuristic,
            "model" => RecordSource::Model,
            "not_found" => RecordSource::NotFound,
            _ => RecordSource::Baseline,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Classification {
    pub severity: Severity,
    pub mechanism: String,
    pub side_effects: String,
    pub source: RecordSource,
}

impl Classification {
    pub fn baseline() -> Self {
        Self {
            severity: Severity::None,
            mechanism: BASELINE_MECHANISM.to_string(),
            side_effects: BASELINE_SIDE_EFFECTS.to_string(),
            source: RecordSource::Baseline,
        }
    }

    /// Result of a model reply that could not be decoded.
    pub fn unparsed() -> Self {
        Self {
            severity: Severity::Unknown,
            mechanism: String::new(),
            side_effects: String::new(),
            source: RecordSource::Model,
        }
    }
}

/// One evidence fragment as returned by the knowledge base.
///
/// Sources that annotate entities split a sentence into spans; the spans are
/// contiguous pieces of the sentence and must be concatenated back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceFragment {
    pub spans: Vec<String>,
}

impl EvidenceFragment {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            spans: vec![text.into()],
        }
    }

    pub fn from_spans(spans: Vec<String>) -> Self {
        Self { spans }
    }

    pub fn text(&self) -> String {
        self.spans.concat().trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvidence {
    Empty,
    Text(String),
}

impl RawEvidence {
    pub fn from_fragments(fragments: &[EvidenceFragment]) -> Self {
        let text = fragments
            .iter()
            .map(EvidenceFragment::text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if text.is_empty() {
            RawEvidence::Empty
        } else {
            RawEvidence::Text(text)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RawEvidence::Empty)
    }
}

/// A cached classification for one unordered pair of supplements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InteractionRecord {
    pub id: Uuid,
    pub supplement_a: String,
    pub supplement_b: String,
    pub severity: Severity,
    pub mechanism: String,
    pub side_effects: String,
    pub source: RecordSource,
    pub last_updated: DateTime<Utc>,
}

impl InteractionRecord {
    pub fn new(pair: &SupplementPair, classification: Classification) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            supplement_a: pair.first().to_string(),
            supplement_b: pair.second().to_string(),
            severity: classification.severity,
            mechanism: classification.mechanism,
            side_effects: classification.side_effects,
            source: classification.source,
            last_updated: now,
        }
    }

    /// Returned when either name of the pair has no canonical match.
    pub fn not_found(pair: &SupplementPair) -> Self {
        Self::new(
            pair,
            Classification {
                severity: Severity::Unknown,
                mechanism: DATA_NOT_FOUND.to_string(),
                side_effects: DATA_NOT_FOUND.to_string(),
                source: RecordSource::NotFound,
            },
        )
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.source, RecordSource::Baseline | RecordSource::NotFound)
            || self.severity == Severity::Unknown
    }

    pub fn is_fresh(&self, now: DateTime<Utc>, window: Duration) -> bool {
        now - self.last_updated < window && !self.is_degraded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: RecordSource, severity: Severity, age: Duration) -> InteractionRecord {
        let mut record = InteractionRecord::new(
            &SupplementPair::new("Creatine", "Caffeine"),
            Classification {
                severity,
                mechanism: "Opposing effects on muscle relaxation time.".to_string(),
                side_effects: "Gastrointestinal discomfort.".to_string(),
                source,
            },
        );
        record.last_updated = Utc::now() - age;
        record
    }

    #[test]
    fn test_record_within_window_is_fresh() {
        let r = record(RecordSource::Model, Severity::Mild, Duration::days(29));
        assert!(r.is_fresh(Utc::now(), Duration::days(30)));
    }

    #[test]
    fn test_record_outside_window_is_stale() {
        let r = record(RecordSource::Model, Severity::Mild, Duration::days(31));
        assert!(!r.is_fresh(Utc::now(), Duration::days(30)));
    }

    #[test]
    fn test_baseline_record_is_always_stale() {
        let r = record(RecordSource::Baseline, Severity::None, Duration::zero());
        assert!(r.is_degraded());
        assert!(!r.is_fresh(Utc::now(), Duration::days(30)));
    }

    #[test]
    fn test_unknown_severity_is_stale() {
        let r = record(RecordSource::Model, Severity::Unknown, Duration::zero());
        assert!(!r.is_fresh(Utc::now(), Duration::days(30)));
    }

    #[test]
    fn test_severity_from_label() {
        assert_eq!(Severity::from_label("Severe"), Severity::Severe);
        assert_eq!(Severity::from_label(" moderate "), Severity::Moderate);
        assert_eq!(Severity::from_label("Mild to moderate"), Severity::Moderate);
        assert_eq!(Severity::from_label("None"), Severity::None);
        assert_eq!(Severity::from_label(""), Severity::Unknown);
        assert_eq!(
            Severity::from_label("Not specified in available research"),
            Severity::NotSpecified
        );
    }

    #[test]
    fn test_severity_serializes_to_labels() {
        assert_eq!(serde_json::to_string(&Severity::None).unwrap(), "\"None\"");
        assert_eq!(
            serde_json::to_string(&Severity::NotSpecified).unwrap(),
            "\"Not specified\""
        );
        assert_eq!(serde_json::to_string(&Severity::Unknown).unwrap(), "\"\"");
    }

    #[test]
    fn test_fragments_join_spans_before_concatenation() {
        let fragments = vec![
            EvidenceFragment::from_spans(vec![
                "Concurrent ".to_string(),
                "caffeine".to_string(),
                " intake blunted the ergogenic effect of ".to_string(),
                "creatine".to_string(),
                ".".to_string(),
            ]),
            EvidenceFragment::from_text("  "),
            EvidenceFragment::from_text("No adverse events were reported."),
        ];

        assert_eq!(
            RawEvidence::from_fragments(&fragments),
            RawEvidence::Text(
                "Concurrent caffeine intake blunted the ergogenic effect of creatine. No adverse events were reported."
                    .to_string()
            )
        );
    }

    #[test]
    fn test_no_fragments_is_empty_evidence() {
        assert!(RawEvidence::from_fragments(&[]).is_empty());
    }
}
