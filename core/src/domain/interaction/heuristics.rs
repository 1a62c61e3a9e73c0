//! Keyword-tier classification of interaction evidence. No I/O.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    common::text::{split_sentences, truncate_chars},
    interaction::entities::Severity,
};

pub const NOT_SPECIFIED_DETAIL: &str = "Not specified in available research.";

const MAX_MECHANISM_CHARS: usize = 400;
const MAX_SIDE_EFFECT_SENTENCES: usize = 2;

static SEVERE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(severe|serious|contraindicat\w*|fatal|death|deaths|life[- ]threatening|anaphyla\w*|dangerous|toxic\w*|do not combine|hospitali[sz]\w*|arrhythmi\w*|seizures?)\b",
    )
    .expect("valid severe tier regex")
});

static MODERATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(caution\w*|monitor\w*|risks?|risky|interact\w*|inhibit\w*|potentiat\w*|adverse|increase[sd]?|decrease[sd]?|reduce[sd]?|blunt\w*|attenuat\w*)\b",
    )
    .expect("valid moderate tier regex")
});

static MILD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(mild|minor|well[- ]tolerated|low risk|minimal|negligible|slight\w*|safe)\b",
    )
    .expect("valid mild tier regex")
});

static MECHANISM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(absorption|metaboli\w*|enzymes?|cyp\w*|inhibit\w*|induc\w*|receptors?|clearance|bioavailability|excretion|synergi\w*|antagoni\w*|potentiat\w*|uptake|transport\w*|pathways?|blunt\w*|attenuat\w*)\b",
    )
    .expect("valid mechanism regex")
});

static SIDE_EFFECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(side effects?|adverse|nausea|vomiting|headaches?|dizziness|insomnia|jitter\w*|palpitations?|tachycardia|diarrh\w*|cramp\w*|anxiety|bleeding|hypertension|hypotension|rash\w*|gastrointestinal|toxicity|dehydration)\b",
    )
    .expect("valid side effect regex")
});

/// Severity from keyword tiers, most severe tier first.
pub fn classify_severity(text: &str) -> Severity {
    if SEVERE_RE.is_match(text) {
        Severity::Severe
    } else if MODERATE_RE.is_match(text) {
        Severity::Moderate
    } else if MILD_RE.is_match(text) {
        Severity::Mild
    } else {
        Severity::NotSpecified
    }
}

/// First sentence naming a mechanism term, else the first sentence.
pub fn extract_mechanism(text: &str) -> String {
    let sentences = split_sentences(text);

    sentences
        .iter()
        .find(|s| MECHANISM_RE.is_match(s))
        .or_else(|| sentences.first())
        .map(|s| truncate_chars(s, MAX_MECHANISM_CHARS))
        .unwrap_or_else(|| NOT_SPECIFIED_DETAIL.to_string())
}

pub fn extract_side_effects(text: &str) -> String {
    let sentences: Vec<String> = split_sentences(text)
        .into_iter()
        .filter(|s| SIDE_EFFECT_RE.is_match(s))
        .take(MAX_SIDE_EFFECT_SENTENCES)
        .collect();

    if sentences.is_empty() {
        NOT_SPECIFIED_DETAIL.to_string()
    } else {
        sentences.join(" ")
    }
}
