//! Pattern grammar that mines "typical use" and "typical dosage" sentences
//! out of scraped reference prose.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    common::{
        normalize_name,
        text::{collapse_whitespace, split_sentences, truncate_chars},
    },
    supplement_facts::entities::{FactSheet, ScrapedSection},
};

const MAX_FACT_CHARS: usize = 300;

/// Supplements whose dosing is reported as a loading phase plus a
/// maintenance phase.
const PHASED_DOSING_SUPPLEMENTS: &[&str] = &["creatine"];

const DOSE_UNITS: &str = r"(?:mg|mcg|µg|g|grams?|milligrams?|micrograms?|iu|ml)";
const NUMBER_RANGE: &str = r"\d+(?:\.\d+)?(?:\s*(?:-|–|to)\s*\d+(?:\.\d+)?)?";

static REFERENCE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\[\s*\d+(?:\s*[-,–]\s*\d+)*\s*\]").expect("valid reference marker regex")
});

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+\d{1,2},\s*\d{4}\b|\b\d{1,2}/\d{1,2}/\d{2,4}\b",
    )
    .expect("valid date regex")
});

static BOILERPLATE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:overview|uses(?:\s*(?:&|and)\s*effectiveness)?|dosing|side effects|precautions|interactions|references|sources|(?:last\s+(?:reviewed|updated)|(?:medically\s+)?reviewed\s+by|written\s+by)\b.*)\s*:?\s*$",
    )
    .expect("valid boilerplate regex")
});

static USE_VERB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:used\s+(?:to|for|as|in|by)|supports?|helps?|improves?|enhances?|promotes?|boosts?|aids?|increases?|reduces?|treats?|prevents?|may\s+(?:help|improve|support|reduce|increase))\b",
    )
    .expect("valid use verb regex")
});

static USE_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:muscles?|muscular|performance|recovery|endurance|strength|stamina|energy|focus|alertness|sleep|immun\w*|fatigue|exercise|athletic|cognit\w*|bones?|heart|joints?|hydration)\b",
    )
    .expect("valid use keyword regex")
});

static DOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b{NUMBER_RANGE}\s*{DOSE_UNITS}\b")).expect("valid dose regex")
});

static STUDY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:study|studies|trials?|researchers?|participants|subjects|placebo|meta-analys[ie]s|randomi[sz]ed|et al|journal|cohort)\b",
    )
    .expect("valid study marker regex")
});

static DOSING_CONTEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\bper\s+(?:kg|kilogram|pound|lb|day|dose|serving)\b|/\s*(?:kg|day)\b|\bdaily\b|\b(?:a|each)\s+day\b|\bbody\s*weight\b|\bpre-?workout\b|\bpost-?workout\b|\b(?:before|after)\s+(?:exercise|training|workouts?)\b|\bloading\b|\bmaintenance\b)",
    )
    .expect("valid dosing context regex")
});

static DOSE_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b{NUMBER_RANGE}\s*{DOSE_UNITS}\b(?:\s*(?:/|per)\s*(?:kg|kilogram|lb|pound|day|dose)\b)*(?:\s+(?:of\s+body\s*weight|daily|a\s+day|per\s+day|each\s+day))?(?:\s+for\s+\d+(?:\s*(?:-|–|to)\s*\d+)?\s*(?:days?|weeks?))?"
    ))
    .expect("valid dose phrase regex")
});

static CLAUSE_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(?:[;,]|\bthen\b|\bfollowed\s+by\b)\s*").expect("valid clause regex")
});

static LOADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bload(?:ing)?\b").expect("valid loading regex"));

static MAINTENANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bmaint(?:ain|enance)\w*\b").expect("valid maintenance regex")
});

#[derive(Clone, Copy)]
enum DosingPhase {
    Loading,
    Maintenance,
}

/// Strips reference markers, dates and section headers.
pub fn clean_text(text: &str) -> String {
    text.lines()
        .filter(|line| !BOILERPLATE_LINE_RE.is_match(line))
        .map(|line| REFERENCE_MARKER_RE.replace_all(line, ""))
        .map(|line| collapse_whitespace(&DATE_RE.replace_all(&line, "")))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// A use statement names an action or a domain keyword and carries no
/// dosage and no study marker.
fn is_use_statement(sentence: &str) -> bool {
    (USE_VERB_RE.is_match(sentence) || USE_KEYWORD_RE.is_match(sentence))
        && !DOSE_RE.is_match(sentence)
        && !STUDY_RE.is_match(sentence)
}

fn is_dosage_statement(sentence: &str) -> bool {
    DOSE_RE.is_match(sentence) && DOSING_CONTEXT_RE.is_match(sentence)
}

/// First qualifying use sentence.
pub fn extract_use(text: &str) -> Option<String> {
    split_sentences(&clean_text(text))
        .into_iter()
        .find(|sentence| is_use_statement(sentence))
        .map(|sentence| truncate_chars(&sentence, MAX_FACT_CHARS))
}

/// Dosage for `name`: the phased form for loading/maintenance supplements
/// when both phases are present, otherwise the first anchored dose sentence.
pub fn extract_dosage(name: &str, text: &str) -> Option<String> {
    let cleaned = clean_text(text);

    if uses_phased_dosing(name)
        && let Some(phased) = extract_phased_dosage(&cleaned)
    {
        return Some(phased);
    }

    split_sentences(&cleaned)
        .into_iter()
        .find(|sentence| is_dosage_statement(sentence))
        .map(|sentence| truncate_chars(&sentence, MAX_FACT_CHARS))
}

fn uses_phased_dosing(name: &str) -> bool {
    let name = normalize_name(name);
    PHASED_DOSING_SUPPLEMENTS
        .iter()
        .any(|supplement| name.contains(supplement))
}

/// "Loading phase: ..; Maintenance phase: .." when both phases carry a dose.
///
/// A phase word without a dose applies to the next clause of the same
/// sentence ("For maintenance, take 2 g per day").
pub fn extract_phased_dosage(text: &str) -> Option<String> {
    let mut loading: Option<String> = None;
    let mut maintenance: Option<String> = None;

    for sentence in split_sentences(text) {
        let mut phase = None;

        for clause in CLAUSE_SPLIT_RE.split(&sentence) {
            if LOADING_RE.is_match(clause) {
                phase = Some(DosingPhase::Loading);
            } else if MAINTENANCE_RE.is_match(clause) {
                phase = Some(DosingPhase::Maintenance);
            }

            let (Some(current), Some(dose)) = (phase, DOSE_PHRASE_RE.find(clause)) else {
                continue;
            };

            let slot = match current {
                DosingPhase::Loading => &mut loading,
                DosingPhase::Maintenance => &mut maintenance,
            };
            slot.get_or_insert_with(|| dose.as_str().trim().to_string());
            phase = None;
        }
    }

    match (loading, maintenance) {
        (Some(loading), Some(maintenance)) => Some(format!(
            "Loading phase: {loading}; Maintenance phase: {maintenance}"
        )),
        _ => None,
    }
}

/// Runs both passes over every section. Fields nothing qualified for are
/// left empty.
pub fn extract_fact_sheet(name: &str, sections: &[ScrapedSection]) -> FactSheet {
    let typical_use = sections
        .iter()
        .find_map(|section| extract_use(&section.uses_text))
        .or_else(|| {
            sections
                .iter()
                .find_map(|section| extract_use(&section.dosing_text))
        })
        .unwrap_or_default();

    let typical_dosage = sections
        .iter()
        .find_map(|section| extract_dosage(name, &section.dosing_text))
        .or_else(|| {
            sections
                .iter()
                .find_map(|section| extract_dosage(name, &section.uses_text))
        })
        .unwrap_or_default();

    FactSheet {
        typical_use,
        typical_dosage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_strips_headers_dates_and_markers() {
        let raw = "Uses\nLast reviewed on March 3, 2023\nZinc supports immune function [4]. Updated 01/02/2024 by staff.";
        let cleaned = clean_text(raw);

        assert_eq!(cleaned, "Zinc supports immune function. Updated by staff.");
    }

    #[test]
    fn test_use_skips_dosage_and_study_sentences() {
        let text = "Uses\nCreatine supports muscle growth at 5g per day. In a 2019 study, participants gained strength. Creatine is used to improve high-intensity exercise performance [3].";

        assert_eq!(
            extract_use(text).as_deref(),
            Some("Creatine is used to improve high-intensity exercise performance.")
        );
    }

    #[test]
    fn test_use_accepts_keyword_only_sentence() {
        let text = "Beta-alanine is an amino acid. It is popular among athletes for endurance.";

        assert_eq!(
            extract_use(text).as_deref(),
            Some("It is popular among athletes for endurance.")
        );
    }

    #[test]
    fn test_use_returns_none_when_nothing_qualifies() {
        assert_eq!(extract_use("Zinc is a mineral. Take 8 mg per day."), None);
    }

    #[test]
    fn test_dosage_requires_dosing_context() {
        let text = "Capsules contain 500 mg. For adults, 200 mg daily before exercise has been used.";

        assert_eq!(
            extract_dosage("caffeine", text).as_deref(),
            Some("For adults, 200 mg daily before exercise has been used.")
        );
    }

    #[test]
    fn test_creatine_loading_and_maintenance_are_joined() {
        let text = "Creatine has been used safely. Typically 20 grams per day for 5-7 days is used as a loading dose, followed by 3-5 g per day for maintenance.";

        assert_eq!(
            extract_dosage("Creatine Monohydrate", text).as_deref(),
            Some("Loading phase: 20 grams per day for 5-7 days; Maintenance phase: 3-5 g per day")
        );
    }

    #[test]
    fn test_phases_are_reported_loading_first() {
        let text = "For maintenance, take 2 g per day. Start with a loading phase of 0.3 g/kg per day for 5 days.";

        assert_eq!(
            extract_phased_dosage(text).as_deref(),
            Some("Loading phase: 0.3 g/kg per day for 5 days; Maintenance phase: 2 g per day")
        );
    }

    #[test]
    fn test_compound_per_units_are_kept_whole() {
        let text = "Load with 0.3 g/kg/day for 5 days. For maintenance, take 0.03 g/kg/day.";

        assert_eq!(
            extract_phased_dosage(text).as_deref(),
            Some("Loading phase: 0.3 g/kg/day for 5 days; Maintenance phase: 0.03 g/kg/day")
        );
    }

    #[test]
    fn test_single_phase_falls_back_to_sentence() {
        let text = "Creatine loading uses 20 g per day for 5 days.";

        assert_eq!(
            extract_dosage("creatine", text).as_deref(),
            Some("Creatine loading uses 20 g per day for 5 days.")
        );
    }

    #[test]
    fn test_fact_sheet_reads_both_sections() {
        let sections = vec![
            ScrapedSection {
                source: "webmd".to_string(),
                uses_text: String::new(),
                dosing_text: String::new(),
            },
            ScrapedSection {
                source: "wikipedia".to_string(),
                uses_text: "Magnesium helps muscle and nerve function.".to_string(),
                dosing_text: "Adults take 300 mg per day.".to_string(),
            },
        ];

        let sheet = extract_fact_sheet("magnesium", &sections);

        assert_eq!(sheet.typical_use, "Magnesium helps muscle and nerve function.");
        assert_eq!(sheet.typical_dosage, "Adults take 300 mg per day.");
    }
}
