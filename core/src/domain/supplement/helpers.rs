use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{common::normalize_name, supplement::entities::AlternativeSuggestion};

static STACK_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n\r,;\t]+").expect("valid stack separator regex"));

const ALTERNATIVES: &[(&str, &str, &str)] = &[
    (
        "caffeine",
        "L-theanine",
        "L-theanine provides calm focus and can be combined with lower caffeine for fewer jitters.",
    ),
    (
        "glutamine",
        "BCAAs",
        "BCAAs support muscle recovery and may be safer for some users.",
    ),
];

const RELATED_PRODUCTS: &[(&str, &[&str])] = &[
    (
        "Creatine",
        &["Creatine Monohydrate", "Creatine HCL", "Creatine + Beta-Alanine"],
    ),
    (
        "Whey Protein",
        &["Casein Protein", "Plant Protein", "Whey Isolate"],
    ),
    (
        "Whey Protein Isolate",
        &["Whey Isolate", "Casein Protein", "Plant Protein"],
    ),
    ("Caffeine", &["L-Theanine", "Green Tea Extract", "Guarana"]),
    ("Vitamin D", &["Vitamin D3", "Vitamin K2", "Calcium + D3"]),
    ("Magnesium", &["Magnesium Glycinate", "Zinc", "Calcium"]),
    ("Zinc", &["Magnesium", "Vitamin C", "Copper"]),
    ("Vitamin C", &["Zinc", "Vitamin D", "Elderberry"]),
];

/// Splits pasted text into supplement names.
pub fn parse_stack_text(text: &str) -> Vec<String> {
    STACK_SEPARATOR_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trims names, drops empties and keeps the first spelling of each
/// normalized name.
pub fn dedupe_names(names: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();

    names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(normalize_name(name)))
        .collect()
}

pub fn find_alternative(name: &str) -> AlternativeSuggestion {
    let normalized = normalize_name(name);

    ALTERNATIVES
        .iter()
        .find(|(key, _, _)| *key == normalized)
        .map(|(_, alternative, reason)| AlternativeSuggestion {
            alternative: Some(alternative.to_string()),
            reason: reason.to_string(),
        })
        .unwrap_or_else(|| AlternativeSuggestion {
            alternative: None,
            reason: "No alternative available.".to_string(),
        })
}

/// "whey protein  isolate" -> "Whey Protein": title case, single spaces and
/// no trailing "Isolate".
fn related_products_key(name: &str) -> String {
    let title_case = name
        .split_whitespace()
        .map(|word| {
            let word = word.to_lowercase();
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    title_case
        .strip_suffix(" Isolate")
        .unwrap_or(&title_case)
        .to_string()
}

fn related_products_for(key: &str) -> Option<Vec<String>> {
    RELATED_PRODUCTS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, related)| related.iter().map(|p| p.to_string()).collect())
}

/// Related products from the static table: exact name, then the
/// title-cased name, then the first table entry containing the first word.
/// Unknown names get "Plus", "Max" and "Advanced" variants of themselves.
pub fn find_related_products(name: &str) -> Vec<String> {
    let name = name.trim();

    if let Some(related) = related_products_for(name) {
        return related;
    }

    let key = related_products_key(name);
    if let Some(related) = related_products_for(&key) {
        return related;
    }

    if let Some(base) = key.split(' ').next().filter(|base| !base.is_empty()) {
        let base = base.to_lowercase();
        if let Some((_, related)) = RELATED_PRODUCTS
            .iter()
            .find(|(name, _)| name.to_lowercase().contains(&base))
        {
            return related.iter().map(|p| p.to_string()).collect();
        }
    }

    ["Plus", "Max", "Advanced"]
        .iter()
        .map(|suffix| format!("{name} {suffix}"))
        .collect()
}
