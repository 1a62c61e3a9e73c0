//! Small text helpers shared by the heuristic classifier and the fact
//! extraction grammar.

const ABBREVIATIONS: &[&str] = &[
    "e.g.", "i.e.", "etc.", "vs.", "approx.", "dr.", "fig.", "al.", "no.", "ca.",
];

/// Splits prose into sentences.
///
/// Lines are treated as hard boundaries (scraped sections often carry list
/// items without terminal punctuation). Within a line a sentence ends at
/// `.`, `!` or `?` followed by whitespace and an upper-case letter, digit or
/// quote, unless the token is a known abbreviation.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();

    for line in text.lines() {
        let chars: Vec<char> = line.chars().collect();
        let mut current = String::new();

        for (i, &c) in chars.iter().enumerate() {
            current.push(c);

            if !matches!(c, '.' | '!' | '?') {
                continue;
            }

            let followed_by_space = chars.get(i + 1).is_none_or(|n| n.is_whitespace());
            let next_word = chars[i + 1..].iter().find(|n| !n.is_whitespace());
            let starts_new = next_word
                .is_none_or(|n| n.is_uppercase() || n.is_ascii_digit() || matches!(n, '"' | '\''));

            if followed_by_space && starts_new && !ends_with_abbreviation(&current) {
                push_sentence(&mut sentences, &current);
                current.clear();
            }
        }

        push_sentence(&mut sentences, &current);
    }

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

fn ends_with_abbreviation(current: &str) -> bool {
    let last_token = current
        .split_whitespace()
        .last()
        .unwrap_or_default()
        .to_lowercase();
    ABBREVIATIONS.contains(&last_token.as_str())
}

/// Truncates to at most `max_chars` characters, respecting char boundaries.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", text[..idx].trim_end()),
        None => text.to_string(),
    }
}

/// Collapses runs of whitespace into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
