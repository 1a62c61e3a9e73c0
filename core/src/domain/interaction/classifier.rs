use std::{
    num::NonZeroUsize,
    sync::{Arc, Mutex},
};

use lru::LruCache;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{
    common::text::truncate_chars,
    interaction::{
        entities::{Classification, RawEvidence, RecordSource, Severity},
        heuristics::{classify_severity, extract_mechanism, extract_side_effects},
        ports::{LLMClient, SeverityClassifier},
        schema::get_interaction_classification_schema,
    },
};

const MAX_PROMPT_EVIDENCE_CHARS: usize = 6000;

/// Keyword-tier classifier. Needs no network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn classify_text(&self, text: &str) -> Classification {
        Classification {
            severity: classify_severity(text),
            mechanism: extract_mechanism(text),
            side_effects: extract_side_effects(text),
            source: RecordSource::Heuristic,
        }
    }
}

impl SeverityClassifier for HeuristicClassifier {
    async fn classify(
        &self,
        evidence: RawEvidence,
        _supplement_a: String,
        _supplement_b: String,
    ) -> Classification {
        match evidence {
            RawEvidence::Empty => Classification::baseline(),
            RawEvidence::Text(text) => self.classify_text(&text),
        }
    }
}

/// Generative-model classifier with a bounded, process-lifetime memo table.
///
/// Falls back to the heuristic when the model call itself fails. A reply
/// that cannot be decoded yields `Classification::unparsed()`.
#[derive(Clone)]
pub struct ModelClassifier<L> {
    llm: L,
    memo: Arc<Mutex<LruCache<String, Classification>>>,
    fallback: HeuristicClassifier,
}

impl<L> ModelClassifier<L>
where
    L: LLMClient,
{
    pub fn new(llm: L, memo_capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(memo_capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            llm,
            memo: Arc::new(Mutex::new(LruCache::new(capacity))),
            fallback: HeuristicClassifier,
        }
    }

    fn remembered(&self, key: &str) -> Option<Classification> {
        self.memo.lock().ok()?.get(key).cloned()
    }

    fn remember(&self, key: String, classification: &Classification) {
        if let Ok(mut memo) = self.memo.lock() {
            memo.put(key, classification.clone());
        }
    }
}

impl<L> SeverityClassifier for ModelClassifier<L>
where
    L: LLMClient,
{
    async fn classify(
        &self,
        evidence: RawEvidence,
        supplement_a: String,
        supplement_b: String,
    ) -> Classification {
        let text = match evidence {
            RawEvidence::Empty => return Classification::baseline(),
            RawEvidence::Text(text) => text,
        };

        let prompt = build_classification_prompt(&supplement_a, &supplement_b, &text);

        if let Some(hit) = self.remembered(&prompt) {
            debug!(
                "Classification memo hit for {} + {}",
                supplement_a, supplement_b
            );
            return hit;
        }

        let classification = match self
            .llm
            .complete(prompt.clone(), get_interaction_classification_schema())
            .await
        {
            Ok(reply) => parse_classification_reply(&reply),
            Err(e) => {
                warn!(
                    "Model classification unavailable for {} + {}, using heuristic: {}",
                    supplement_a, supplement_b, e
                );
                return self.fallback.classify_text(&text);
            }
        };

        if classification.severity == Severity::Unknown {
            warn!(
                "Unparsable classification reply for {} + {}",
                supplement_a, supplement_b
            );
        } else {
            self.remember(prompt, &classification);
        }

        classification
    }
}

/// The configured classification strategy.
#[derive(Clone)]
pub enum ClassifierStrategy<L> {
    Heuristic(HeuristicClassifier),
    Model(ModelClassifier<L>),
}

impl<L> SeverityClassifier for ClassifierStrategy<L>
where
    L: LLMClient,
{
    async fn classify(
        &self,
        evidence: RawEvidence,
        supplement_a: String,
        supplement_b: String,
    ) -> Classification {
        match self {
            ClassifierStrategy::Heuristic(c) => c.classify(evidence, supplement_a, supplement_b).await,
            ClassifierStrategy::Model(c) => c.classify(evidence, supplement_a, supplement_b).await,
        }
    }
}

pub fn build_classification_prompt(supplement_a: &str, supplement_b: &str, evidence: &str) -> String {
    format!(
        "You are a clinical pharmacology assistant reviewing dietary supplement interactions.\n\
         Using ONLY the research evidence below, assess the interaction between \"{supplement_a}\" and \"{supplement_b}\".\n\n\
         Evidence:\n{}\n\n\
         Classify the severity as exactly one of: None, Mild, Moderate, Severe.\n\
         Describe the physiological mechanism of the interaction and the observable side effects, \
         grounded only in the evidence. If the evidence does not describe them, say so.\n\n\
         Respond ONLY with a JSON object with exactly three string fields: \
         \"severity\", \"mechanism\", \"side_effects\". Do not include any other text.",
        truncate_chars(evidence, MAX_PROMPT_EVIDENCE_CHARS)
    )
}

#[derive(Debug, Deserialize)]
struct ModelReply {
    severity: Option<String>,
    mechanism: Option<String>,
    #[serde(alias = "sideEffects")]
    side_effects: Option<String>,
}

/// Decodes the first balanced JSON object found in a model reply.
pub fn parse_classification_reply(reply: &str) -> Classification {
    let Some(block) = first_json_object(reply) else {
        return Classification::unparsed();
    };

    match serde_json::from_str::<ModelReply>(block) {
        Ok(ModelReply {
            severity: Some(severity),
            mechanism: Some(mechanism),
            side_effects: Some(side_effects),
        }) => Classification {
            severity: Severity::from_label(&severity),
            mechanism: mechanism.trim().to_string(),
            side_effects: side_effects.trim().to_string(),
            source: RecordSource::Model,
        },
        Ok(_) => Classification::unparsed(),
        Err(e) => {
            debug!("Failed to decode classification block: {}", e);
            Classification::unparsed()
        }
    }
}

/// Slice of the first `{ ... }` block whose braces balance, ignoring braces
/// inside JSON strings.
pub fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}
