use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    interaction::{
        entities::{Classification, EvidenceFragment, InteractionRecord, RawEvidence},
        value_objects::{EvidencePairKey, SupplementPair},
    },
};

/// Persistent freshness cache of classified pairs.
#[cfg_attr(test, mockall::automock)]
pub trait InteractionRepository: Send + Sync {
    fn find_by_pair(
        &self,
        pair: SupplementPair,
    ) -> impl Future<Output = Result<Option<InteractionRecord>, CoreError>> + Send;

    /// Insert-or-update keyed by the sorted pair. A conflicting row has all
    /// classification fields and its timestamp overwritten.
    fn upsert(
        &self,
        record: InteractionRecord,
    ) -> impl Future<Output = Result<InteractionRecord, CoreError>> + Send;
}

/// Pairwise evidence from the supplement knowledge base.
#[cfg_attr(test, mockall::automock)]
pub trait InteractionEvidencePort: Send + Sync {
    /// `Ok(None)` when the source knows no interaction for the pair.
    fn get_evidence(
        &self,
        key: EvidencePairKey,
    ) -> impl Future<Output = Result<Option<Vec<EvidenceFragment>>, CoreError>> + Send;
}

/// LLM Client trait for calling generative models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn complete(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Turns raw evidence into severity, mechanism and side effects.
///
/// Implementations never fail: degraded outcomes are expressed in the
/// returned classification.
#[cfg_attr(test, mockall::automock)]
pub trait SeverityClassifier: Send + Sync {
    fn classify(
        &self,
        evidence: RawEvidence,
        supplement_a: String,
        supplement_b: String,
    ) -> impl Future<Output = Classification> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait InteractionService: Send + Sync {
    /// Cached record for the pair, refreshed when missing, stale or degraded.
    fn get_or_refresh(
        &self,
        name_a: String,
        name_b: String,
    ) -> impl Future<Output = InteractionRecord> + Send;
}
