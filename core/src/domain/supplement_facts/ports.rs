use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    supplement_facts::entities::{FactSheet, ScrapedSection, SupplementFact},
};

/// Known-facts table, consulted before any scrape.
///
/// All lookups take an already normalized name.
#[cfg_attr(test, mockall::automock)]
pub trait SupplementFactRepository: Send + Sync {
    fn find_exact(
        &self,
        name: String,
    ) -> impl Future<Output = Result<Option<SupplementFact>, CoreError>> + Send;

    fn find_by_alias(
        &self,
        name: String,
    ) -> impl Future<Output = Result<Option<SupplementFact>, CoreError>> + Send;

    /// Partial match, shortest stored name first.
    fn find_similar(
        &self,
        name: String,
    ) -> impl Future<Output = Result<Option<SupplementFact>, CoreError>> + Send;

    fn save(
        &self,
        fact: SupplementFact,
    ) -> impl Future<Output = Result<SupplementFact, CoreError>> + Send;
}

/// Reference pages that carry "uses" and "dosing" prose.
#[cfg_attr(test, mockall::automock)]
pub trait FactSourcePort: Send + Sync {
    fn fetch_sections(
        &self,
        name: String,
    ) -> impl Future<Output = Result<Vec<ScrapedSection>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait FactService: Send + Sync {
    /// Never fails; unknown fields come back as empty strings.
    fn extract_facts(&self, name: String) -> impl Future<Output = FactSheet> + Send;
}
