use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    supplement::entities::{AlternativeSuggestion, CanonicalAgent, SupplementInfo},
};

/// Name search against the supplement knowledge base.
#[cfg_attr(test, mockall::automock)]
pub trait SupplementSearchPort: Send + Sync {
    /// Ordered candidates for a free-text query. The first one is authoritative.
    fn search(
        &self,
        query: String,
    ) -> impl Future<Output = Result<Vec<CanonicalAgent>, CoreError>> + Send;

    /// Full record for a canonical identifier.
    fn get_agent(
        &self,
        identifier: String,
    ) -> impl Future<Output = Result<Option<CanonicalAgent>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait SupplementService: Send + Sync {
    fn resolve(&self, name: String) -> impl Future<Output = Option<CanonicalAgent>> + Send;

    fn autosuggest(&self, query: String) -> impl Future<Output = Vec<CanonicalAgent>> + Send;

    fn get_supplement_info(
        &self,
        name: String,
    ) -> impl Future<Output = Result<SupplementInfo, CoreError>> + Send;

    fn get_alternative(&self, name: String) -> AlternativeSuggestion;

    fn get_related_products(&self, name: String) -> Vec<String>;
}
