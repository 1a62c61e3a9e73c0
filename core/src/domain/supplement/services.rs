use tracing::{debug, instrument, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    health::ports::HealthCheckRepository,
    interaction::ports::{InteractionEvidencePort, InteractionRepository, SeverityClassifier},
    supplement::{
        entities::{AlternativeSuggestion, CanonicalAgent, SupplementInfo},
        helpers::{find_alternative, find_related_products},
        ports::{SupplementSearchPort, SupplementService},
    },
    supplement_facts::ports::{FactService, FactSourcePort, SupplementFactRepository},
};

/// Resolves a free-text name to its canonical agent.
///
/// Takes the first search result. Transport failures and empty result sets
/// both yield `None`; callers skip the supplement instead of failing.
pub async fn resolve_agent<S>(search_port: &S, name: &str) -> Option<CanonicalAgent>
where
    S: SupplementSearchPort,
{
    let query = name.trim();
    if query.is_empty() {
        return None;
    }

    match search_port.search(query.to_string()).await {
        Ok(candidates) => {
            let agent = candidates.into_iter().next();
            if agent.is_none() {
                debug!("No canonical agent found for {}", query);
            }
            agent
        }
        Err(e) => {
            warn!("Supplement search failed for {}: {}", query, e);
            None
        }
    }
}

impl<IR, FR, HC, SP, EP, SC, FS> SupplementService for Service<IR, FR, HC, SP, EP, SC, FS>
where
    IR: InteractionRepository,
    FR: SupplementFactRepository,
    HC: HealthCheckRepository,
    SP: SupplementSearchPort,
    EP: InteractionEvidencePort,
    SC: SeverityClassifier,
    FS: FactSourcePort,
{
    async fn resolve(&self, name: String) -> Option<CanonicalAgent> {
        resolve_agent(&self.search_port, &name).await
    }

    async fn autosuggest(&self, query: String) -> Vec<CanonicalAgent> {
        let query = query.trim().to_string();
        if query.is_empty() {
            return Vec::new();
        }

        self.search_port.search(query).await.unwrap_or_else(|e| {
            warn!("Autosuggest search failed: {}", e);
            Vec::new()
        })
    }

    #[instrument(skip(self))]
    async fn get_supplement_info(&self, name: String) -> Result<SupplementInfo, CoreError> {
        let agent = resolve_agent(&self.search_port, &name)
            .await
            .ok_or(CoreError::NotFound)?;

        // Prefer the full record; the search hit is enough when the lookup fails.
        let agent = match self.search_port.get_agent(agent.identifier.clone()).await {
            Ok(Some(full)) => full,
            Ok(None) => agent,
            Err(e) => {
                warn!("Failed to fetch agent {}: {}", agent.identifier, e);
                agent
            }
        };

        let facts = self.extract_facts(agent.preferred_name.clone()).await;

        Ok(SupplementInfo::new(agent, facts))
    }

    fn get_alternative(&self, name: String) -> AlternativeSuggestion {
        find_alternative(&name)
    }

    fn get_related_products(&self, name: String) -> Vec<String> {
        find_related_products(&name)
    }
}
