use tracing::{debug, error, instrument, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, normalize_name, services::Service},
    health::ports::HealthCheckRepository,
    interaction::ports::{InteractionEvidencePort, InteractionRepository, SeverityClassifier},
    supplement::ports::SupplementSearchPort,
    supplement_facts::{
        entities::{FactSheet, ScrapedSection, SupplementFact},
        extraction::extract_fact_sheet,
        fallback::canonical_facts,
        ports::{FactService, FactSourcePort, SupplementFactRepository},
    },
};

fn found(
    result: Result<Option<SupplementFact>, CoreError>,
    stage: &str,
) -> Option<SupplementFact> {
    result.unwrap_or_else(|e| {
        warn!("Fact lookup ({}) failed: {}", stage, e);
        None
    })
}

fn section_sources(sections: &[ScrapedSection]) -> String {
    let mut sources: Vec<&str> = Vec::new();
    for section in sections.iter().filter(|s| !s.is_empty()) {
        if !sources.contains(&section.source.as_str()) {
            sources.push(&section.source);
        }
    }
    sources.join(",")
}

impl<IR, FR, HC, SP, EP, SC, FS> Service<IR, FR, HC, SP, EP, SC, FS>
where
    FR: SupplementFactRepository,
{
    /// Exact name, then alias, then partial match.
    async fn find_stored_facts(&self, normalized: &str) -> Option<SupplementFact> {
        if let Some(fact) = found(
            self.fact_repository.find_exact(normalized.to_string()).await,
            "exact",
        ) {
            return Some(fact);
        }

        if let Some(fact) = found(
            self.fact_repository
                .find_by_alias(normalized.to_string())
                .await,
            "alias",
        ) {
            return Some(fact);
        }

        found(
            self.fact_repository
                .find_similar(normalized.to_string())
                .await,
            "similar",
        )
    }
}

impl<IR, FR, HC, SP, EP, SC, FS> FactService for Service<IR, FR, HC, SP, EP, SC, FS>
where
    IR: InteractionRepository,
    FR: SupplementFactRepository,
    HC: HealthCheckRepository,
    SP: SupplementSearchPort,
    EP: InteractionEvidencePort,
    SC: SeverityClassifier,
    FS: FactSourcePort,
{
    #[instrument(skip(self))]
    async fn extract_facts(&self, name: String) -> FactSheet {
        let normalized = normalize_name(&name);
        if normalized.is_empty() {
            return FactSheet::empty();
        }

        if let Some(fact) = self.find_stored_facts(&normalized).await {
            debug!("Known facts for {} (stored as {})", normalized, fact.name);
            return FactSheet::from(fact).or_fill(canonical_facts(&normalized));
        }

        let sections = self
            .fact_source
            .fetch_sections(name.trim().to_string())
            .await
            .unwrap_or_else(|e| {
                warn!("Reference scrape failed for {}: {}", normalized, e);
                Vec::new()
            });

        let scraped = extract_fact_sheet(&normalized, &sections);

        // Only scraped facts are written back; the canonical table stays in code.
        if !scraped.is_empty() {
            let fact = SupplementFact::new(&normalized, scraped.clone(), section_sources(&sections));
            if let Err(e) = self.fact_repository.save(fact).await {
                error!("Failed to store facts for {}: {}", normalized, e);
            }
        }

        scraped.or_fill(canonical_facts(&normalized))
    }
}
