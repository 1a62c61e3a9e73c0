use anyhow::anyhow;
use chrono::Duration;
use tracing::{info, warn};

use crate::{
    domain::{
        common::{ClassifierKind, StackCheckConfig, services::Service},
        interaction::classifier::{ClassifierStrategy, HeuristicClassifier, ModelClassifier},
    },
    infrastructure::{
        db::postgres::{Postgres, PostgresConfig},
        health::PostgresHealthCheckRepository,
        interaction::PostgresInteractionRepository,
        llm::GeminiLLMClient,
        reference::{ReferenceSources, WebMdClient, WikipediaClient},
        suppai::SuppAiClient,
        supplement_facts::PostgresSupplementFactRepository,
    },
};

pub type AppService = Service<
    PostgresInteractionRepository,
    PostgresSupplementFactRepository,
    PostgresHealthCheckRepository,
    SuppAiClient,
    SuppAiClient,
    ClassifierStrategy<GeminiLLMClient>,
    ReferenceSources,
>;

fn build_classifier(config: &StackCheckConfig) -> ClassifierStrategy<GeminiLLMClient> {
    match (config.classifier.kind, config.llm.api_key.as_deref()) {
        (ClassifierKind::Model, Some(api_key)) if !api_key.trim().is_empty() => {
            info!("Using model classifier ({})", config.llm.model);
            ClassifierStrategy::Model(ModelClassifier::new(
                GeminiLLMClient::new(
                    api_key.to_string(),
                    config.llm.model.clone(),
                    config.llm.base_url.clone(),
                ),
                config.classifier.memo_capacity,
            ))
        }
        (ClassifierKind::Model, _) => {
            warn!("Model classifier selected but no LLM API key configured; using heuristic classifier");
            ClassifierStrategy::Heuristic(HeuristicClassifier)
        }
        (ClassifierKind::Heuristic, _) => {
            info!("Using heuristic classifier");
            ClassifierStrategy::Heuristic(HeuristicClassifier)
        }
    }
}

/// Freshness window of cached interactions. Must be a positive number of days.
pub fn freshness_window(days: i64) -> Result<Duration, anyhow::Error> {
    Duration::try_days(days)
        .filter(|window| *window > Duration::zero())
        .ok_or_else(|| anyhow!("interaction TTL must be a positive number of days, got {}", days))
}

pub async fn create_service(config: StackCheckConfig) -> Result<AppService, anyhow::Error> {
    let freshness_window = freshness_window(config.cache.interaction_ttl_days)?;

    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.url(),
    })
    .await?;

    let suppai = SuppAiClient::new(config.sources.suppai_base_url.clone());
    let reference_sources = ReferenceSources::new(
        WebMdClient::new(config.sources.webmd_base_url.clone()),
        WikipediaClient::new(config.sources.wikipedia_base_url.clone()),
    );

    Ok(Service::new(
        PostgresInteractionRepository::new(postgres.get_db()),
        PostgresSupplementFactRepository::new(postgres.get_db()),
        PostgresHealthCheckRepository::new(postgres.get_db()),
        suppai.clone(),
        suppai,
        build_classifier(&config),
        reference_sources,
        freshness_window,
        config.cache.recent_stacks_capacity,
    ))
}
