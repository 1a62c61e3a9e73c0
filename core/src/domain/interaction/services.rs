use chrono::Utc;
use tracing::{debug, error, instrument, warn};

use crate::domain::{
    common::services::Service,
    health::ports::HealthCheckRepository,
    interaction::{
        entities::{InteractionRecord, RawEvidence},
        ports::{
            InteractionEvidencePort, InteractionRepository, InteractionService,
            SeverityClassifier,
        },
        value_objects::{EvidencePairKey, SupplementPair},
    },
    supplement::{ports::SupplementSearchPort, services::resolve_agent},
    supplement_facts::ports::{FactSourcePort, SupplementFactRepository},
};

/// Fetches and flattens the evidence for two canonical identifiers.
///
/// A missing interaction and a failed call both yield `RawEvidence::Empty`.
pub async fn fetch_evidence<E>(evidence_port: &E, id_a: &str, id_b: &str) -> RawEvidence
where
    E: InteractionEvidencePort,
{
    let key = EvidencePairKey::new(id_a, id_b);

    match evidence_port.get_evidence(key.clone()).await {
        Ok(Some(fragments)) => RawEvidence::from_fragments(&fragments),
        Ok(None) => {
            debug!("No interaction evidence for {}", key.as_str());
            RawEvidence::Empty
        }
        Err(e) => {
            warn!("Evidence fetch failed for {}: {}", key.as_str(), e);
            RawEvidence::Empty
        }
    }
}

impl<IR, FR, HC, SP, EP, SC, FS> Service<IR, FR, HC, SP, EP, SC, FS>
where
    IR: InteractionRepository,
    EP: InteractionEvidencePort,
    SC: SeverityClassifier,
{
    /// Stored record for the pair when it is fresh and not degraded.
    pub(crate) async fn find_fresh_record(&self, pair: &SupplementPair) -> Option<InteractionRecord> {
        match self.interaction_repository.find_by_pair(pair.clone()).await {
            Ok(Some(record)) if record.is_fresh(Utc::now(), self.freshness_window) => {
                debug!("Interaction cache hit for {} + {}", pair.first(), pair.second());
                Some(record)
            }
            Ok(Some(record)) => {
                debug!(
                    "Interaction cache entry for {} + {} is stale or degraded (source: {})",
                    pair.first(),
                    pair.second(),
                    record.source.as_str()
                );
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Interaction cache lookup failed: {}", e);
                None
            }
        }
    }

    /// Fetches evidence, classifies it and upserts the result.
    ///
    /// The record is returned even when the write fails.
    pub(crate) async fn refresh_record(
        &self,
        pair: &SupplementPair,
        (name_a, id_a): (&str, &str),
        (name_b, id_b): (&str, &str),
    ) -> InteractionRecord {
        let evidence = fetch_evidence(&self.evidence_port, id_a, id_b).await;
        let classification = self
            .classifier
            .classify(evidence, name_a.to_string(), name_b.to_string())
            .await;

        let record = InteractionRecord::new(pair, classification);

        match self.interaction_repository.upsert(record.clone()).await {
            Ok(stored) => stored,
            Err(e) => {
                error!(
                    "Failed to cache interaction for {} + {}: {}",
                    pair.first(),
                    pair.second(),
                    e
                );
                record
            }
        }
    }
}

impl<IR, FR, HC, SP, EP, SC, FS> InteractionService for Service<IR, FR, HC, SP, EP, SC, FS>
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
    async fn get_or_refresh(&self, name_a: String, name_b: String) -> InteractionRecord {
        let pair = SupplementPair::new(&name_a, &name_b);

        if let Some(record) = self.find_fresh_record(&pair).await {
            return record;
        }

        let agent_a = resolve_agent(&self.search_port, &name_a).await;
        let agent_b = resolve_agent(&self.search_port, &name_b).await;

        match (agent_a, agent_b) {
            (Some(a), Some(b)) => {
                self.refresh_record(
                    &pair,
                    (name_a.trim(), &a.identifier),
                    (name_b.trim(), &b.identifier),
                )
                .await
            }
            _ => {
                warn!("Cannot resolve pair {} + {}", name_a, name_b);
                InteractionRecord::not_found(&pair)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use chrono::Duration;

    use super::*;
    use crate::domain::{
        common::entities::app_errors::CoreError,
        health::ports::MockHealthCheckRepository,
        interaction::{
            entities::{Classification, EvidenceFragment, RecordSource, Severity},
            ports::{MockInteractionEvidencePort, MockSeverityClassifier},
        },
        supplement::{entities::CanonicalAgent, ports::MockSupplementSearchPort},
        supplement_facts::ports::{MockFactSourcePort, MockSupplementFactRepository},
    };

    /// In-memory stand-in for the persistent cache, keyed like the real table.
    #[derive(Clone, Default)]
    pub(crate) struct InMemoryInteractionRepository {
        pub rows: Arc<Mutex<HashMap<(String, String), InteractionRecord>>>,
        pub fail_writes: bool,
    }

    impl InMemoryInteractionRepository {
        pub fn insert(&self, record: InteractionRecord) {
            self.rows.lock().unwrap().insert(
                (record.supplement_a.clone(), record.supplement_b.clone()),
                record,
            );
        }

        pub fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    impl InteractionRepository for InMemoryInteractionRepository {
        async fn find_by_pair(
            &self,
            pair: SupplementPair,
        ) -> Result<Option<InteractionRecord>, CoreError> {
            let key = (pair.first().to_string(), pair.second().to_string());
            Ok(self.rows.lock().unwrap().get(&key).cloned())
        }

        async fn upsert(&self, record: InteractionRecord) -> Result<InteractionRecord, CoreError> {
            if self.fail_writes {
                return Err(CoreError::InternalServerError);
            }

            let key = (record.supplement_a.clone(), record.supplement_b.clone());
            let mut rows = self.rows.lock().unwrap();
            let stored = match rows.get(&key) {
                Some(existing) => InteractionRecord {
                    id: existing.id,
                    ..record
                },
                None => record,
            };
            rows.insert(key, stored.clone());
            Ok(stored)
        }
    }

    pub(crate) type TestService = Service<
        InMemoryInteractionRepository,
        MockSupplementFactRepository,
        MockHealthCheckRepository,
        MockSupplementSearchPort,
        MockInteractionEvidencePort,
        MockSeverityClassifier,
        MockFactSourcePort,
    >;

    pub(crate) fn test_service(
        repository: InMemoryInteractionRepository,
        search: MockSupplementSearchPort,
        evidence: MockInteractionEvidencePort,
        classifier: MockSeverityClassifier,
    ) -> TestService {
        Service::new(
            repository,
            MockSupplementFactRepository::new(),
            MockHealthCheckRepository::new(),
            search,
            evidence,
            classifier,
            MockFactSourcePort::new(),
            Duration::days(30),
            4,
        )
    }

    pub(crate) fn agent_for(name: &str) -> CanonicalAgent {
        let identifier = match name.trim().to_lowercase().as_str() {
            "creatine" => "C0010286",
            "caffeine" => "C0006644",
            "zinc" => "C0043481",
            other => panic!("unexpected lookup for {other}"),
        };

        CanonicalAgent {
            identifier: identifier.to_string(),
            preferred_name: name.trim().to_string(),
            aliases: vec![],
            description: String::new(),
        }
    }

    /// Search mock that knows creatine, caffeine and zinc.
    pub(crate) fn known_search() -> MockSupplementSearchPort {
        let mut search = MockSupplementSearchPort::new();
        search.expect_search().returning(|query| {
            let result = match query.trim().to_lowercase().as_str() {
                "creatine" | "caffeine" | "zinc" => vec![agent_for(&query)],
                _ => vec![],
            };
            Box::pin(async move { Ok(result) })
        });
        search
    }

    pub(crate) fn moderate() -> Classification {
        Classification {
            severity: Severity::Moderate,
            mechanism: "Caffeine may blunt creatine's effect on relaxation time.".to_string(),
            side_effects: "Gastrointestinal discomfort.".to_string(),
            source: RecordSource::Model,
        }
    }

    fn evidence_with_text() -> MockInteractionEvidencePort {
        let mut evidence = MockInteractionEvidencePort::new();
        evidence
            .expect_get_evidence()
            .withf(|key| key.as_str() == "C0006644-C0010286")
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(Some(vec![EvidenceFragment::from_spans(vec![
                        "Caffeine".to_string(),
                        " may blunt ".to_string(),
                        "creatine".to_string(),
                        ".".to_string(),
                    ])]))
                })
            });
        evidence
    }

    #[tokio::test]
    async fn test_cold_cache_fetches_once_and_is_then_a_hit() {
        let repository = InMemoryInteractionRepository::default();

        let mut classifier = MockSeverityClassifier::new();
        classifier
            .expect_classify()
            .withf(|evidence, _, _| {
                evidence == &RawEvidence::Text("Caffeine may blunt creatine.".to_string())
            })
            .times(1)
            .returning(|_, _, _| Box::pin(async { moderate() }));

        let service = test_service(
            repository.clone(),
            known_search(),
            evidence_with_text(),
            classifier,
        );

        let first = service
            .get_or_refresh("Creatine".to_string(), "Caffeine".to_string())
            .await;
        let second = service
            .get_or_refresh("Creatine".to_string(), "Caffeine".to_string())
            .await;

        assert_eq!(first.severity, Severity::Moderate);
        assert!(!first.mechanism.is_empty());
        assert_eq!(first, second);
        assert_eq!(repository.len(), 1);
    }

    #[tokio::test]
    async fn test_pair_order_addresses_the_same_row() {
        let repository = InMemoryInteractionRepository::default();

        let mut classifier = MockSeverityClassifier::new();
        classifier
            .expect_classify()
            .times(1)
            .returning(|_, _, _| Box::pin(async { moderate() }));

        let service = test_service(
            repository.clone(),
            known_search(),
            evidence_with_text(),
            classifier,
        );

        let ab = service
            .get_or_refresh("Creatine".to_string(), "Caffeine".to_string())
            .await;
        let ba = service
            .get_or_refresh(" caffeine".to_string(), "CREATINE ".to_string())
            .await;

        assert_eq!(ab, ba);
        assert_eq!(ab.supplement_a, "caffeine");
        assert_eq!(ab.supplement_b, "creatine");
        assert_eq!(repository.len(), 1);
    }

    #[tokio::test]
    async fn test_baseline_row_is_refreshed_even_when_recent() {
        let repository = InMemoryInteractionRepository::default();
        let pair = SupplementPair::new("Creatine", "Caffeine");
        let baseline = InteractionRecord::new(&pair, Classification::baseline());
        let baseline_id = baseline.id;
        repository.insert(baseline);

        let mut classifier = MockSeverityClassifier::new();
        classifier
            .expect_classify()
            .times(1)
            .returning(|_, _, _| Box::pin(async { moderate() }));

        let service = test_service(
            repository.clone(),
            known_search(),
            evidence_with_text(),
            classifier,
        );

        let record = service
            .get_or_refresh("Creatine".to_string(), "Caffeine".to_string())
            .await;

        assert_eq!(record.source, RecordSource::Model);
        assert_eq!(record.id, baseline_id);
        assert_eq!(repository.len(), 1);
    }

    #[tokio::test]
    async fn test_stale_row_is_refreshed() {
        let repository = InMemoryInteractionRepository::default();
        let pair = SupplementPair::new("Creatine", "Caffeine");
        let mut old = InteractionRecord::new(&pair, moderate());
        old.last_updated = Utc::now() - Duration::days(45);
        let old_timestamp = old.last_updated;
        repository.insert(old);

        let mut classifier = MockSeverityClassifier::new();
        classifier
            .expect_classify()
            .times(1)
            .returning(|_, _, _| Box::pin(async { moderate() }));

        let service = test_service(
            repository.clone(),
            known_search(),
            evidence_with_text(),
            classifier,
        );

        let record = service
            .get_or_refresh("Caffeine".to_string(), "Creatine".to_string())
            .await;

        assert!(record.last_updated > old_timestamp);
    }

    #[tokio::test]
    async fn test_empty_evidence_yields_baseline_tuple() {
        let mut evidence = MockInteractionEvidencePort::new();
        evidence
            .expect_get_evidence()
            .times(1)
            .returning(|_| Box::pin(async { Ok(None) }));

        let mut classifier = MockSeverityClassifier::new();
        classifier
            .expect_classify()
            .withf(|evidence, _, _| evidence.is_empty())
            .times(1)
            .returning(|_, _, _| Box::pin(async { Classification::baseline() }));

        let service = test_service(
            InMemoryInteractionRepository::default(),
            known_search(),
            evidence,
            classifier,
        );

        let record = service
            .get_or_refresh("Creatine".to_string(), "Caffeine".to_string())
            .await;

        assert_eq!(record.severity, Severity::None);
        assert_eq!(record.mechanism, "No known interaction in available research.");
        assert_eq!(record.side_effects, "No known side effects.");
        assert_eq!(record.source, RecordSource::Baseline);
    }

    #[tokio::test]
    async fn test_evidence_failure_is_treated_as_empty() {
        let mut evidence = MockInteractionEvidencePort::new();
        evidence.expect_get_evidence().times(1).returning(|_| {
            Box::pin(async { Err(CoreError::ExternalServiceError("reset".to_string())) })
        });

        assert!(fetch_evidence(&evidence, "C1", "C2").await.is_empty());
    }

    #[tokio::test]
    async fn test_unresolved_name_returns_not_found_sentinel() {
        let mut evidence = MockInteractionEvidencePort::new();
        evidence.expect_get_evidence().never();
        let mut classifier = MockSeverityClassifier::new();
        classifier.expect_classify().never();

        let repository = InMemoryInteractionRepository::default();
        let service = test_service(repository.clone(), known_search(), evidence, classifier);

        let record = service
            .get_or_refresh("Creatine".to_string(), "Unobtainium".to_string())
            .await;

        assert_eq!(record.source, RecordSource::NotFound);
        assert_ne!(record.severity, Severity::None);
        assert_eq!(record.mechanism, "Data not found.");
        assert_eq!(repository.len(), 0);
    }

    #[tokio::test]
    async fn test_persistence_failure_still_returns_record() {
        let repository = InMemoryInteractionRepository {
            fail_writes: true,
            ..Default::default()
        };

        let mut classifier = MockSeverityClassifier::new();
        classifier
            .expect_classify()
            .times(1)
            .returning(|_, _, _| Box::pin(async { moderate() }));

        let service = test_service(repository, known_search(), evidence_with_text(), classifier);

        let record = service
            .get_or_refresh("Creatine".to_string(), "Caffeine".to_string())
            .await;

        assert_eq!(record.severity, Severity::Moderate);
    }
}
