use std::sync::PoisonError;

use tracing::{info, instrument, warn};

use crate::domain::{
    common::{generate_timestamp, services::Service},
    health::ports::HealthCheckRepository,
    interaction::{
        ports::{InteractionEvidencePort, InteractionRepository, SeverityClassifier},
        value_objects::{PairInteraction, SupplementPair},
    },
    stack_check::{
        entities::{RecentStack, StackCheckReport, SupplementFacts},
        ports::StackCheckService,
    },
    supplement::{
        entities::CanonicalAgent, helpers::dedupe_names, ports::SupplementSearchPort,
        services::resolve_agent,
    },
    supplement_facts::ports::{FactService, FactSourcePort, SupplementFactRepository},
};

impl<IR, FR, HC, SP, EP, SC, FS> StackCheckService for Service<IR, FR, HC, SP, EP, SC, FS>
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
    async fn check_stack(&self, names: Vec<String>) -> StackCheckReport {
        let names = dedupe_names(names);

        let mut resolved: Vec<(String, CanonicalAgent)> = Vec::with_capacity(names.len());
        let mut unresolved = Vec::new();

        for name in names {
            match resolve_agent(&self.search_port, &name).await {
                Some(agent) => resolved.push((name, agent)),
                None => {
                    warn!("Unresolved supplement name: {}", name);
                    unresolved.push(name);
                }
            }
        }

        // Pairs are processed one at a time so each key has a single writer
        // within a request.
        let mut interactions = Vec::new();
        for (i, (name_a, agent_a)) in resolved.iter().enumerate() {
            for (name_b, agent_b) in &resolved[i + 1..] {
                let pair = SupplementPair::new(name_a, name_b);

                let record = match self.find_fresh_record(&pair).await {
                    Some(record) => record,
                    None => {
                        self.refresh_record(
                            &pair,
                            (name_a, &agent_a.identifier),
                            (name_b, &agent_b.identifier),
                        )
                        .await
                    }
                };

                interactions.push(PairInteraction::new(name_a, name_b, &record));
            }
        }

        let mut supplements = Vec::with_capacity(resolved.len());
        for (name, _) in &resolved {
            let facts = self.extract_facts(name.clone()).await;
            supplements.push(SupplementFacts::new(name, facts));
        }

        let (checked_at, _) = generate_timestamp();
        let report = StackCheckReport {
            interactions,
            supplements,
            unresolved,
            checked_at,
        };

        info!(
            "Checked stack: {} resolved, {} unresolved, {} pairs",
            report.supplements.len(),
            report.unresolved.len(),
            report.interactions.len()
        );

        self.recent_stacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecentStack::from(&report));

        report
    }

    fn recent_stacks(&self) -> Vec<RecentStack> {
        self.recent_stacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .list()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::{
        health::ports::MockHealthCheckRepository,
        interaction::{
            entities::{EvidenceFragment, RecordSource, Severity},
            ports::{MockInteractionEvidencePort, MockSeverityClassifier},
            services::tests::{InMemoryInteractionRepository, known_search, moderate},
        },
        supplement_facts::{
            entities::{FactSheet, SupplementFact},
            ports::{MockFactSourcePort, MockSupplementFactRepository},
        },
    };

    type StackTestService = Service<
        InMemoryInteractionRepository,
        MockSupplementFactRepository,
        MockHealthCheckRepository,
        crate::domain::supplement::ports::MockSupplementSearchPort,
        MockInteractionEvidencePort,
        MockSeverityClassifier,
        MockFactSourcePort,
    >;

    fn known_facts() -> MockSupplementFactRepository {
        let mut facts = MockSupplementFactRepository::new();
        facts.expect_find_exact().returning(|name| {
            Box::pin(async move {
                Ok(Some(SupplementFact::new(
                    &name,
                    FactSheet::new("Stored use.", "Stored dosage."),
                    "seed",
                )))
            })
        });
        facts
    }

    fn single_fetch_evidence() -> MockInteractionEvidencePort {
        let mut evidence = MockInteractionEvidencePort::new();
        evidence
            .expect_get_evidence()
            .withf(|key| key.as_str() == "C0006644-C0010286")
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(Some(vec![EvidenceFragment::from_text(
                        "Caffeine may blunt the effect of creatine.",
                    )]))
                })
            });
        evidence
    }

    fn single_classification() -> MockSeverityClassifier {
        let mut classifier = MockSeverityClassifier::new();
        classifier
            .expect_classify()
            .times(1)
            .returning(|_, _, _| Box::pin(async { moderate() }));
        classifier
    }

    fn service(
        evidence: MockInteractionEvidencePort,
        classifier: MockSeverityClassifier,
    ) -> StackTestService {
        let mut source = MockFactSourcePort::new();
        source.expect_fetch_sections().never();

        Service::new(
            InMemoryInteractionRepository::default(),
            known_facts(),
            MockHealthCheckRepository::new(),
            known_search(),
            evidence,
            classifier,
            source,
            Duration::days(30),
            2,
        )
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_cold_cache_pair_fetches_and_classifies_once() {
        let service = service(single_fetch_evidence(), single_classification());

        let report = service.check_stack(names(&["Creatine", "Caffeine"])).await;

        assert_eq!(report.interactions.len(), 1);
        let interaction = &report.interactions[0];
        assert_eq!(interaction.supplements, vec!["Creatine", "Caffeine"]);
        assert_eq!(interaction.severity, Severity::Moderate);
        assert_eq!(interaction.source, RecordSource::Model);
        assert!(!interaction.mechanism.is_empty());

        assert_eq!(report.supplements.len(), 2);
        assert_eq!(report.supplements[0].typical_use, "Stored use.");
        assert!(report.unresolved.is_empty());
        assert!(report.has_interactions());
    }

    #[tokio::test]
    async fn test_second_check_is_served_from_cache() {
        let service = service(single_fetch_evidence(), single_classification());

        let first = service.check_stack(names(&["Creatine", "Caffeine"])).await;
        let second = service.check_stack(names(&["caffeine", "creatine"])).await;

        assert_eq!(first.interactions[0].severity, second.interactions[0].severity);
        assert_eq!(first.interactions[0].mechanism, second.interactions[0].mechanism);
    }

    #[tokio::test]
    async fn test_unresolved_name_is_reported_and_not_paired() {
        let service = service(single_fetch_evidence(), single_classification());

        let report = service
            .check_stack(names(&["Creatine", "Unobtainium", "Caffeine"]))
            .await;

        assert_eq!(report.interactions.len(), 1);
        assert_eq!(report.unresolved, vec!["Unobtainium"]);
        assert_eq!(report.supplements.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_names_collapse_to_one_pair() {
        let service = service(single_fetch_evidence(), single_classification());

        let report = service
            .check_stack(names(&["Creatine", " creatine", "Caffeine"]))
            .await;

        assert_eq!(report.interactions.len(), 1);
        assert_eq!(report.supplements[0].name, "Creatine");
    }

    #[tokio::test]
    async fn test_three_resolved_names_give_three_pairs() {
        let mut evidence = MockInteractionEvidencePort::new();
        evidence
            .expect_get_evidence()
            .times(3)
            .returning(|_| Box::pin(async { Ok(None) }));

        let mut classifier = MockSeverityClassifier::new();
        classifier.expect_classify().times(3).returning(|_, _, _| {
            Box::pin(async { crate::domain::interaction::entities::Classification::baseline() })
        });

        let service = service(evidence, classifier);
        let report = service
            .check_stack(names(&["Creatine", "Caffeine", "Zinc"]))
            .await;

        let pairs: Vec<_> = report
            .interactions
            .iter()
            .map(|i| i.supplements.join("+"))
            .collect();
        assert_eq!(pairs, vec!["Creatine+Caffeine", "Creatine+Zinc", "Caffeine+Zinc"]);
        assert!(!report.has_interactions());
    }

    #[tokio::test]
    async fn test_recent_stacks_are_bounded_and_newest_first() {
        let mut evidence = MockInteractionEvidencePort::new();
        evidence
            .expect_get_evidence()
            .returning(|_| Box::pin(async { Ok(None) }));
        let mut classifier = MockSeverityClassifier::new();
        classifier.expect_classify().returning(|_, _, _| {
            Box::pin(async { crate::domain::interaction::entities::Classification::baseline() })
        });

        let service = service(evidence, classifier);
        service.check_stack(names(&["Creatine", "Caffeine"])).await;
        service.check_stack(names(&["Creatine", "Zinc"])).await;
        service.check_stack(names(&["Caffeine", "Zinc"])).await;

        let recent = service.recent_stacks();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].stack, vec!["Caffeine", "Zinc"]);
        assert_eq!(recent[1].stack, vec!["Creatine", "Zinc"]);
    }
}
