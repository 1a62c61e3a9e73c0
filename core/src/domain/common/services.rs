use std::sync::{Arc, Mutex};

use chrono::Duration;

use crate::domain::stack_check::entities::RecentStacks;

/// Holds every port the domain services need.
///
/// Service traits (`InteractionService`, `FactService`, `SupplementService`,
/// `StackCheckService`, `HealthCheckService`) are implemented on this struct
/// in their respective modules.
#[derive(Clone)]
pub struct Service<IR, FR, HC, SP, EP, SC, FS> {
    pub(crate) interaction_repository: IR,
    pub(crate) fact_repository: FR,
    pub(crate) health_check_repository: HC,
    pub(crate) search_port: SP,
    pub(crate) evidence_port: EP,
    pub(crate) classifier: SC,
    pub(crate) fact_source: FS,
    pub(crate) recent_stacks: Arc<Mutex<RecentStacks>>,
    pub(crate) freshness_window: Duration,
}

impl<IR, FR, HC, SP, EP, SC, FS> Service<IR, FR, HC, SP, EP, SC, FS> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        interaction_repository: IR,
        fact_repository: FR,
        health_check_repository: HC,
        search_port: SP,
        evidence_port: EP,
        classifier: SC,
        fact_source: FS,
        freshness_window: Duration,
        recent_stacks_capacity: usize,
    ) -> Self {
        Self {
            interaction_repository,
            fact_repository,
            health_check_repository,
            search_port,
            evidence_port,
            classifier,
            fact_source,
            recent_stacks: Arc::new(Mutex::new(RecentStacks::new(recent_stacks_capacity))),
            freshness_window,
        }
    }
}
