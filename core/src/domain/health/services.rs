use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    health::{
        entities::DatabaseHealthStatus,
        ports::{HealthCheckRepository, HealthCheckService},
    },
    interaction::ports::{InteractionEvidencePort, InteractionRepository, SeverityClassifier},
    supplement::ports::SupplementSearchPort,
    supplement_facts::ports::{FactSourcePort, SupplementFactRepository},
};

impl<IR, FR, HC, SP, EP, SC, FS> HealthCheckService for Service<IR, FR, HC, SP, EP, SC, FS>
where
    IR: InteractionRepository,
    FR: SupplementFactRepository,
    HC: HealthCheckRepository,
    SP: SupplementSearchPort,
    EP: InteractionEvidencePort,
    SC: SeverityClassifier,
    FS: FactSourcePort,
{
    async fn readness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        self.health_check_repository.readness().await
    }

    async fn health(&self) -> Result<u64, CoreError> {
        self.health_check_repository.health().await
    }
}
