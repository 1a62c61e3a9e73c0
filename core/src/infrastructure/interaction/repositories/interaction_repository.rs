use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    sea_query::OnConflict,
};
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        interaction::{
            entities::InteractionRecord, ports::InteractionRepository,
            value_objects::SupplementPair,
        },
    },
    entity::supplement_interactions::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresInteractionRepository {
    pub db: DatabaseConnection,
}

impl PostgresInteractionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl InteractionRepository for PostgresInteractionRepository {
    async fn find_by_pair(
        &self,
        pair: SupplementPair,
    ) -> Result<Option<InteractionRecord>, CoreError> {
        let model = Entity::find()
            .filter(Column::SupplementA.eq(pair.first()))
            .filter(Column::SupplementB.eq(pair.second()))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get supplement interaction: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(model.map(InteractionRecord::from))
    }

    async fn upsert(&self, record: InteractionRecord) -> Result<InteractionRecord, CoreError> {
        let active_model = ActiveModel {
            id: Set(record.id),
            supplement_a: Set(record.supplement_a),
            supplement_b: Set(record.supplement_b),
            severity: Set(record.severity.as_str().to_string()),
            mechanism: Set(record.mechanism),
            side_effects: Set(record.side_effects),
            source: Set(record.source.as_str().to_string()),
            last_updated: Set(record.last_updated.fixed_offset()),
        };

        let stored = Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([Column::SupplementA, Column::SupplementB])
                    .update_columns([
                        Column::Severity,
                        Column::Mechanism,
                        Column::SideEffects,
                        Column::Source,
                        Column::LastUpdated,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to upsert supplement interaction: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(InteractionRecord::from(stored))
    }
}
