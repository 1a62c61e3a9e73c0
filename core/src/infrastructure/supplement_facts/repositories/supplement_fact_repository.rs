use sea_orm::{
    ActiveValue::Set, DatabaseConnection, DbBackend, EntityTrait, Statement,
    sea_query::OnConflict,
};
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        supplement_facts::{entities::SupplementFact, ports::SupplementFactRepository},
    },
    entity::supplement_facts::{ActiveModel, Column, Entity},
};

/// Partial matching on one or two letters matches nearly every row.
const MIN_SIMILAR_QUERY_CHARS: usize = 3;

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[derive(Debug, Clone)]
pub struct PostgresSupplementFactRepository {
    pub db: DatabaseConnection,
}

impl PostgresSupplementFactRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_one(
        &self,
        statement: Statement,
        lookup: &str,
    ) -> Result<Option<SupplementFact>, CoreError> {
        let model = Entity::find()
            .from_raw_sql(statement)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to find supplement facts ({}): {}", lookup, e);
                CoreError::InternalServerError
            })?;

        Ok(model.map(SupplementFact::from))
    }
}

impl SupplementFactRepository for PostgresSupplementFactRepository {
    async fn find_exact(&self, name: String) -> Result<Option<SupplementFact>, CoreError> {
        let statement = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT * FROM supplement_facts
            WHERE lower(name) = $1
            LIMIT 1
            "#,
            [name.into()],
        );

        self.find_one(statement, "exact").await
    }

    async fn find_by_alias(&self, name: String) -> Result<Option<SupplementFact>, CoreError> {
        let statement = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT * FROM supplement_facts
            WHERE EXISTS (
              SELECT 1 FROM unnest(aliases) AS alias
              WHERE lower(alias) = $1
            )
            ORDER BY length(name) ASC
            LIMIT 1
            "#,
            [name.into()],
        );

        self.find_one(statement, "alias").await
    }

    async fn find_similar(&self, name: String) -> Result<Option<SupplementFact>, CoreError> {
        if name.chars().count() < MIN_SIMILAR_QUERY_CHARS {
            return Ok(None);
        }

        let statement = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT * FROM supplement_facts
            WHERE lower(name) LIKE '%' || $1 || '%' ESCAPE '\'
               OR $2 LIKE '%' || lower(name) || '%'
            ORDER BY length(name) ASC
            LIMIT 1
            "#,
            [escape_like(&name).into(), name.into()],
        );

        self.find_one(statement, "similar").await
    }

    async fn save(&self, fact: SupplementFact) -> Result<SupplementFact, CoreError> {
        let active_model = ActiveModel {
            id: Set(fact.id),
            name: Set(fact.name),
            aliases: Set(fact.aliases),
            typical_use: Set(fact.typical_use),
            typical_dosage: Set(fact.typical_dosage),
            source: Set(fact.source),
            created_at: Set(fact.created_at.fixed_offset()),
            updated_at: Set(fact.updated_at.fixed_offset()),
        };

        let stored = Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(Column::Name)
                    .update_columns([
                        Column::TypicalUse,
                        Column::TypicalDosage,
                        Column::Source,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to save supplement facts: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(SupplementFact::from(stored))
    }
}
