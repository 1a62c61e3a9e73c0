use sea_orm::DatabaseConnection;
use test_context::AsyncTestContext;
use uuid::Uuid;

use super::postgres::{Postgres, PostgresConfig};

const TEST_DATABASE_URL: &str = "TEST_DATABASE_URL";

/// Migrated Postgres for repository tests.
///
/// `db` is `None` when `TEST_DATABASE_URL` is unset; tests then return early.
pub(crate) struct PostgresContext {
    pub db: Option<DatabaseConnection>,
    /// Unique per test, so rows never collide across concurrent tests.
    pub token: String,
}

impl AsyncTestContext for PostgresContext {
    async fn setup() -> Self {
        let token = Uuid::new_v4().simple().to_string();

        let Ok(database_url) = std::env::var(TEST_DATABASE_URL) else {
            eprintln!("{TEST_DATABASE_URL} is not set, skipping database test");
            return Self { db: None, token };
        };

        let postgres = Postgres::new(PostgresConfig { database_url })
            .await
            .expect("test database should be reachable");

        Self {
            db: Some(postgres.get_db()),
            token,
        }
    }
}
