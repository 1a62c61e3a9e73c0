use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;
pub mod text;

#[derive(Clone, Debug)]
pub struct StackCheckConfig {
    pub database: DatabaseConfig,
    pub llm: LLMConfig,
    pub classifier: ClassifierConfig,
    pub sources: SourcesConfig,
    pub cache: CacheConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.name
        )
    }
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassifierKind {
    Model,
    Heuristic,
}

#[derive(Clone, Debug)]
pub struct ClassifierConfig {
    pub kind: ClassifierKind,
    pub memo_capacity: usize,
}

#[derive(Clone, Debug)]
pub struct SourcesConfig {
    pub suppai_base_url: String,
    pub webmd_base_url: String,
    pub wikipedia_base_url: String,
}

#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub interaction_ttl_days: i64,
    pub recent_stacks_capacity: usize,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}

/// Lower-cases and trims a user supplied supplement name.
///
/// Every identity operation (cache keys, fact lookups, de-duplication) goes
/// through this function.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
