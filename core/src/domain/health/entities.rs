use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DatabaseHealthStatus {
    pub status: String,
    pub latency_ms: u64,
}

impl DatabaseHealthStatus {
    pub fn up(latency_ms: u64) -> Self {
        Self {
            status: "UP".to_string(),
            latency_ms,
        }
    }
}
