// src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body sent to the backend query endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Response body returned by the backend. The backend also sends bookkeeping
/// fields (`status`, `source`, `confidence_score`); only `response` is
/// consumed and unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub response: Option<String>,
}

/// Logs details of each backend call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExchangeLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub query_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}
