use crate::constants::{NO_MATCH_REPLY, QUERY_PATH};
use crate::errors::{ParleyError, ParleyResult};
use crate::logging;
use crate::models::{ExchangeLog, QueryRequest, QueryResponse};
use chrono::Utc;
use reqwest::Client;
use std::time::{Duration, Instant};

/// HTTP client for the backend query endpoint. One instance is built at
/// startup and cloned into each dispatch task.
#[derive(Debug, Clone)]
pub struct QueryClient {
    base_url: String,
    http: Client,
}

impl QueryClient {
    pub fn new(base_url: &str, timeout: Duration) -> ParleyResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ParleyError::config_error("backend_url must not be empty"));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ParleyError::api_error(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one query and returns the reply text. A missing or empty
    /// `response` field maps to the no-match fallback; transport and status
    /// failures surface as errors for the caller to convert.
    pub async fn send(&self, query: &str) -> ParleyResult<String> {
        let url = format!("{}{}", self.base_url, QUERY_PATH);
        let started = Instant::now();

        let response = self
            .http
            .post(&url)
            .json(&QueryRequest {
                query: query.to_string(),
            })
            .send()
            .await
            .map_err(|e| ParleyError::api_error(format!("Request failed: {}", e)))?;

        let status = response.status();
        logging::log_exchange(&ExchangeLog {
            timestamp: Utc::now(),
            endpoint: url,
            query_summary: summarize(query),
            response_status: status.as_u16(),
            response_time_ms: started.elapsed().as_millis(),
        });

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ParleyError::api_error(format!(
                "Backend returned error: {} - {}",
                status, error_text
            )));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| ParleyError::api_error(format!("Failed to parse backend response: {}", e)))?;

        match body.response {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Ok(NO_MATCH_REPLY.to_string()),
        }
    }
}

/// Short single-line form of a query for the exchange log.
fn summarize(query: &str) -> String {
    let flattened: String = query
        .chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .take(80)
        .collect();
    if query.chars().count() > 80 {
        format!("{}...", flattened)
    } else {
        flattened
    }
}
