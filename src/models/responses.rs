use serde::{Deserialize, Serialize};
use crate::core::MatchResult;
use crate::models::domain::ScoredRecord;

/// Response for the food truck search endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TruckSearchResponse {
    pub num_results: usize,
    pub total_results_found: usize,
    pub location_query: String,
    pub items: Vec<ScoredRecord>,
}

impl From<MatchResult> for TruckSearchResponse {
    fn from(result: MatchResult) -> Self {
        Self {
            num_results: result.page.len(),
            total_results_found: result.total_matched,
            location_query: result.query.origin.to_string(),
            items: result.page,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error envelope: `{"error": {"type": ..., "message": ...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                kind: kind.into(),
                message: message.into(),
            },
        }
    }
}
