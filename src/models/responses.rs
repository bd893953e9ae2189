use serde::{Deserialize, Serialize};
use crate::models::domain::ScholarshipMatch;

/// Response envelope for the match endpoint.
///
/// An empty eligible set is a successful outcome: `success` stays true,
/// `matches` is empty, and `message` explains why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub success: bool,
    pub matches: Vec<ScholarshipMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response for malformed requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
