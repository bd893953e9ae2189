use crate::models::{ApplicantProfile, ScholarshipRecord};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the Supabase record store
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Supabase REST (PostgREST) client
///
/// Read-only access to the record store:
/// - Fetching an applicant profile by id
/// - Fetching the full scholarship catalog
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
    tables: SupabaseTables,
}

/// Table names in the Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub applicants: String,
    pub scholarships: String,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(base_url: String, api_key: String, tables: SupabaseTables) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
            tables,
        }
    }

    /// Fetch an applicant profile by id
    pub async fn get_applicant(
        &self,
        applicant_id: &str,
    ) -> Result<ApplicantProfile, SupabaseError> {
        let url = format!(
            "{}/rest/v1/{}?id=eq.{}&select=*&limit=1",
            self.base_url.trim_end_matches('/'),
            self.tables.applicants,
            urlencoding::encode(applicant_id),
        );

        tracing::debug!("Fetching applicant profile: {}", applicant_id);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SupabaseError::Unauthorized);
        }
        if !status.is_success() {
            return Err(SupabaseError::ApiError(format!(
                "Failed to fetch applicant: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        // PostgREST returns a bare JSON array of rows
        let rows = json
            .as_array()
            .ok_or_else(|| SupabaseError::InvalidResponse("Expected a JSON array".into()))?;

        let row = rows.first().ok_or_else(|| {
            SupabaseError::NotFound(format!("Applicant not found: {}", applicant_id))
        })?;

        serde_json::from_value(row.clone())
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse applicant: {}", e)))
    }

    /// Fetch the full scholarship catalog.
    ///
    /// Rows that fail to parse are skipped rather than failing the whole
    /// fetch; the skip count is logged.
    pub async fn list_scholarships(&self) -> Result<Vec<ScholarshipRecord>, SupabaseError> {
        let url = format!(
            "{}/rest/v1/{}?select=*",
            self.base_url.trim_end_matches('/'),
            self.tables.scholarships,
        );

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SupabaseError::Unauthorized);
        }
        if !status.is_success() {
            return Err(SupabaseError::ApiError(format!(
                "Failed to fetch scholarships: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        let rows = json
            .as_array()
            .ok_or_else(|| SupabaseError::InvalidResponse("Expected a JSON array".into()))?;

        let scholarships: Vec<ScholarshipRecord> = rows
            .iter()
            .filter_map(|row| serde_json::from_value(row.clone()).ok())
            .collect();

        if scholarships.len() < rows.len() {
            tracing::warn!(
                "Skipped {} malformed scholarship rows",
                rows.len() - scholarships.len()
            );
        }
        tracing::debug!("Fetched {} scholarship records", scholarships.len());

        Ok(scholarships)
    }
}
