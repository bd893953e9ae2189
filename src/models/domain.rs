use serde::{Deserialize, Serialize};

/// Country sentinel meaning a scholarship is open to applicants worldwide.
pub const UNRESTRICTED_COUNTRY: &str = "International";

/// Applicant profile with academic and demographic data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub id: String,
    pub age: u8,
    pub country: String,
    pub education_level: String,
    pub gpa: f64,
    pub field_of_study: String,
    #[serde(default)]
    pub financial_need: bool,
    /// Used only by the notification layer, never by the matching core.
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Scholarship record as stored in the catalog.
///
/// Bound fields (`min_gpa`, `min_age`, `max_age`) and restriction fields
/// (`country`, `education_level`, `field_of_study`) default to unconstrained
/// when the store column is null or absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScholarshipRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub requirements: String,
    #[serde(default)]
    pub field_of_study: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub education_level: Option<String>,
    #[serde(default)]
    pub min_gpa: Option<f64>,
    #[serde(default)]
    pub min_age: Option<u8>,
    #[serde(default)]
    pub max_age: Option<u8>,
    pub amount: f64,
    pub deadline: String,
    pub application_url: String,
}

impl ScholarshipRecord {
    /// Country the scholarship is restricted to, if any.
    ///
    /// The store uses both null and empty strings for "open to everyone",
    /// and the "International" sentinel also means unrestricted.
    pub fn country_restriction(&self) -> Option<&str> {
        self.country
            .as_deref()
            .filter(|c| !c.is_empty() && *c != UNRESTRICTED_COUNTRY)
    }

    /// Required education level, if any (empty string means unrestricted).
    pub fn education_level_restriction(&self) -> Option<&str> {
        self.education_level.as_deref().filter(|e| !e.is_empty())
    }

    /// Field of study the scholarship targets, if any.
    pub fn field_restriction(&self) -> Option<&str> {
        self.field_of_study.as_deref().filter(|f| !f.is_empty())
    }
}

/// A scholarship paired with its similarity score, transient within one
/// ranking call.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub scholarship: ScholarshipRecord,
    pub score: f32,
}

/// Formatted match returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScholarshipMatch {
    pub id: String,
    pub name: String,
    pub description: String,
    pub amount: f64,
    pub deadline: String,
    /// Similarity score rescaled to a 0-100 percentage, one decimal place.
    pub confidence: f64,
    pub requirements: String,
    pub application_url: String,
}
