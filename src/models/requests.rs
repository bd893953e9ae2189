use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to find scholarship matches for an applicant
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "applicantId")]
    pub applicant_id: String,
}
