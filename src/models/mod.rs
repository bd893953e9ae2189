// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{ApplicantProfile, ScholarshipRecord, ScoredCandidate, ScholarshipMatch, UNRESTRICTED_COUNTRY};
pub use requests::MatchRequest;
pub use responses::{MatchResponse, HealthResponse, ErrorResponse};
