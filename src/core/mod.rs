// Core algorithm exports
pub mod eligibility;
pub mod encoder;
pub mod matcher;
pub mod scoring;

pub use eligibility::{field_of_study_overlaps, filter_eligible, is_eligible};
pub use encoder::{applicant_text, scholarship_text};
pub use matcher::{MatchError, MatchOutcome, Matcher, DEFAULT_TOP_K};
pub use scoring::{confidence, cosine_similarity, ScoreError};
