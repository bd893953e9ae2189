use crate::core::{
    eligibility::filter_eligible,
    encoder::{applicant_text, scholarship_text},
    scoring::{self, ScoreError},
};
use crate::models::{ApplicantProfile, ScholarshipMatch, ScholarshipRecord, ScoredCandidate};
use crate::services::embedding::{EmbeddingError, TextEncoder};
use thiserror::Error;

/// Number of matches returned when no other limit is configured.
pub const DEFAULT_TOP_K: usize = 3;

/// Errors that abort a ranking call.
///
/// Ranking is all-or-nothing: any encoder or scorer failure surfaces as a
/// single error and no partial result is returned.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("embedding generation failed: {0}")]
    Encoding(#[from] EmbeddingError),

    #[error("encoder returned a {actual}-dimension vector, expected {expected}")]
    MalformedEmbedding { expected: usize, actual: usize },

    #[error("encoder returned {actual} vectors for {expected} inputs")]
    BatchSizeMismatch { expected: usize, actual: usize },

    #[error("similarity scoring failed: {0}")]
    Scoring(#[from] ScoreError),
}

/// Result of one ranking call
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<ScholarshipMatch>,
    pub total_candidates: usize,
    pub eligible_candidates: usize,
}

/// Main matching orchestrator
///
/// # Pipeline stages
/// 1. Rule-based eligibility filtering
/// 2. Encoding (applicant once, each eligible scholarship once)
/// 3. Cosine similarity scoring
/// 4. Ranking and top-K truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    top_k: usize,
}

impl Matcher {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    pub fn with_default_top_k() -> Self {
        Self { top_k: DEFAULT_TOP_K }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Rank the catalog against an applicant profile.
    ///
    /// An empty eligible set is a successful outcome with no matches, not an
    /// error. Ties on score keep the catalog order (stable sort, no secondary
    /// key).
    ///
    /// # Arguments
    /// * `applicant` - The applicant profile to match for
    /// * `scholarships` - The full scholarship catalog from the store
    /// * `encoder` - Text encoder used for both sides of the comparison
    pub async fn rank(
        &self,
        applicant: &ApplicantProfile,
        scholarships: Vec<ScholarshipRecord>,
        encoder: &dyn TextEncoder,
    ) -> Result<MatchOutcome, MatchError> {
        let total_candidates = scholarships.len();

        // Stage 1: deterministic eligibility pre-screen
        let eligible = filter_eligible(applicant, scholarships);
        let eligible_candidates = eligible.len();

        if eligible.is_empty() {
            return Ok(MatchOutcome {
                matches: Vec::new(),
                total_candidates,
                eligible_candidates,
            });
        }

        // Stage 2: encode the applicant once, then the eligible set in one
        // batch. One encoding per record, never per pair.
        let applicant_vector = encoder.embed(&applicant_text(applicant)).await?;
        check_dimension(&applicant_vector, encoder.dimension())?;

        let texts: Vec<String> = eligible.iter().map(scholarship_text).collect();
        let vectors = encoder.embed_batch(&texts).await?;
        if vectors.len() != eligible.len() {
            return Err(MatchError::BatchSizeMismatch {
                expected: eligible.len(),
                actual: vectors.len(),
            });
        }

        // Stage 3: score every (applicant, scholarship) pair
        let mut scored: Vec<ScoredCandidate> = Vec::with_capacity(eligible.len());
        for (scholarship, vector) in eligible.into_iter().zip(vectors) {
            check_dimension(&vector, encoder.dimension())?;
            let score = scoring::cosine_similarity(&applicant_vector, &vector)?;
            scored.push(ScoredCandidate { scholarship, score });
        }

        // Stage 4: sort by similarity (descending, stable) and truncate
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(self.top_k);

        let matches = scored
            .into_iter()
            .map(|candidate| {
                let confidence = scoring::confidence(candidate.score);
                let scholarship = candidate.scholarship;
                ScholarshipMatch {
                    id: scholarship.id,
                    name: scholarship.name,
                    description: scholarship.description,
                    amount: scholarship.amount,
                    deadline: scholarship.deadline,
                    confidence,
                    requirements: scholarship.requirements,
                    application_url: scholarship.application_url,
                }
            })
            .collect();

        Ok(MatchOutcome {
            matches,
            total_candidates,
            eligible_candidates,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_top_k()
    }
}

fn check_dimension(vector: &[f32], expected: usize) -> Result<(), MatchError> {
    if vector.is_empty() || vector.len() != expected {
        return Err(MatchError::MalformedEmbedding {
            expected,
            actual: vector.len(),
        });
    }
    Ok(())
}
