use crate::models::{ApplicantProfile, ScholarshipRecord};

/// Check whether an applicant may apply to a scholarship.
///
/// A scholarship is excluded if any hard bound fails; a bound that is absent
/// imposes no constraint. This is the deterministic pre-screen that runs
/// before any similarity ranking.
#[inline]
pub fn is_eligible(applicant: &ApplicantProfile, scholarship: &ScholarshipRecord) -> bool {
    // GPA floor
    if let Some(min_gpa) = scholarship.min_gpa {
        if applicant.gpa < min_gpa {
            return false;
        }
    }

    // Age range
    if let Some(min_age) = scholarship.min_age {
        if applicant.age < min_age {
            return false;
        }
    }
    if let Some(max_age) = scholarship.max_age {
        if applicant.age > max_age {
            return false;
        }
    }

    // Country restriction ("International" means open to everyone)
    if let Some(country) = scholarship.country_restriction() {
        if applicant.country != country {
            return false;
        }
    }

    // Education level, exact match when restricted
    if let Some(level) = scholarship.education_level_restriction() {
        if applicant.education_level != level {
            return false;
        }
    }

    // Field of study, loose token overlap when restricted
    if let Some(field) = scholarship.field_restriction() {
        if !field_of_study_overlaps(&applicant.field_of_study, field) {
            return false;
        }
    }

    true
}

/// Loose bidirectional field-of-study match.
///
/// Both fields are lower-cased; overlap holds if any whitespace token of one
/// field appears as a substring of the other field. Any partial overlap
/// passes ("Computer Science" matches "Computer Science Engineering" but also
/// "Data Science"). This is the product rule, kept as-is despite its known
/// false positives on common words.
pub fn field_of_study_overlaps(applicant_field: &str, scholarship_field: &str) -> bool {
    let applicant_lower = applicant_field.to_lowercase();
    let scholarship_lower = scholarship_field.to_lowercase();

    scholarship_lower
        .split_whitespace()
        .any(|token| applicant_lower.contains(token))
        || applicant_lower
            .split_whitespace()
            .any(|token| scholarship_lower.contains(token))
}

/// Reduce the full catalog to the scholarships the applicant is allowed to
/// apply to, preserving catalog order.
pub fn filter_eligible(
    applicant: &ApplicantProfile,
    scholarships: Vec<ScholarshipRecord>,
) -> Vec<ScholarshipRecord> {
    scholarships
        .into_iter()
        .filter(|scholarship| is_eligible(applicant, scholarship))
        .collect()
}
