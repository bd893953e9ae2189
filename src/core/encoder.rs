use crate::models::{ApplicantProfile, ScholarshipRecord};

/// Build the descriptive text that represents an applicant to the encoder.
///
/// Labeled concatenation of the profile's semantic fields; the embedding of
/// this string is what scholarship descriptions are ranked against.
pub fn applicant_text(profile: &ApplicantProfile) -> String {
    format!(
        "Age: {}, Country: {}, Education: {}, GPA: {}, Field: {}, Financial Need: {}",
        profile.age,
        profile.country,
        profile.education_level,
        profile.gpa,
        profile.field_of_study,
        profile.financial_need,
    )
}

/// Build the descriptive text that represents a scholarship to the encoder.
///
/// Absent optional fields render as empty strings rather than being dropped,
/// so the label structure stays fixed across records.
pub fn scholarship_text(scholarship: &ScholarshipRecord) -> String {
    format!(
        "Name: {}, Description: {}, Requirements: {}, Field: {}, Country: {}",
        scholarship.name,
        scholarship.description,
        scholarship.requirements,
        scholarship.field_of_study.as_deref().unwrap_or(""),
        scholarship.country.as_deref().unwrap_or(""),
    )
}
