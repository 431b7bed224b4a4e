//! Column semantics of the job-change dataset.
//!
//! Everything here is static: the 14-column schema, the two boolean
//! lookup tables, the five ordinal scales and the filter thresholds.

use crate::classification::Classification;
use crate::error::Result;
use crate::mapping::BooleanMapping;
use crate::scale::OrdinalScale;

pub const STUDENT_ID: &str = "student_id";
pub const CITY: &str = "city";
pub const CITY_DEVELOPMENT_INDEX: &str = "city_development_index";
pub const GENDER: &str = "gender";
pub const RELEVANT_EXPERIENCE: &str = "relevant_experience";
pub const ENROLLED_UNIVERSITY: &str = "enrolled_university";
pub const EDUCATION_LEVEL: &str = "education_level";
pub const MAJOR_DISCIPLINE: &str = "major_discipline";
pub const EXPERIENCE: &str = "experience";
pub const COMPANY_SIZE: &str = "company_size";
pub const COMPANY_TYPE: &str = "company_type";
pub const LAST_NEW_JOB: &str = "last_new_job";
pub const TRAINING_HOURS: &str = "training_hours";
pub const JOB_CHANGE: &str = "job_change";

/// Header of the source file, in file order.
pub const REFERENCE_SCHEMA: [&str; 14] = [
    STUDENT_ID,
    CITY,
    CITY_DEVELOPMENT_INDEX,
    GENDER,
    RELEVANT_EXPERIENCE,
    ENROLLED_UNIVERSITY,
    EDUCATION_LEVEL,
    MAJOR_DISCIPLINE,
    EXPERIENCE,
    COMPANY_SIZE,
    COMPANY_TYPE,
    LAST_NEW_JOB,
    TRAINING_HOURS,
    JOB_CHANGE,
];

/// Minimum `experience` label kept by the row filter.
pub const EXPERIENCE_THRESHOLD: &str = "10";

/// Minimum `company_size` label kept by the row filter.
pub const COMPANY_SIZE_THRESHOLD: &str = "1000-4999";

pub fn relevant_experience_mapping() -> BooleanMapping {
    BooleanMapping::new()
        .text("No relevant experience", false)
        .text("Has relevant experience", true)
}

pub fn job_change_mapping() -> BooleanMapping {
    BooleanMapping::new().number(0.0, false).number(1.0, true)
}

pub fn enrolled_university_scale() -> Result<OrdinalScale> {
    OrdinalScale::new(["no_enrollment", "Part time course", "Full time course"])
}

pub fn education_level_scale() -> Result<OrdinalScale> {
    OrdinalScale::new(["Primary School", "High School", "Graduate", "Masters", "Phd"])
}

/// `<1`, `1` through `20`, then `>20`.
pub fn experience_scale() -> Result<OrdinalScale> {
    let labels = std::iter::once("<1".to_string())
        .chain((1..=20).map(|years: u8| years.to_string()))
        .chain(std::iter::once(">20".to_string()));
    OrdinalScale::new(labels)
}

pub fn company_size_scale() -> Result<OrdinalScale> {
    OrdinalScale::new([
        "<10",
        "10-49",
        "50-99",
        "100-499",
        "500-999",
        "1000-4999",
        "5000-9999",
        "10000+",
    ])
}

pub fn last_new_job_scale() -> Result<OrdinalScale> {
    OrdinalScale::new(["never", "1", "2", "3", "4", ">4"])
}

/// Classification of the 14 reference columns.
///
/// `city`, `gender`, `major_discipline` and `company_type` carry no
/// explicit rule and fall into the nominal class.
pub fn reference_classification() -> Result<Classification> {
    Classification::builder(REFERENCE_SCHEMA)
        .boolean(RELEVANT_EXPERIENCE, relevant_experience_mapping())
        .boolean(JOB_CHANGE, job_change_mapping())
        .int32(STUDENT_ID)
        .int32(TRAINING_HOURS)
        .float16(CITY_DEVELOPMENT_INDEX)
        .ordinal(ENROLLED_UNIVERSITY, enrolled_university_scale()?)
        .ordinal(EDUCATION_LEVEL, education_level_scale()?)
        .ordinal(EXPERIENCE, experience_scale()?)
        .ordinal(COMPANY_SIZE, company_size_scale()?)
        .ordinal(LAST_NEW_JOB, last_new_job_scale()?)
        .build()
}
