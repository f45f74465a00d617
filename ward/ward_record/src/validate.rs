use crate::priority::Priority;
use crate::record::{PatientId, PatientRecord};

/// Field-level rejection raised before a record ever reaches an index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("priority must be 1 (emergency), 2 (critical) or 3 (non-critical), got {0}")]
    Priority(i64),
    #[error("admission date must be YYYY-MM-DD, got '{0}'")]
    AdmissionDate(String),
    #[error("record {0} is already discharged")]
    Discharged(PatientId),
}

/// Map a raw tier number onto a [`Priority`].
pub fn validate_priority(n: i64) -> Result<Priority, ValidationError> {
    Priority::from_ordinal(n).ok_or(ValidationError::Priority(n))
}

/// Shape check only: ten bytes with dashes at offsets 4 and 7.
///
/// Digits are not inspected. The date sort compares the text
/// lexicographically, which is only meaningful for this fixed-width shape.
pub fn validate_admission_date(date: &str) -> Result<(), ValidationError> {
    let b = date.as_bytes();
    if b.len() == 10 && b[4] == b'-' && b[7] == b'-' {
        Ok(())
    } else {
        Err(ValidationError::AdmissionDate(date.to_string()))
    }
}

/// Checks applied before admission: the date shape, and that the record is
/// not already tombstoned.
pub fn validate_record(record: &PatientRecord) -> Result<(), ValidationError> {
    if record.is_deleted() {
        return Err(ValidationError::Discharged(record.id()));
    }
    validate_admission_date(record.admission_date())
}
