use ward_record::PatientId;

/// Recoverable index outcomes. None of them leaves a partial change behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    #[error("patient id {0} already exists")]
    DuplicateKey(PatientId),
    #[error("patient with id {0} not found")]
    NotFound(PatientId),
    /// A mutation handle tried to replace a record with one under another key.
    #[error("record {expected} cannot be re-keyed to {found}")]
    KeyChanged { expected: PatientId, found: PatientId },
}
