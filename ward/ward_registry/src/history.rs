use ward_record::{PatientId, PatientRecord};

/// Append-only list of discharged patients, oldest first.
#[derive(Debug, Clone, Default)]
pub struct DischargeHistory {
    entries: Vec<PatientRecord>,
}

impl DischargeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, patient: PatientRecord) {
        self.entries.push(patient);
    }

    /// Earliest discharge of this id. A patient discharged twice is listed
    /// twice; this returns the first.
    pub fn find(&self, id: PatientId) -> Option<&PatientRecord> {
        self.entries.iter().find(|p| p.id() == id)
    }

    pub fn entries(&self) -> &[PatientRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
