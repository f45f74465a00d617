use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::priority::Priority;

/// Unique key of a patient across every index.
pub type PatientId = i64;

/// One admitted patient.
///
/// The `id` is fixed at construction and has no setter: indices key on it,
/// so a record handed out for in-place mutation cannot be re-keyed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatientRecord {
    id: PatientId,
    name: String,
    age: u32,
    condition: String,
    priority: Priority,
    admission_date: String,
    physician: String,
    #[cfg_attr(feature = "serde", serde(default))]
    deleted: bool,
}

impl PatientRecord {
    pub fn new(
        id: PatientId,
        name: impl Into<String>,
        age: u32,
        condition: impl Into<String>,
        priority: Priority,
        admission_date: impl Into<String>,
        physician: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            condition: condition.into(),
            priority,
            admission_date: admission_date.into(),
            physician: physician.into(),
            deleted: false,
        }
    }

    #[inline]
    pub fn id(&self) -> PatientId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    #[inline]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Admission date as stored, expected in `YYYY-MM-DD` shape.
    pub fn admission_date(&self) -> &str {
        &self.admission_date
    }

    pub fn physician(&self) -> &str {
        &self.physician
    }

    /// Whether the record carries the soft-delete marker.
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_age(&mut self, age: u32) {
        self.age = age;
    }

    pub fn set_condition(&mut self, condition: impl Into<String>) {
        self.condition = condition.into();
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn set_admission_date(&mut self, date: impl Into<String>) {
        self.admission_date = date.into();
    }

    pub fn set_physician(&mut self, physician: impl Into<String>) {
        self.physician = physician.into();
    }

    /// Tombstone the record. There is no way back; a discharged patient is
    /// re-admitted with a fresh record.
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}

impl fmt::Display for PatientRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Age: {}, Condition: {}, Priority: {}, Admission: {}, Physician: {}",
            self.id,
            self.name,
            self.age,
            self.condition,
            self.priority,
            self.admission_date,
            self.physician
        )?;
        if self.deleted {
            f.write_str(" [DELETED]")?;
        }
        Ok(())
    }
}
