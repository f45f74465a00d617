//! Read-only filters and aggregates.
//!
//! Every query takes a full in-order snapshot and scans it once, whatever
//! its selectivity. None of them uses the tree shape to prune.

use ward_record::{PatientRecord, Priority};

use crate::tree::SearchTree;

impl<B> SearchTree<B> {
    /// Live records whose age lies in `min..=max`, ascending by id.
    pub fn by_age_range(&self, min: u32, max: u32) -> Vec<PatientRecord> {
        self.in_order()
            .into_iter()
            .filter(|p| p.age() >= min && p.age() <= max)
            .collect()
    }

    /// Live records whose condition contains `needle` (case-sensitive).
    pub fn by_condition(&self, needle: &str) -> Vec<PatientRecord> {
        self.in_order()
            .into_iter()
            .filter(|p| p.condition().contains(needle))
            .collect()
    }

    pub fn by_priority(&self, priority: Priority) -> Vec<PatientRecord> {
        self.in_order()
            .into_iter()
            .filter(|p| p.priority() == priority)
            .collect()
    }

    pub fn count_by_priority(&self, priority: Priority) -> usize {
        self.in_order()
            .iter()
            .filter(|p| p.priority() == priority)
            .count()
    }

    /// Mean tier ordinal of the live records, or 0.0 for none.
    pub fn average_priority(&self) -> f64 {
        let all = self.in_order();
        if all.is_empty() {
            return 0.0;
        }
        let sum: f64 = all.iter().map(|p| f64::from(p.priority().ordinal())).sum();
        sum / all.len() as f64
    }
}
