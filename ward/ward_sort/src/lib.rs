//! Snapshot sorting.
//!
//! Both sorts work on a sequence already copied out of an index (see
//! `SearchTree::in_order`), never on tree nodes, and reorder it in place.
//!
//! ```
//! use ward_record::{PatientRecord, Priority};
//! use ward_sort::sort_by_priority;
//!
//! let mk = |id, p| PatientRecord::new(id, "n", 30, "c", p, "2024-01-01", "d");
//! let mut v = vec![
//!     mk(1, Priority::NonCritical),
//!     mk(2, Priority::Emergency),
//!     mk(3, Priority::Critical),
//! ];
//! sort_by_priority(&mut v);
//! let tiers: Vec<u8> = v.iter().map(|p| p.priority().ordinal()).collect();
//! assert_eq!(tiers, vec![1, 2, 3]);
//! ```
mod merge;
mod quick;

use std::fmt;
use std::str::FromStr;

use ward_record::PatientRecord;

/// Order records by triage tier, Emergency first.
///
/// Lomuto quick sort with the last element as pivot. Records of equal tier
/// may come out in any relative order.
pub fn sort_by_priority(records: &mut [PatientRecord]) {
    quick::quick_sort_by_key(records, |p| p.priority().ordinal());
}

/// Order records by admission date, earliest first.
///
/// Top-down merge sort comparing the `YYYY-MM-DD` text byte-wise; stable.
/// Dates in any other shape sort in an unspecified but non-panicking order.
pub fn sort_by_admission_date(records: &mut [PatientRecord]) {
    merge::merge_sort_by(records, |a, b| a.admission_date() <= b.admission_date());
}

/// Sort order offered to registry callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Priority,
    AdmissionDate,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Priority => f.write_str("priority"),
            SortKey::AdmissionDate => f.write_str("date"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "priority" | "p" | "1" => Ok(SortKey::Priority),
            "date" | "admission" | "admission_date" | "d" | "2" => Ok(SortKey::AdmissionDate),
            other => Err(format!("unknown sort key '{other}' (expected priority or date)")),
        }
    }
}

pub fn sort_snapshot(records: &mut [PatientRecord], key: SortKey) {
    log::debug!("sorting {} records by {key}", records.len());
    match key {
        SortKey::Priority => sort_by_priority(records),
        SortKey::AdmissionDate => sort_by_admission_date(records),
    }
}
