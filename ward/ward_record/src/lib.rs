//! Patient record primitives for the Ward registry.
//!
//! A [`PatientRecord`] is the value stored in every index node. Records are
//! moved and cloned by value between layers; nothing hands out shared
//! mutable access to them.
//!
//! ```
//! use ward_record::{PatientRecord, Priority};
//! let mut p = PatientRecord::new(
//!     101,
//!     "John Doe",
//!     45,
//!     "Heart Attack",
//!     Priority::Emergency,
//!     "2024-01-15",
//!     "Dr. Smith",
//! );
//! assert_eq!(p.priority().ordinal(), 1);
//! p.mark_deleted();
//! assert!(p.is_deleted());
//! ```
pub mod priority;
pub mod record;
pub mod validate;

pub use priority::Priority;
pub use record::{PatientId, PatientRecord};
pub use validate::{validate_admission_date, validate_priority, validate_record, ValidationError};
