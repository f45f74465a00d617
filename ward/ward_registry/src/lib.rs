//! Patient registry: one logical record set held in two redundant indices.
//!
//! [`Registry`] keeps an [`OrderedIndex`](ward_index::OrderedIndex) and a
//! [`BalancedIndex`](ward_index::BalancedIndex) over the same live ids and
//! appends every discharged patient to a [`DischargeHistory`].
//!
//! ```
//! use ward_registry::Registry;
//!
//! let mut reg = Registry::with_sample_data();
//! let out = reg.discharge(103).unwrap();
//! assert_eq!(out.name(), "Bob Wilson");
//! assert!(reg.search(103).is_none());
//! assert_eq!(reg.history().len(), 1);
//! ```
pub mod history;
pub mod registry;
pub mod sample;
pub mod stats;

pub use history::DischargeHistory;
pub use registry::{Registry, RegistryError};
pub use stats::Statistics;
