//! Tree indices over patient records.
//!
//! Two indices share one implementation, [`SearchTree`], and differ only in
//! the rebalancing hook applied on the way back up from every insert and
//! delete:
//!
//! - [`OrderedIndex`]: plain binary search tree, no rebalancing. Insertion
//!   order decides its shape and it may degrade to a list.
//! - [`BalancedIndex`]: AVL tree. Every ancestor of a changed node is
//!   rebalanced with rotations so sibling heights never differ by more than
//!   one.
//!
//! Both are keyed by [`PatientId`](ward_record::PatientId).
//!
//! ```
//! use ward_index::BalancedIndex;
//! use ward_record::{PatientRecord, Priority};
//!
//! let mut avl = BalancedIndex::new();
//! for id in 101..=105 {
//!     let p = PatientRecord::new(id, "n", 40, "c", Priority::Critical, "2024-01-15", "d");
//!     avl.insert(p).unwrap();
//! }
//! assert!(avl.is_balanced());
//! assert_eq!(avl.height(), 3);
//! ```
pub mod balance;
pub mod dump;
pub mod error;
pub mod node;
pub mod query;
pub mod tree;

pub use balance::{AvlBalance, Rebalance, Unbalanced};
pub use dump::LevelEntry;
pub use error::IndexError;
pub use node::TreeNode;
pub use tree::SearchTree;

/// Baseline binary search tree keyed by patient id.
pub type OrderedIndex = SearchTree<Unbalanced>;

/// Height-balanced (AVL) search tree keyed by patient id.
pub type BalancedIndex = SearchTree<AvlBalance>;
