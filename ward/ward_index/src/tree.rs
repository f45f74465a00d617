//! The search-tree core shared by both indices.
//!
//! Structural operations detach every node on the search path from its
//! parent slot, change the bottom of the path, then reattach the path
//! bottom-up. Ownership of every node stays with exactly one slot or the
//! path stack, and no operation recurses once per level, so a plain tree
//! degraded to a chain is safe at any length. The `B: Rebalance` hook runs
//! at each reattached node after its height has been refreshed.

use std::cmp::Ordering;
use std::marker::PhantomData;

use ward_record::{PatientId, PatientRecord};

use crate::balance::{AvlBalance, Rebalance};
use crate::error::IndexError;
use crate::node::{Link, TreeNode};

/// Search tree keyed by patient id, parameterised by its rebalancing hook.
///
/// See [`OrderedIndex`](crate::OrderedIndex) and
/// [`BalancedIndex`](crate::BalancedIndex).
#[derive(Debug)]
pub struct SearchTree<B> {
    root: Link,
    live: usize,
    _hook: PhantomData<B>,
}

impl<B> Default for SearchTree<B> {
    fn default() -> Self {
        Self {
            root: None,
            live: 0,
            _hook: PhantomData,
        }
    }
}

impl<B> SearchTree<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live record with this id, if any. Tombstoned records are reported as
    /// absent even though their node is still in the tree.
    pub fn search(&self, id: PatientId) -> Option<&PatientRecord> {
        self.find_node(id)
            .map(|n| &n.record)
            .filter(|r| !r.is_deleted())
    }

    pub fn contains(&self, id: PatientId) -> bool {
        self.search(id).is_some()
    }

    /// Run `f` against the live record stored under `id`.
    ///
    /// The borrow ends with the call. Tombstoning the record inside `f`
    /// takes it out of the live count; the node stays until
    /// [`purge`](Self::purge) excises it. Replacing the record with one
    /// under a different id is undone and reported as
    /// [`IndexError::KeyChanged`].
    pub fn modify<R>(
        &mut self,
        id: PatientId,
        f: impl FnOnce(&mut PatientRecord) -> R,
    ) -> Result<R, IndexError> {
        let node = match self.find_node_mut(id) {
            Some(n) if !n.record.is_deleted() => n,
            _ => return Err(IndexError::NotFound(id)),
        };
        let before = node.record.clone();
        let out = f(&mut node.record);
        let found = node.record.id();
        if found != id {
            log::warn!("refusing to re-key patient {id} to {found}");
            node.record = before;
            return Err(IndexError::KeyChanged {
                expected: id,
                found,
            });
        }
        let tombstoned = node.record.is_deleted();
        if tombstoned {
            log::debug!("patient {id} tombstoned in place");
            self.live -= 1;
        }
        Ok(out)
    }

    /// Snapshot of the live records in ascending id order.
    pub fn in_order(&self) -> Vec<PatientRecord> {
        let mut out = Vec::with_capacity(self.live);
        let mut stack: Vec<&TreeNode> = Vec::new();
        let mut cur = self.root.as_deref();
        loop {
            while let Some(n) = cur {
                stack.push(n);
                cur = n.left.as_deref();
            }
            let Some(n) = stack.pop() else {
                break;
            };
            if !n.record.is_deleted() {
                out.push(n.record.clone());
            }
            cur = n.right.as_deref();
        }
        out
    }

    /// Height of the root; 0 for an empty tree.
    #[inline]
    pub fn height(&self) -> u32 {
        crate::node::height(&self.root)
    }

    /// Number of live records.
    #[inline]
    pub fn size(&self) -> usize {
        self.live
    }

    /// True when the tree holds no nodes at all, live or tombstoned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    /// Drop every node, children before their parent.
    pub fn clear(&mut self) {
        let mut pending: Vec<Box<TreeNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            let left = node.left.take();
            let right = node.right.take();
            if left.is_none() && right.is_none() {
                drop(node);
                continue;
            }
            // revisit the node once both subtrees are gone
            pending.push(node);
            pending.extend(right);
            pending.extend(left);
        }
        self.live = 0;
    }

    pub(crate) fn find_node(&self, id: PatientId) -> Option<&TreeNode> {
        let mut cur = self.root.as_deref();
        while let Some(n) = cur {
            cur = match id.cmp(&n.record.id()) {
                Ordering::Equal => return Some(n),
                Ordering::Less => n.left.as_deref(),
                Ordering::Greater => n.right.as_deref(),
            };
        }
        None
    }

    fn find_node_mut(&mut self, id: PatientId) -> Option<&mut TreeNode> {
        let mut cur = self.root.as_deref_mut();
        while let Some(n) = cur {
            match id.cmp(&n.record.id()) {
                Ordering::Equal => return Some(n),
                Ordering::Less => cur = n.left.as_deref_mut(),
                Ordering::Greater => cur = n.right.as_deref_mut(),
            }
        }
        None
    }
}

impl<B: Rebalance> SearchTree<B> {
    /// Index a record.
    ///
    /// Rejected with [`IndexError::DuplicateKey`] while a live record holds
    /// the same id. A tombstoned node with that id is reused in place.
    pub fn insert(&mut self, record: PatientRecord) -> Result<(), IndexError> {
        let id = record.id();
        let counts = !record.is_deleted();
        if let Some(node) = self.find_node_mut(id) {
            if !node.record.is_deleted() {
                log::warn!("patient id {id} already exists");
                return Err(IndexError::DuplicateKey(id));
            }
            log::debug!("patient {id} replaces its tombstoned record");
            node.record = record;
        } else {
            self.root = insert_at::<B>(self.root.take(), record);
            log::debug!("indexed patient {id}, height now {}", self.height());
        }
        if counts {
            self.live += 1;
        }
        Ok(())
    }

    /// Delete the live record with this id.
    ///
    /// Tombstoned records are not found here; use [`purge`](Self::purge).
    pub fn remove(&mut self, id: PatientId) -> Result<(), IndexError> {
        if self.search(id).is_none() {
            log::warn!("patient with id {id} not found");
            return Err(IndexError::NotFound(id));
        }
        self.root = remove_at::<B>(self.root.take(), id);
        self.live -= 1;
        log::debug!("removed patient {id}, height now {}", self.height());
        Ok(())
    }

    /// Excise the node holding `id`, live or tombstoned.
    pub fn purge(&mut self, id: PatientId) -> Result<(), IndexError> {
        let was_live = match self.find_node(id) {
            Some(n) => !n.record.is_deleted(),
            None => {
                log::warn!("no node for patient {id}");
                return Err(IndexError::NotFound(id));
            }
        };
        self.root = remove_at::<B>(self.root.take(), id);
        if was_live {
            self.live -= 1;
        }
        log::debug!("purged patient {id}, height now {}", self.height());
        Ok(())
    }
}

impl SearchTree<AvlBalance> {
    /// Check `|balance_factor| <= 1` at every node.
    pub fn is_balanced(&self) -> bool {
        fn check(node: Option<&TreeNode>) -> bool {
            match node {
                None => true,
                Some(n) => n.balance_factor().abs() <= 1 && check(n.left()) && check(n.right()),
            }
        }
        check(self.root())
    }
}

impl<B> Drop for SearchTree<B> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Nodes detached on the way down, each with the side its child came from.
type Path = Vec<(Box<TreeNode>, Side)>;

/// Reattach `path` bottom-up around `child`, refreshing heights and
/// rebalancing each parent. Returns the new root of the whole path.
fn reattach<B: Rebalance>(mut path: Path, mut child: Link) -> Link {
    while let Some((mut parent, side)) = path.pop() {
        match side {
            Side::Left => parent.left = child,
            Side::Right => parent.right = child,
        }
        parent.update_height();
        child = Some(B::rebalance(parent));
    }
    child
}

fn insert_at<B: Rebalance>(root: Link, record: PatientRecord) -> Link {
    let mut path = Path::new();
    let mut cur = root;
    while let Some(mut node) = cur {
        if record.id() < node.record.id() {
            cur = node.left.take();
            path.push((node, Side::Left));
        } else {
            cur = node.right.take();
            path.push((node, Side::Right));
        }
    }
    reattach::<B>(path, Some(Box::new(TreeNode::leaf(record))))
}

fn remove_at<B: Rebalance>(root: Link, id: PatientId) -> Link {
    let mut path = Path::new();
    let mut cur = root;
    let target = loop {
        let Some(mut node) = cur else {
            return reattach::<B>(path, None);
        };
        match id.cmp(&node.record.id()) {
            Ordering::Less => {
                cur = node.left.take();
                path.push((node, Side::Left));
            }
            Ordering::Greater => {
                cur = node.right.take();
                path.push((node, Side::Right));
            }
            Ordering::Equal => break node,
        }
    };
    reattach::<B>(path, unlink::<B>(target))
}

/// The subtree that takes the place of `node` once its record is gone.
///
/// With two children the in-order successor's record moves up into `node`
/// and the successor's node is excised from the right subtree.
fn unlink<B: Rebalance>(mut node: Box<TreeNode>) -> Link {
    match (node.left.take(), node.right.take()) {
        (None, child) | (child, None) => child,
        (Some(left), Some(right)) => {
            let (successor, rest) = take_leftmost::<B>(right);
            node.record = successor;
            node.left = Some(left);
            node.right = rest;
            node.update_height();
            Some(B::rebalance(node))
        }
    }
}

/// Detach the leftmost node of `root`, returning its record and what is
/// left of the subtree.
fn take_leftmost<B: Rebalance>(root: Box<TreeNode>) -> (PatientRecord, Link) {
    let mut path = Path::new();
    let mut node = root;
    while let Some(left) = node.left.take() {
        path.push((node, Side::Left));
        node = left;
    }
    let TreeNode { record, right, .. } = *node;
    (record, reattach::<B>(path, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BalancedIndex, OrderedIndex};
    use ward_record::Priority;

    fn patient(id: PatientId) -> PatientRecord {
        PatientRecord::new(
            id,
            format!("Patient {id}"),
            40,
            "Observation",
            Priority::Critical,
            "2024-03-01",
            "Dr. Grey",
        )
    }

    fn ids<B>(t: &SearchTree<B>) -> Vec<PatientId> {
        t.in_order().iter().map(PatientRecord::id).collect()
    }

    #[test]
    fn empty_tree_reports_nothing() {
        let mut t = OrderedIndex::new();
        assert!(t.is_empty());
        assert_eq!(t.size(), 0);
        assert_eq!(t.height(), 0);
        assert!(t.search(7).is_none());
        assert_eq!(t.remove(7), Err(IndexError::NotFound(7)));
        assert_eq!(t.size(), 0);
    }

    #[test]
    fn duplicate_insert_is_rejected_without_change() {
        let mut t = OrderedIndex::new();
        t.insert(patient(5)).unwrap();
        t.insert(patient(3)).unwrap();
        let before = t.height();
        assert_eq!(t.insert(patient(5)), Err(IndexError::DuplicateKey(5)));
        assert_eq!(t.size(), 2);
        assert_eq!(t.height(), before);
        assert_eq!(ids(&t), vec![3, 5]);
    }

    #[test]
    fn ascending_inserts_degrade_the_plain_tree() {
        let mut t = OrderedIndex::new();
        for id in 1..=6 {
            t.insert(patient(id)).unwrap();
        }
        assert_eq!(t.height(), 6);
    }

    #[test]
    fn two_child_delete_copies_successor_up() {
        let mut t = OrderedIndex::new();
        for id in [50, 30, 70, 60, 80, 65] {
            t.insert(patient(id)).unwrap();
        }
        t.remove(50).unwrap();
        let root = t.root().unwrap();
        assert_eq!(root.record().id(), 60);
        // 65 slides into 60's old slot under 70
        let seventy = root.right().unwrap();
        assert_eq!(seventy.left().map(|n| n.record().id()), Some(65));
        assert_eq!(ids(&t), vec![30, 60, 65, 70, 80]);
        assert_eq!(t.height(), 3);
    }

    #[test]
    fn tombstoned_record_is_hidden_but_still_a_node() {
        let mut t = OrderedIndex::new();
        t.insert(patient(1)).unwrap();
        t.insert(patient(2)).unwrap();
        t.modify(2, |r| r.mark_deleted()).unwrap();
        assert!(t.search(2).is_none());
        assert_eq!(t.size(), 1);
        assert_eq!(ids(&t), vec![1]);
        assert_eq!(t.height(), 2);
        assert_eq!(t.remove(2), Err(IndexError::NotFound(2)));
        t.purge(2).unwrap();
        assert_eq!(t.height(), 1);
        assert_eq!(t.size(), 1);
    }

    #[test]
    fn insert_over_tombstone_reuses_the_node() {
        let mut t = OrderedIndex::new();
        t.insert(patient(1)).unwrap();
        t.insert(patient(2)).unwrap();
        t.modify(2, |r| r.mark_deleted()).unwrap();
        let mut again = patient(2);
        again.set_name("Readmitted");
        t.insert(again).unwrap();
        assert_eq!(t.size(), 2);
        assert_eq!(t.height(), 2);
        assert_eq!(t.search(2).map(|r| r.name()), Some("Readmitted"));
    }

    #[test]
    fn modify_cannot_rekey() {
        let mut t = BalancedIndex::new();
        t.insert(patient(4)).unwrap();
        let err = t.modify(4, |r| *r = patient(9)).unwrap_err();
        assert_eq!(
            err,
            IndexError::KeyChanged {
                expected: 4,
                found: 9
            }
        );
        assert!(t.search(4).is_some());
        assert!(t.search(9).is_none());
    }

    #[test]
    fn modify_edits_fields_in_place() {
        let mut t = OrderedIndex::new();
        t.insert(patient(8)).unwrap();
        let age = t
            .modify(8, |r| {
                r.set_age(41);
                r.age()
            })
            .unwrap();
        assert_eq!(age, 41);
        assert_eq!(t.search(8).map(PatientRecord::age), Some(41));
        assert_eq!(t.modify(99, |_| ()), Err(IndexError::NotFound(99)));
    }

    #[test]
    fn clear_resets_everything() {
        let mut t = BalancedIndex::new();
        for id in 0..64 {
            t.insert(patient(id)).unwrap();
        }
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.size(), 0);
        assert_eq!(t.height(), 0);
        assert!(t.in_order().is_empty());
    }

    #[test]
    fn dropping_a_long_chain_does_not_recurse() {
        let mut t = OrderedIndex::new();
        // descending ids build a left spine one node per level
        for id in (0..1_000).rev() {
            t.insert(patient(id)).unwrap();
        }
        assert_eq!(t.height(), 1_000);
        drop(t);
    }
}
