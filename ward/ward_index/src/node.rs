use ward_record::PatientRecord;

/// Owned child slot. `None` is an absent subtree of height 0.
pub(crate) type Link = Option<Box<TreeNode>>;

/// One node of a search tree.
///
/// A node is owned by exactly one parent slot (or by the tree, for the root)
/// and owns both of its subtrees. `height` caches the subtree height and is
/// recomputed bottom-up whenever the subtree's shape changes.
#[derive(Debug)]
pub struct TreeNode {
    pub(crate) record: PatientRecord,
    pub(crate) height: u32,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl TreeNode {
    pub(crate) fn leaf(record: PatientRecord) -> Self {
        Self {
            record,
            height: 1,
            left: None,
            right: None,
        }
    }

    pub fn record(&self) -> &PatientRecord {
        &self.record
    }

    /// Cached height: 1 for a leaf.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn left(&self) -> Option<&TreeNode> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&TreeNode> {
        self.right.as_deref()
    }

    /// `height(left) - height(right)`.
    #[inline]
    pub fn balance_factor(&self) -> i64 {
        i64::from(height(&self.left)) - i64::from(height(&self.right))
    }

    #[inline]
    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }
}

#[inline]
pub(crate) fn height(link: &Link) -> u32 {
    link.as_ref().map_or(0, |n| n.height)
}

/// Balance factor of an optional subtree; 0 when absent.
#[inline]
pub(crate) fn balance_factor(link: &Link) -> i64 {
    link.as_ref().map_or(0, |n| n.balance_factor())
}
