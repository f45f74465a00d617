//! Post-update hooks run at every node reattached on the way back up from
//! an insert or delete, after that node's height has been refreshed.

use crate::node::{balance_factor, TreeNode};

/// Strategy applied to a subtree root after its height was updated.
///
/// Receives ownership of the subtree root and returns the (possibly new)
/// root of the same subtree. Implementations must keep the in-order
/// sequence unchanged.
pub trait Rebalance {
    fn rebalance(node: Box<TreeNode>) -> Box<TreeNode>;
}

/// No-op hook: the tree keeps whatever shape insertion order gives it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbalanced;

impl Rebalance for Unbalanced {
    #[inline]
    fn rebalance(node: Box<TreeNode>) -> Box<TreeNode> {
        node
    }
}

/// AVL rotations keeping `|balance_factor| <= 1` at every node.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvlBalance;

impl Rebalance for AvlBalance {
    fn rebalance(mut node: Box<TreeNode>) -> Box<TreeNode> {
        let balance = node.balance_factor();

        if balance > 1 {
            if balance_factor(&node.left) < 0 {
                // left-right
                node.left = node.left.take().map(rotate_left);
            }
            return rotate_right(node);
        }

        if balance < -1 {
            if balance_factor(&node.right) > 0 {
                // right-left
                node.right = node.right.take().map(rotate_right);
            }
            return rotate_left(node);
        }

        node
    }
}

/// Lift the left child over `y`. The child's right subtree becomes `y`'s
/// left subtree. Heights of `y` then the new root are refreshed.
pub(crate) fn rotate_right(mut y: Box<TreeNode>) -> Box<TreeNode> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    log::trace!("rotate right at {} (pivot {})", y.record.id(), x.record.id());
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

/// Mirror of [`rotate_right`].
pub(crate) fn rotate_left(mut x: Box<TreeNode>) -> Box<TreeNode> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    log::trace!("rotate left at {} (pivot {})", x.record.id(), y.record.id());
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_record::{PatientRecord, Priority};

    fn node(id: i64) -> Box<TreeNode> {
        Box::new(TreeNode::leaf(PatientRecord::new(
            id,
            format!("p{id}"),
            30,
            "Flu",
            Priority::NonCritical,
            "2024-02-01",
            "Dr. House",
        )))
    }

    fn with(
        mut parent: Box<TreeNode>,
        left: Option<Box<TreeNode>>,
        right: Option<Box<TreeNode>>,
    ) -> Box<TreeNode> {
        parent.left = left;
        parent.right = right;
        parent.update_height();
        parent
    }

    fn ids_in_order(n: &TreeNode, out: &mut Vec<i64>) {
        if let Some(l) = n.left() {
            ids_in_order(l, out);
        }
        out.push(n.record().id());
        if let Some(r) = n.right() {
            ids_in_order(r, out);
        }
    }

    #[test]
    fn left_left_chain_rotates_right() {
        // 3 <- 2 <- 1
        let chain = with(node(3), Some(with(node(2), Some(node(1)), None)), None);
        assert_eq!(chain.balance_factor(), 2);
        let root = AvlBalance::rebalance(chain);
        assert_eq!(root.record().id(), 2);
        assert_eq!(root.height(), 2);
        assert_eq!(root.left().map(|n| n.record().id()), Some(1));
        assert_eq!(root.right().map(|n| n.record().id()), Some(3));
        assert_eq!(root.right().map(TreeNode::height), Some(1));
    }

    #[test]
    fn left_right_case_double_rotates() {
        // 3 with left child 1 whose right child is 2
        let zig = with(node(3), Some(with(node(1), None, Some(node(2)))), None);
        let root = AvlBalance::rebalance(zig);
        let mut ids = Vec::new();
        ids_in_order(&root, &mut ids);
        assert_eq!(root.record().id(), 2);
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(root.balance_factor(), 0);
    }

    #[test]
    fn right_left_case_double_rotates() {
        let zag = with(node(1), None, Some(with(node(3), Some(node(2)), None)));
        let root = AvlBalance::rebalance(zag);
        assert_eq!(root.record().id(), 2);
        assert_eq!(root.height(), 2);
    }

    #[test]
    fn rotation_moves_inner_subtree_across() {
        // 2 has right child 4 with children 3 and 5; rotating left at 2
        // must hand 3 to 2 as its new right child.
        let t = with(
            node(2),
            Some(node(1)),
            Some(with(node(4), Some(node(3)), Some(node(5)))),
        );
        let root = rotate_left(t);
        assert_eq!(root.record().id(), 4);
        let left = root.left().expect("old root");
        assert_eq!(left.record().id(), 2);
        assert_eq!(left.right().map(|n| n.record().id()), Some(3));
        assert_eq!(left.height(), 2);
        assert_eq!(root.height(), 3);
    }

    #[test]
    fn unbalanced_hook_keeps_shape() {
        let chain = with(node(3), Some(with(node(2), Some(node(1)), None)), None);
        let root = Unbalanced::rebalance(chain);
        assert_eq!(root.record().id(), 3);
        assert_eq!(root.height(), 3);
    }
}
