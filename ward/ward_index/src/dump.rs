//! Breadth-first structural dump, for diagnostics only.

use std::collections::VecDeque;
use std::fmt::Write as _;

use ward_record::PatientId;

use crate::node::TreeNode;
use crate::tree::SearchTree;

/// One node as seen by the level-order walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelEntry {
    pub id: PatientId,
    pub deleted: bool,
}

impl<B> SearchTree<B> {
    /// Nodes grouped by depth, root level first, left to right. Tombstoned
    /// nodes are included.
    pub fn levels(&self) -> Vec<Vec<LevelEntry>> {
        let mut levels = Vec::new();
        let mut queue: VecDeque<&TreeNode> = self.root().into_iter().collect();
        while !queue.is_empty() {
            let width = queue.len();
            let mut level = Vec::with_capacity(width);
            for _ in 0..width {
                let Some(node) = queue.pop_front() else {
                    break;
                };
                level.push(LevelEntry {
                    id: node.record().id(),
                    deleted: node.record().is_deleted(),
                });
                queue.extend(node.left());
                queue.extend(node.right());
            }
            levels.push(level);
        }
        levels
    }

    /// One line per depth, e.g. `Level 1: 101(A) 104(D) `. `A` marks a live
    /// record, `D` a tombstoned one.
    pub fn level_order_dump(&self) -> String {
        let levels = self.levels();
        if levels.is_empty() {
            return "Tree is empty!".to_string();
        }
        let mut out = String::new();
        for (depth, level) in levels.iter().enumerate() {
            let _ = write!(out, "Level {depth}: ");
            for e in level {
                let _ = write!(out, "{}({}) ", e.id, if e.deleted { 'D' } else { 'A' });
            }
            out.push('\n');
        }
        out
    }
}
