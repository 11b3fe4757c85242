use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::{self, Link, Node};

/// An ordered set backed by an AVL tree: after every insert or remove, the
/// subtree heights at every node differ by at most one, so both operations
/// run in O(log n).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvlSet<T> {
    root: Link<T>,
}

impl<T> Default for AvlSet<T> {
    fn default() -> Self {
        Self { root: None }
    }
}

impl<T: Ord> AvlSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Number of levels in the tree, 0 when empty. Reads the cached root
    /// height, so this is O(1).
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Adds `key` to the set. Inserting a key that is already present leaves
    /// the tree untouched; either way the key ends up in the set, so this
    /// always reports success.
    pub fn insert(&mut self, key: T) -> bool {
        self.root = Some(node::insert(self.root.take(), key));
        true
    }

    /// Removes `key` if present. Removing an absent key (or removing from an
    /// empty set) is a silent no-op.
    pub fn remove(&mut self, key: &T) {
        self.root = node::remove(self.root.take(), key);
    }

    pub fn contains(&self, key: &T) -> bool {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// The key at the root of the tree, if any. Which key that is depends on
    /// the rotation history, not on insertion order.
    pub fn peek_root(&self) -> Option<&T> {
        self.root.as_deref().map(Node::key)
    }

    /// Verification oracle: recomputes every subtree height from scratch and
    /// confirms the balance invariant, ignoring the cached height fields.
    pub fn is_balanced(&self) -> bool {
        node::balanced_height(&self.root).is_some()
    }

    /// In-order traversal, so keys come out ascending.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        node::iter_node(&self.root)
    }
}

impl<T: Ord + fmt::Display> AvlSet<T> {
    /// Level-order dump, one line per depth, `-` for an absent child. Levels
    /// are centered with power-of-two padding. Debugging aid only.
    pub fn render(&self) -> String {
        let mut levels: Vec<Vec<String>> = Vec::new();
        let mut queue: VecDeque<Option<&Node<T>>> = VecDeque::from([self.root.as_deref()]);

        loop {
            let mut level = Vec::new();
            let mut next_queue = VecDeque::new();

            for slot in queue.drain(..) {
                match slot {
                    None => {
                        level.push("-".to_string());
                        next_queue.push_back(None);
                        next_queue.push_back(None);
                    }
                    Some(node) => {
                        level.push(node.key.to_string());
                        next_queue.push_back(node.left.as_deref());
                        next_queue.push_back(node.right.as_deref());
                    }
                }
            }

            levels.push(level);
            if next_queue.iter().all(|slot| slot.is_none()) {
                break;
            }
            queue = next_queue;
        }

        let depth = levels.len();
        let mut lines = Vec::new();
        for (i, level) in levels.iter().enumerate() {
            let space = " ".repeat(1 << (depth - i - 1));
            let between = " ".repeat((1 << (depth - i)) - 1);
            lines.push(format!("{space}{}{space}", level.join(&between)));
        }

        lines.join("\n") + "\n"
    }
}

impl<T: Ord + fmt::Display> fmt::Display for AvlSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl<T: Ord> FromIterator<T> for AvlSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for key in iter {
            set.insert(key);
        }
        set
    }
}
