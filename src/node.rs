use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A tree node owning its two subtrees. A leaf has height 1; an absent
/// subtree counts as height 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node<T> {
    pub(crate) key: T,
    pub(crate) left: Option<Box<Node<T>>>,
    pub(crate) right: Option<Box<Node<T>>>,
    pub(crate) height: usize,
}

pub(crate) type Link<T> = Option<Box<Node<T>>>;

pub(crate) fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

impl<T> Node<T> {
    pub(crate) fn new(key: T) -> Self {
        Self {
            key,
            left: None,
            right: None,
            height: 1,
        }
    }

    pub fn key(&self) -> &T {
        &self.key
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    pub(crate) fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

/// Recomputes subtree heights from scratch, ignoring the cached fields.
/// Returns the true height if every node satisfies the balance invariant.
pub(crate) fn balanced_height<T>(link: &Link<T>) -> Option<usize> {
    match link {
        None => Some(0),
        Some(node) => {
            let left = balanced_height(&node.left)?;
            let right = balanced_height(&node.right)?;
            (left.abs_diff(right) <= 1).then(|| 1 + left.max(right))
        }
    }
}

pub(crate) fn iter_node<'a, T>(link: &'a Link<T>) -> Box<dyn Iterator<Item = &'a T> + 'a> {
    match link {
        None => Box::new(std::iter::empty()),
        Some(node) => Box::new(
            iter_node(&node.left)
                .chain(std::iter::once(&node.key))
                .chain(std::iter::once_with(move || iter_node(&node.right)).flatten()),
        ),
    }
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut pivot = node
        .right
        .take()
        .expect("rotate_left requires a right child");
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut pivot = node.left.take().expect("rotate_right requires a left child");
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

/// Repairs one node on the unwind path of a mutation: recompute the cached
/// height, then resolve any imbalance with one of the four rotation cases.
/// The case is picked from the heavy child's balance factor; a child tilted
/// the opposite way needs the double rotation.
fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.update_height();
    let balance = node.balance_factor();
    if balance > 1 {
        if node.left.as_ref().map_or(0, |left| left.balance_factor()) < 0 {
            let left = node.left.take().expect("left-heavy node has a left child");
            node.left = Some(rotate_left(left));
        }
        rotate_right(node)
    } else if balance < -1 {
        if node.right.as_ref().map_or(0, |right| right.balance_factor()) > 0 {
            let right = node
                .right
                .take()
                .expect("right-heavy node has a right child");
            node.right = Some(rotate_right(right));
        }
        rotate_left(node)
    } else {
        node
    }
}

pub(crate) fn insert<T: Ord>(link: Link<T>, key: T) -> Box<Node<T>> {
    let Some(mut node) = link else {
        return Box::new(Node::new(key));
    };

    match key.cmp(&node.key) {
        Ordering::Less => node.left = Some(insert(node.left.take(), key)),
        Ordering::Greater => node.right = Some(insert(node.right.take(), key)),
        // duplicate: the key is already where it belongs
        Ordering::Equal => return node,
    }

    rebalance(node)
}

pub(crate) fn remove<T: Ord>(link: Link<T>, key: &T) -> Link<T> {
    let mut node = link?;

    match key.cmp(&node.key) {
        Ordering::Less => node.left = remove(node.left.take(), key),
        Ordering::Greater => node.right = remove(node.right.take(), key),
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, child) | (child, None) => return child,
            (left, Some(right)) => {
                // promote the in-order successor: the minimum of the right subtree
                let (rest, successor) = take_min(right);
                node.key = successor.key;
                node.left = left;
                node.right = rest;
            }
        },
    }

    Some(rebalance(node))
}

fn take_min<T>(mut node: Box<Node<T>>) -> (Link<T>, Box<Node<T>>) {
    match node.left.take() {
        None => (node.right.take(), node),
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            (Some(rebalance(node)), min)
        }
    }
}
