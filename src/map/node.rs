//! Owned tree nodes and the recursive structural helpers that operate on them.
//!
//! Every node is owned by exactly one slot: its parent's `left`/`right`
//! link, or the map's root link. Helpers in this module take a `&mut Link`
//! so they can rewrite the slot in place when a node is unlinked.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;
use std::ops::{Bound, RangeBounds};

/// An owning link to a subtree. `None` is the empty subtree.
pub(super) type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Clone)]
pub(super) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) left: Link<K, V>,
    pub(super) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Creates a node with no children.
    pub(super) const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }
}

// =============================================================================
// Removal
// =============================================================================

/// Removes `key` from the subtree behind `link`.
///
/// Returns the removed entry, or `None` when the key is not on the search
/// path (in which case nothing is mutated).
pub(super) fn remove<K, V, Q>(link: &mut Link<K, V>, key: &Q) -> Option<(K, V)>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let node = link.as_mut()?;
    match key.cmp(node.key.borrow()) {
        Ordering::Less => remove(&mut node.left, key),
        Ordering::Greater => remove(&mut node.right, key),
        Ordering::Equal => unlink(link),
    }
}

/// Removes the leftmost node of the subtree behind `link`.
pub(super) fn remove_min<K, V>(link: &mut Link<K, V>) -> Option<(K, V)> {
    if link.as_ref().is_some_and(|node| node.left.is_some()) {
        link.as_mut().and_then(|node| remove_min(&mut node.left))
    } else {
        unlink(link)
    }
}

/// Removes the rightmost node of the subtree behind `link`.
pub(super) fn remove_max<K, V>(link: &mut Link<K, V>) -> Option<(K, V)> {
    if link.as_ref().is_some_and(|node| node.right.is_some()) {
        link.as_mut().and_then(|node| remove_max(&mut node.right))
    } else {
        unlink(link)
    }
}

/// Unlinks the node directly behind `link` and returns its entry.
///
/// A leaf leaves the slot empty and a node with one child is replaced by
/// that child. A node with two children stays in place: it takes over the
/// entry of its in-order successor, and the successor (which has no left
/// child) is unlinked from the right subtree instead.
fn unlink<K, V>(link: &mut Link<K, V>) -> Option<(K, V)> {
    let mut node = link.take()?;
    match (node.left.take(), node.right.take()) {
        (None, None) => {
            #[cfg(feature = "tracing")]
            tracing::trace!(case = "leaf", "unlinked node");
        }
        (Some(child), None) | (None, Some(child)) => {
            #[cfg(feature = "tracing")]
            tracing::trace!(case = "single_child", "unlinked node");
            *link = Some(child);
        }
        (Some(left), Some(right)) => {
            #[cfg(feature = "tracing")]
            tracing::trace!(case = "two_children", "replacing node with successor");
            node.left = Some(left);
            node.right = Some(right);
            let (successor_key, successor_value) = remove_min(&mut node.right)?;
            let key = mem::replace(&mut node.key, successor_key);
            let value = mem::replace(&mut node.value, successor_value);
            *link = Some(node);
            return Some((key, value));
        }
    }
    let Node { key, value, .. } = *node;
    Some((key, value))
}

// =============================================================================
// Traversal
// =============================================================================

/// Visits every entry of the subtree in ascending key order.
pub(super) fn walk_in_order<K, V, F>(node: Option<&Node<K, V>>, visit: &mut F)
where
    F: FnMut(&K, &V),
{
    if let Some(node) = node {
        walk_in_order(node.left.as_deref(), visit);
        visit(&node.key, &node.value);
        walk_in_order(node.right.as_deref(), visit);
    }
}

/// Collects the entries whose keys fall inside `range`, skipping subtrees
/// that lie entirely outside it.
pub(super) fn collect_range<'a, K, V, Q, R>(
    node: Option<&'a Node<K, V>>,
    range: &R,
    entries: &mut Vec<(&'a K, &'a V)>,
) where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
    R: RangeBounds<Q>,
{
    let Some(node) = node else {
        return;
    };
    let key: &Q = node.key.borrow();

    let above_start = match range.start_bound() {
        Bound::Included(start) => key >= start,
        Bound::Excluded(start) => key > start,
        Bound::Unbounded => true,
    };
    let below_end = match range.end_bound() {
        Bound::Included(end) => key <= end,
        Bound::Excluded(end) => key < end,
        Bound::Unbounded => true,
    };

    if above_start {
        collect_range(node.left.as_deref(), range, entries);
    }
    if above_start && below_end {
        entries.push((&node.key, &node.value));
    }
    if below_end {
        collect_range(node.right.as_deref(), range, entries);
    }
}

/// Number of nodes on the longest root-to-leaf path.
pub(super) fn height<K, V>(root: Option<&Node<K, V>>) -> usize {
    let mut level: Vec<&Node<K, V>> = root.into_iter().collect();
    let mut depth = 0;
    while !level.is_empty() {
        depth += 1;
        level = level
            .into_iter()
            .flat_map(|node| [node.left.as_deref(), node.right.as_deref()])
            .flatten()
            .collect();
    }
    depth
}

/// Drops a subtree without recursing, so that degenerate (list-shaped)
/// trees cannot exhaust the stack on destruction.
pub(super) fn dismantle<K, V>(root: Link<K, V>) {
    let mut pending: Vec<Box<Node<K, V>>> = root.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}
