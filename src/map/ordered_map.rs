//! Mutable ordered map based on an unbalanced binary search tree.
//!
//! This module provides [`OrderedMap`], an ordered associative container
//! whose nodes are owned exclusively by their parent (or by the map's root
//! slot). There is no shared ownership and no back-references.
//!
//! # Overview
//!
//! - O(h) `insert`, `get`, `contains_key`, `remove`
//! - O(1) `len` and `is_empty`
//! - O(n) in-order traversal
//!
//! where `h` is the height of the tree. The tree is never rebalanced, so `h`
//! is `O(log n)` for random insertion orders and `n` for sorted ones.
//!
//! # Examples
//!
//! ```rust
//! use ordtree::map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! for key in [10, 5, 15, 2, 4, 12, 14] {
//!     map.insert(key, key * 10);
//! }
//!
//! let keys: Vec<i32> = map.keys().copied().collect();
//! assert_eq!(keys, vec![2, 4, 5, 10, 12, 14, 15]);
//!
//! map.erase(&15);
//! map.erase(&14);
//! map.erase(&2);
//! assert_eq!(map.len(), 4);
//! ```
//!
//! # Internal Structure
//!
//! The tree maintains the following invariants:
//! 1. Every key in a node's left subtree is strictly less than the node's key
//! 2. Every key in a node's right subtree is strictly greater than the node's key
//! 3. The length counter equals the number of reachable nodes

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Index, RangeBounds};

use super::error::InvariantViolation;
use super::iter::{IntoIter, Iter, IterMut, Range};
use super::node::{self, Link, Node};

// =============================================================================
// OrderedMap Definition
// =============================================================================

/// A mutable ordered map backed by an unbalanced binary search tree.
///
/// Keys must implement `Ord`. Entries are kept in ascending key order, and
/// every traversal ([`for_each`](Self::for_each), [`iter`](Self::iter),
/// [`range`](Self::range), ...) visits them in that order.
///
/// # Time Complexity
///
/// | Operation      | Complexity |
/// |----------------|------------|
/// | `new`          | O(1)       |
/// | `insert`       | O(h)       |
/// | `get`          | O(h)       |
/// | `contains_key` | O(h)       |
/// | `remove`       | O(h)       |
/// | `min`/`max`    | O(h)       |
/// | `range`        | O(h + k)   |
/// | `len`          | O(1)       |
/// | `is_empty`     | O(1)       |
///
/// `h` is the tree height, which equals `len()` in the worst case.
///
/// # Examples
///
/// ```rust
/// use ordtree::map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert(3, "three");
/// map.insert(1, "one");
/// map.insert(2, "two");
///
/// let keys: Vec<&i32> = map.keys().collect();
/// assert_eq!(keys, vec![&1, &2, &3]);
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    /// Root node of the tree
    root: Link<K, V>,
    /// Number of entries
    length: usize,
}

impl<K, V> OrderedMap<K, V> {
    /// Creates a new empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::map::OrderedMap;
    ///
    /// let map: OrderedMap<i32, String> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// This is a running counter, never recomputed by traversal.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Removes every entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::map::OrderedMap;
    ///
    /// let mut map: OrderedMap<i32, i32> = (0..10).map(|key| (key, key)).collect();
    /// map.clear();
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&mut self) {
        node::dismantle(self.root.take());
        self.length = 0;
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// An empty map has height 0. Because the tree is never rebalanced,
    /// inserting keys in sorted order yields a height equal to `len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// for key in 0..8 {
    ///     map.insert(key, ());
    /// }
    /// assert_eq!(map.height(), 8);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        node::height(self.root.as_deref())
    }

    /// Calls `visit` on every entry in ascending key order.
    ///
    /// The traversal runs to completion over the current tree; the shared
    /// borrow rules out mutation of the map while it runs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::map::OrderedMap;
    ///
    /// let map: OrderedMap<i32, i32> = [(2, 20), (1, 10), (3, 30)].into_iter().collect();
    ///
    /// let mut keys = Vec::new();
    /// map.for_each(|key, _| keys.push(*key));
    /// assert_eq!(keys, vec![1, 2, 3]);
    /// ```
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        node::walk_in_order(self.root.as_deref(), &mut visit);
    }

    /// Returns an iterator over entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::map::OrderedMap;
    ///
    /// let map: OrderedMap<i32, &str> = [(3, "c"), (1, "a"), (2, "b")].into_iter().collect();
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.length)
    }

    /// Returns an iterator over entries in ascending key order, with mutable
    /// access to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(self.root.as_deref_mut(), self.length)
    }

    /// Returns an iterator over keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values in key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::map::OrderedMap;
    ///
    /// let map: OrderedMap<i32, i32> = [(1, 10), (2, 20), (3, 30)].into_iter().collect();
    /// let sum: i32 = map.values().sum();
    /// assert_eq!(sum, 60);
    /// ```
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Returns an iterator over mutable references to values in key order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.iter_mut().map(|(_, value)| value)
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::map::OrderedMap;
    ///
    /// let map: OrderedMap<i32, &str> = [(3, "c"), (1, "a"), (2, "b")].into_iter().collect();
    /// assert_eq!(map.min(), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_min(&mut self) -> Option<(K, V)> {
        let entry = node::remove_min(&mut self.root)?;
        self.length -= 1;
        Some(entry)
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_max(&mut self) -> Option<(K, V)> {
        let entry = node::remove_max(&mut self.root)?;
        self.length -= 1;
        Some(entry)
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Inserts a key-value pair into the map.
    ///
    /// If the key is already present its value is overwritten in place, the
    /// length is unchanged, and the previous value is returned. Otherwise a
    /// new leaf is linked in at the position dictated by key order and the
    /// length grows by one.
    ///
    /// The descent is iterative, so degenerate trees do not deepen the
    /// call stack here.
    ///
    /// # Complexity
    ///
    /// O(h)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.insert(1, "one"), None);
    /// assert_eq!(map.insert(1, "ONE"), Some("one"));
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get(&1), Some(&"ONE"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut link = &mut self.root;
        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Less => link = &mut node.left,
                Ordering::Greater => link = &mut node.right,
                Ordering::Equal => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(length = self.length, "overwrote existing key");
                    return Some(mem::replace(&mut node.value, value));
                }
            }
        }
        *link = Some(Box::new(Node::leaf(key, value)));
        self.length += 1;
        #[cfg(feature = "tracing")]
        tracing::trace!(length = self.length, "inserted new key");
        None
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("hello".to_string(), 42);
    ///
    /// assert_eq!(map.get("hello"), Some(&42));
    /// assert_eq!(map.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key and its value.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some((&node.key, &node.value)),
            }
        }
        None
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, 10);
    /// if let Some(value) = map.get_mut(&1) {
    ///     *value += 1;
    /// }
    /// assert_eq!(map.get(&1), Some(&11));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    /// Returns `true` if the map contains the key.
    ///
    /// An iterative descent from the root with no side effects. Always
    /// `false` on an empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(4, ());
    /// assert!(map.contains_key(&4));
    /// assert!(!map.contains_key(&3));
    /// ```
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).is_some()
    }

    /// Removes the key from the map, reporting whether it was present.
    ///
    /// A leaf is simply unlinked, a node with one child is replaced by that
    /// child, and a node with two children takes over the entry of its
    /// in-order successor, which is then unlinked from the right subtree.
    /// An absent key leaves the map untouched and returns `false`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::map::OrderedMap;
    ///
    /// let mut map: OrderedMap<i32, i32> = [(1, 1), (2, 2)].into_iter().collect();
    /// assert!(map.erase(&1));
    /// assert!(!map.erase(&1));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).is_some()
    }

    /// Removes the key from the map, returning its value if it was present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "one");
    /// assert_eq!(map.remove(&1), Some("one"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the key from the map, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let entry = node::remove(&mut self.root, key)?;
        self.length -= 1;
        Some(entry)
    }

    /// Returns an iterator over entries whose keys fall inside `range`.
    ///
    /// Subtrees lying entirely outside the range are not visited.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::map::OrderedMap;
    ///
    /// let map: OrderedMap<i32, i32> = (1..=5).map(|key| (key, key)).collect();
    /// let keys: Vec<&i32> = map.range(2..=4).map(|(key, _)| key).collect();
    /// assert_eq!(keys, vec![&2, &3, &4]);
    /// ```
    pub fn range<R, Q>(&self, range: R) -> Range<'_, K, V>
    where
        R: RangeBounds<Q>,
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut entries = Vec::new();
        node::collect_range(self.root.as_deref(), &range, &mut entries);
        Range::new(entries)
    }

    /// Verifies the ordering invariant and the length counter.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation::OutOfOrder`] if an in-order walk finds a
    /// key that is not strictly greater than the previous one, and
    /// [`InvariantViolation::LengthMismatch`] if the number of reachable
    /// nodes differs from [`len`](Self::len).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::map::OrderedMap;
    ///
    /// let map: OrderedMap<i32, i32> = [(5, 0), (1, 0), (9, 0)].into_iter().collect();
    /// assert!(map.check_invariants().is_ok());
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut counted = 0;
        let mut previous: Option<&K> = None;
        for (key, _) in self {
            if previous.is_some_and(|previous| previous >= key) {
                return Err(InvariantViolation::OutOfOrder { position: counted });
            }
            previous = Some(key);
            counted += 1;
        }

        if counted != self.length {
            return Err(InvariantViolation::LengthMismatch {
                recorded: self.length,
                counted,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Drop for OrderedMap<K, V> {
    fn drop(&mut self) {
        node::dismantle(self.root.take());
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let length = mem::take(&mut self.length);
        IntoIter::new(self.root.take(), length)
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut OrderedMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, Q, V> Index<&Q> for OrderedMap<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// Returns a reference to the value for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

/// Two maps are equal when they hold the same entries, regardless of the
/// shape their insertion order gave the tree.
impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

/// Hashes the length first, then every entry in key order, so equal maps
/// hash equally whatever their shape.
impl<K: Hash, V: Hash> Hash for OrderedMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for OrderedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for OrderedMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedMapVisitor<K, V> {
    key_marker: std::marker::PhantomData<K>,
    value_marker: std::marker::PhantomData<V>,
}

#[cfg(feature = "serde")]
impl<K, V> OrderedMapVisitor<K, V> {
    const fn new() -> Self {
        Self {
            key_marker: std::marker::PhantomData,
            value_marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for OrderedMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = OrderedMap<K, V>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        // Entries arrive in serialised (ascending) order, which yields a
        // right-leaning chain; that shape is accepted, not corrected.
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for OrderedMap<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn reference_map() -> OrderedMap<i32, i32> {
        [10, 5, 15, 2, 4, 12, 14]
            .into_iter()
            .map(|key| (key, key))
            .collect()
    }

    // =========================================================================
    // Display Tests
    // =========================================================================

    #[rstest]
    fn test_display_empty_map() {
        let map: OrderedMap<i32, String> = OrderedMap::new();
        assert_eq!(format!("{map}"), "{}");
    }

    #[rstest]
    fn test_display_multiple_entries_sorted() {
        let mut map = OrderedMap::new();
        map.insert(3, "three".to_string());
        map.insert(1, "one".to_string());
        map.insert(2, "two".to_string());
        assert_eq!(format!("{map}"), "{1: one, 2: two, 3: three}");
    }

    #[rstest]
    fn test_debug_uses_map_form() {
        let map: OrderedMap<i32, &str> = [(2, "b"), (1, "a")].into_iter().collect();
        assert_eq!(format!("{map:?}"), r#"{1: "a", 2: "b"}"#);
    }

    // =========================================================================
    // Structure Tests
    // =========================================================================

    #[rstest]
    fn test_first_insert_becomes_root() {
        let mut map = OrderedMap::new();
        map.insert(7, 70);
        let root = map.root.as_ref().unwrap();
        assert_eq!((root.key, root.value), (7, 70));
        assert!(root.left.is_none() && root.right.is_none());
    }

    #[rstest]
    fn test_insert_links_by_key_order() {
        let map = reference_map();
        let root = map.root.as_ref().unwrap();
        assert_eq!(root.key, 10);
        assert_eq!(root.left.as_ref().unwrap().key, 5);
        assert_eq!(root.right.as_ref().unwrap().key, 15);
        // 2 -> right 4; 15 -> left 12 -> right 14
        let two = root.left.as_ref().unwrap().left.as_ref().unwrap();
        assert_eq!(two.right.as_ref().unwrap().key, 4);
        let twelve = root.right.as_ref().unwrap().left.as_ref().unwrap();
        assert_eq!(twelve.right.as_ref().unwrap().key, 14);
    }

    #[rstest]
    fn test_erase_root_with_two_children_promotes_successor() {
        let mut map = reference_map();
        assert!(map.erase(&10));
        assert_eq!(map.root.as_ref().unwrap().key, 12);
        assert_eq!(map.len(), 6);
        assert!(map.check_invariants().is_ok());
    }

    #[rstest]
    fn test_erase_last_key_empties_root() {
        let mut map = OrderedMap::new();
        map.insert(1, 1);
        assert!(map.erase(&1));
        assert!(map.root.is_none());
        assert!(map.is_empty());
    }

    #[rstest]
    fn test_sorted_inserts_degenerate_into_chain() {
        let map: OrderedMap<i32, ()> = (0..64).map(|key| (key, ())).collect();
        assert_eq!(map.height(), 64);
        assert!(map.root.as_ref().unwrap().left.is_none());
    }

    // =========================================================================
    // Invariant Checks
    // =========================================================================

    #[rstest]
    fn test_check_invariants_detects_length_drift() {
        let mut map = reference_map();
        map.length += 1;
        assert_eq!(
            map.check_invariants(),
            Err(InvariantViolation::LengthMismatch {
                recorded: 8,
                counted: 7
            })
        );
    }

    #[rstest]
    fn test_check_invariants_detects_misplaced_key() {
        let mut map = reference_map();
        // Put 99 in the left subtree of the root (10).
        map.root.as_mut().unwrap().left.as_mut().unwrap().key = 99;
        assert_eq!(
            map.check_invariants(),
            Err(InvariantViolation::OutOfOrder { position: 3 })
        );
    }

    #[rstest]
    fn test_into_iter_drop_midway_releases_rest() {
        let map: OrderedMap<i32, String> = (0..100).map(|key| (key, key.to_string())).collect();
        let mut iterator = map.into_iter();
        assert_eq!(iterator.next(), Some((0, "0".to_string())));
        assert_eq!(iterator.len(), 99);
        drop(iterator);
    }

    #[rstest]
    fn test_drop_deep_chain_does_not_overflow() {
        // Link the chain by hand; inserting sorted keys one by one is quadratic.
        let mut map = OrderedMap::new();
        for key in (0..200_000).rev() {
            let mut node = Box::new(Node::leaf(key, key));
            node.right = map.root.take();
            map.root = Some(node);
            map.length += 1;
        }
        assert_eq!(map.min(), Some((&0, &0)));
        assert_eq!(map.pop_min(), Some((0, 0)));
        assert_eq!(map.len(), 199_999);
        drop(map);
    }
}
