//! Mutable ordered map backed by an unbalanced binary search tree.
//!
//! - [`OrderedMap`]: ordered map over any `K: Ord`
//! - [`OrderedIntMap`]: the integer-keyed, integer-valued instantiation
//!
//! # Degenerate Shapes
//!
//! No operation rebalances the tree. Inserting keys in ascending or
//! descending order builds a list-shaped tree whose height equals its
//! length; lookups then cost O(n) and the recursive operations
//! ([`OrderedMap::for_each`], removal of a node with two children) recurse
//! O(n) deep. Lookups and insertion descend iteratively, and dropping a map
//! never recurses.
//!
//! # Examples
//!
//! ```rust
//! use ordtree::map::OrderedIntMap;
//!
//! let mut map = OrderedIntMap::new();
//! for key in [10, 5, 15, 2, 4, 12, 14] {
//!     map.insert(key, key);
//! }
//! assert_eq!(map.len(), 7);
//! assert!(map.contains_key(&4));
//! assert!(!map.contains_key(&13));
//!
//! for key in [15, 14, 2] {
//!     map.erase(&key);
//! }
//!
//! let mut keys = Vec::new();
//! map.for_each(|key, _| keys.push(*key));
//! assert_eq!(keys, vec![4, 5, 10, 12]);
//! ```

mod error;
mod iter;
mod node;
mod ordered_map;

pub use error::InvariantViolation;
pub use iter::IntoIter;
pub use iter::Iter;
pub use iter::IterMut;
pub use iter::Range;
pub use ordered_map::OrderedMap;

/// An [`OrderedMap`] with integer keys and integer values.
pub type OrderedIntMap = OrderedMap<i64, i64>;

// Plain ownership: thread-safety follows from the key and value types alone.
static_assertions::assert_impl_all!(OrderedIntMap: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(OrderedMap<String, Vec<u8>>: Send, Sync);
static_assertions::assert_not_impl_any!(OrderedMap<i32, std::rc::Rc<i32>>: Send, Sync);
