//! # ordtree
//!
//! A mutable ordered map backed by a plain (unbalanced) binary search tree.
//!
//! ## Overview
//!
//! The central type is [`map::OrderedMap`], an owned-node binary search tree
//! supporting insert-or-update, removal, membership tests, a constant-time
//! size counter, and in-order traversal. The tree is never rebalanced: keys
//! inserted in sorted order produce a tree of height `n`.
//!
//! ## Feature Flags
//!
//! - `map`: The ordered map (enabled by default)
//! - `serde`: `Serialize`/`Deserialize` for [`map::OrderedMap`]
//! - `tracing`: Emit `tracing` events on structural mutations
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use ordtree::prelude::*;
//!
//! let mut map = OrderedIntMap::new();
//! map.insert(10, 100);
//! map.insert(5, 50);
//! map.insert(15, 150);
//!
//! assert_eq!(map.len(), 3);
//! assert!(map.erase(&5));
//! assert!(!map.contains_key(&5));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use ordtree::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "map")]
    pub use crate::map::*;
}

#[cfg(feature = "map")]
pub mod map;
