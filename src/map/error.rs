//! Error types for structural checks on [`OrderedMap`](super::OrderedMap).

/// Describes how a map failed [`OrderedMap::check_invariants`](super::OrderedMap::check_invariants).
///
/// # Examples
///
/// ```rust
/// use ordtree::map::InvariantViolation;
///
/// let error = InvariantViolation::LengthMismatch {
///     recorded: 3,
///     counted: 2,
/// };
/// assert_eq!(
///     format!("{error}"),
///     "length counter says 3 entries but the tree holds 2"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The in-order walk produced a key that is not strictly greater than
    /// its predecessor.
    OutOfOrder {
        /// Zero-based in-order position of the offending key.
        position: usize,
    },
    /// The length counter disagrees with the number of reachable nodes.
    LengthMismatch {
        /// The value of the length counter.
        recorded: usize,
        /// The number of nodes actually found.
        counted: usize,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfOrder { position } => write!(
                formatter,
                "key at in-order position {position} is not greater than its predecessor"
            ),
            Self::LengthMismatch { recorded, counted } => write!(
                formatter,
                "length counter says {recorded} entries but the tree holds {counted}"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}
