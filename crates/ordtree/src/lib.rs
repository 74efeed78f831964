//! ordtree provides two ordered-data primitives for building indexing and
//! range-query systems: a red-black tree and a sum segment tree with lazy
//! range assignment.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// A self-balancing binary search tree over distinct `i64` keys.
pub mod rbtree;
/// A fixed-shape sum segment tree with lazy range assignment.
pub mod segtree;

pub use rbtree::RedBlackTree;
pub use segtree::SegmentTree;

use core::fmt;

/// Errors produced by range operations on a [`SegmentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TreeError {
    /// The range is inverted or falls outside the positions the tree covers.
    ///
    /// Raised before any mutation takes place, so a rejected operation leaves
    /// the tree untouched.
    InvalidRange {
        /// Inclusive start position of the rejected range.
        start: usize,
        /// Inclusive end position of the rejected range.
        end: usize,
        /// Number of positions the tree covers.
        len: usize,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::InvalidRange { start, end, len } => {
                write!(
                    f,
                    "invalid range [{start}, {end}] for a tree covering [0, {len})"
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TreeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_range_display() {
        let err = TreeError::InvalidRange {
            start: 3,
            end: 1,
            len: 5,
        };
        assert_eq!(
            err.to_string(),
            "invalid range [3, 1] for a tree covering [0, 5)"
        );
    }
}
