use crate::TreeError;

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;
#[cfg(feature = "std")]
use std::boxed::Box;

/// Identity element of the combining operation.
const IDENTITY: i64 = 0;

/// The combining operation. Everything else in the tree is agnostic to it.
#[inline]
fn combine(a: i64, b: i64) -> i64 {
    a + b
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Node {
    /// Inclusive bounds of the positions this node covers.
    start: usize,
    end: usize,
    /// Materialized aggregate over the range; stale while `tag` is pending.
    val: i64,
    /// Pending range assignment not yet pushed to the children.
    tag: Option<i64>,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn leaf(index: usize, value: i64) -> Self {
        Self {
            start: index,
            end: index,
            val: value,
            tag: None,
            left: None,
            right: None,
        }
    }

    fn span(&self) -> i64 {
        (self.end - self.start + 1) as i64
    }

    /// The aggregate this node represents, accounting for a pending tag.
    fn effective(&self) -> i64 {
        match self.tag {
            Some(tag) => tag * self.span(),
            None => self.val,
        }
    }

    /// Pushes a pending tag one level down, materializing it into `val`.
    fn push(&mut self) {
        if let Some(tag) = self.tag.take() {
            self.val = tag * self.span();
            if let Some(left) = self.left.as_deref_mut() {
                left.tag = Some(tag);
            }
            if let Some(right) = self.right.as_deref_mut() {
                right.tag = Some(tag);
            }
        }
    }
}

/// A sum segment tree over a fixed sequence of `i64` values.
///
/// The tree is built once over the positions `[0, n - 1]` by recursive
/// midpoint splitting and its shape never changes afterward. Range
/// assignments are deferred through lazy tags, bounding every operation to
/// O(log n) node visits instead of the length of the range.
///
/// Range arguments are inclusive on both ends and validated before any
/// mutation; an inverted or out-of-bounds range fails with
/// [`TreeError::InvalidRange`] and leaves the tree untouched.
///
/// # Example
///
/// ```
/// use ordtree::SegmentTree;
///
/// let mut tree = SegmentTree::new(&[1, 2, 3, 4, 5]);
/// assert_eq!(tree.query(0, 2), Ok(6));
/// tree.update_range(0, 4, 5)?;
/// assert_eq!(tree.query(0, 3), Ok(20));
/// # Ok::<(), ordtree::TreeError>(())
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentTree {
    root: Option<Box<Node>>,
    len: usize,
}

impl SegmentTree {
    /// Builds the tree over `values`, with position `i` holding `values[i]`.
    ///
    /// An empty slice yields an empty tree on which every range is invalid.
    pub fn new(values: &[i64]) -> Self {
        let root = if values.is_empty() {
            None
        } else {
            Some(Self::build(values, 0, values.len() - 1))
        };
        Self {
            root,
            len: values.len(),
        }
    }

    /// Returns the number of positions the tree covers.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree covers no positions.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Assigns `value` to the single position `index`.
    ///
    /// Equivalent to `update_range(index, index, value)`.
    pub fn update(&mut self, index: usize, value: i64) -> Result<(), TreeError> {
        self.update_range(index, index, value)
    }

    /// Assigns `value` to every position in the inclusive range
    /// `[start, end]`.
    ///
    /// This is an assignment, not an additive update: all covered positions
    /// become exactly `value`. Assigning the same range twice leaves the same
    /// queryable state as assigning it once.
    pub fn update_range(&mut self, start: usize, end: usize, value: i64) -> Result<(), TreeError> {
        self.check_range(start, end)?;
        if let Some(root) = self.root.as_deref_mut() {
            Self::assign(root, start, end, value);
        }
        Ok(())
    }

    /// Returns the sum over the inclusive range `[start, end]`.
    pub fn query(&self, start: usize, end: usize) -> Result<i64, TreeError> {
        self.check_range(start, end)?;
        Ok(self
            .root
            .as_deref()
            .map_or(IDENTITY, |root| Self::sum(root, start, end)))
    }

    fn check_range(&self, start: usize, end: usize) -> Result<(), TreeError> {
        if start > end || end >= self.len {
            return Err(TreeError::InvalidRange {
                start,
                end,
                len: self.len,
            });
        }
        Ok(())
    }

    fn build(values: &[i64], start: usize, end: usize) -> Box<Node> {
        if start == end {
            return Box::new(Node::leaf(start, values[start]));
        }
        let mid = start + (end - start) / 2;
        let left = Self::build(values, start, mid);
        let right = Self::build(values, mid + 1, end);
        Box::new(Node {
            start,
            end,
            val: combine(left.val, right.val),
            tag: None,
            left: Some(left),
            right: Some(right),
        })
    }

    fn assign(node: &mut Node, start: usize, end: usize, value: i64) {
        // Disjoint: nothing to do.
        if start > node.end || end < node.start {
            return;
        }
        // Full cover: defer to a tag instead of writing through to leaves.
        if start <= node.start && node.end <= end {
            node.tag = Some(value);
            return;
        }
        // Partial overlap never reaches a leaf, so both children exist.
        node.push();
        if let (Some(left), Some(right)) = (node.left.as_deref_mut(), node.right.as_deref_mut()) {
            Self::assign(left, start, end, value);
            Self::assign(right, start, end, value);
            node.val = combine(left.effective(), right.effective());
        }
    }

    fn sum(node: &Node, start: usize, end: usize) -> i64 {
        if start > node.end || end < node.start {
            return IDENTITY;
        }
        if start <= node.start && node.end <= end {
            return node.effective();
        }
        // A pending tag covers every descendant, so the overlap can be
        // answered here without descending into stale children.
        if let Some(tag) = node.tag {
            let lo = start.max(node.start);
            let hi = end.min(node.end);
            return tag * (hi - lo + 1) as i64;
        }
        match (node.left.as_deref(), node.right.as_deref()) {
            (Some(left), Some(right)) => {
                combine(Self::sum(left, start, end), Self::sum(right, start, end))
            }
            // Leaves are always disjoint or fully covered.
            _ => node.val,
        }
    }
}
