use core::cmp::Ordering;

#[cfg(not(feature = "std"))]
use alloc::collections::VecDeque;
#[cfg(feature = "std")]
use std::collections::VecDeque;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Node handles are indices into the tree's arena. Nodes are never removed,
// so a handle stays valid for the lifetime of the tree.
type NodeId = u32;
const NIL: NodeId = u32::MAX;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Node {
    value: i64,
    color: Color,
    parent: NodeId,
    left: NodeId,
    right: NodeId,
}

impl Node {
    fn new(value: i64, parent: NodeId) -> Self {
        Self {
            value,
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
        }
    }
}

/// A red-black tree over distinct `i64` values.
///
/// The tree keeps itself balanced on insertion, guaranteeing O(log n) height:
/// the root is always Black, no Red node has a Red parent or child, and every
/// root-to-leaf path passes through the same number of Black nodes.
///
/// Nodes live in an arena owned by the tree and reference each other through
/// stable indices, so rebalancing rotations rewire indices rather than moving
/// nodes.
///
/// # Example
///
/// ```
/// use ordtree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// for value in [7, 6, 5, 4, 3, 2, 1] {
///     tree.insert(value);
/// }
/// assert_eq!(tree.inorder(), vec![1, 2, 3, 4, 5, 6, 7]);
/// assert_eq!(tree.level_order(), vec![6, 4, 7, 2, 5, 1, 3]);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RedBlackTree {
    root: NodeId,
    nodes: Vec<Node>,
}

impl Default for RedBlackTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RedBlackTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: NIL,
            nodes: Vec::new(),
        }
    }

    /// Returns the number of values in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts `value` into the tree and rebalances.
    ///
    /// Inserting a value that is already present is a silent no-op: the
    /// descent terminates on the existing node without attaching anything or
    /// altering the structure.
    pub fn insert(&mut self, value: i64) {
        let mut parent = NIL;
        let mut current = self.root;
        let mut went_left = false;

        while current != NIL {
            parent = current;
            let node = &self.nodes[current as usize];
            match value.cmp(&node.value) {
                Ordering::Equal => return,
                Ordering::Less => {
                    current = node.left;
                    went_left = true;
                }
                Ordering::Greater => {
                    current = node.right;
                    went_left = false;
                }
            }
        }

        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node::new(value, parent));

        if parent == NIL {
            self.root = id;
        } else if went_left {
            self.nodes[parent as usize].left = id;
        } else {
            self.nodes[parent as usize].right = id;
        }

        self.fix_insert(id);
    }

    /// Returns all values in ascending order.
    ///
    /// The sequence is recomputed on every call; an empty tree yields an
    /// empty vector.
    pub fn inorder(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.collect_inorder(self.root, &mut out);
        out
    }

    /// Returns all values in breadth-first order, rows top to bottom and left
    /// to right within a row.
    pub fn level_order(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.nodes.len());
        if self.root == NIL {
            return out;
        }

        let mut queue = VecDeque::new();
        queue.push_back(self.root);

        while let Some(id) = queue.pop_front() {
            let node = &self.nodes[id as usize];
            out.push(node.value);
            if node.left != NIL {
                queue.push_back(node.left);
            }
            if node.right != NIL {
                queue.push_back(node.right);
            }
        }

        out
    }

    fn collect_inorder(&self, id: NodeId, out: &mut Vec<i64>) {
        if id == NIL {
            return;
        }
        let node = &self.nodes[id as usize];
        self.collect_inorder(node.left, out);
        out.push(node.value);
        self.collect_inorder(node.right, out);
    }

    // NIL children count as Black.
    fn color(&self, id: NodeId) -> Color {
        if id == NIL {
            Color::Black
        } else {
            self.nodes[id as usize].color
        }
    }

    /// Restores the red-black invariants after inserting `node` as a Red
    /// leaf, walking up while the node and its parent are both Red.
    fn fix_insert(&mut self, mut node: NodeId) {
        while node != self.root
            && self.nodes[node as usize].color == Color::Red
            && self.color(self.nodes[node as usize].parent) == Color::Red
        {
            let mut parent = self.nodes[node as usize].parent;
            // A Red parent is never the root, so the grandparent exists.
            let grandparent = self.nodes[parent as usize].parent;

            if parent == self.nodes[grandparent as usize].left {
                let uncle = self.nodes[grandparent as usize].right;

                if uncle != NIL && self.nodes[uncle as usize].color == Color::Red {
                    // Red uncle: recolor and continue from the grandparent.
                    self.nodes[grandparent as usize].color = Color::Red;
                    self.nodes[parent as usize].color = Color::Black;
                    self.nodes[uncle as usize].color = Color::Black;
                    node = grandparent;
                } else {
                    // Inner child: rotate it out so the path is left-left.
                    if node == self.nodes[parent as usize].right {
                        self.rotate_left(parent);
                        node = parent;
                        parent = self.nodes[node as usize].parent;
                    }
                    self.rotate_right(grandparent);
                    self.nodes[grandparent as usize].color = Color::Red;
                    self.nodes[parent as usize].color = Color::Black;
                    node = parent;
                }
            } else {
                // Mirror image: parent is the right child of the grandparent.
                let uncle = self.nodes[grandparent as usize].left;

                if uncle != NIL && self.nodes[uncle as usize].color == Color::Red {
                    self.nodes[grandparent as usize].color = Color::Red;
                    self.nodes[parent as usize].color = Color::Black;
                    self.nodes[uncle as usize].color = Color::Black;
                    node = grandparent;
                } else {
                    if node == self.nodes[parent as usize].left {
                        self.rotate_right(parent);
                        node = parent;
                        parent = self.nodes[node as usize].parent;
                    }
                    self.rotate_left(grandparent);
                    self.nodes[grandparent as usize].color = Color::Red;
                    self.nodes[parent as usize].color = Color::Black;
                    node = parent;
                }
            }
        }

        self.nodes[self.root as usize].color = Color::Black;
    }

    /// Left-rotation at `x`: the right child takes `x`'s position, `x`
    /// becomes its left child, and the child's former left subtree becomes
    /// `x`'s right subtree. Rewires indices only; values and colors are
    /// untouched.
    fn rotate_left(&mut self, x: NodeId) {
        let y = self.nodes[x as usize].right;
        let y_left = self.nodes[y as usize].left;
        let x_parent = self.nodes[x as usize].parent;

        self.nodes[x as usize].right = y_left;
        if y_left != NIL {
            self.nodes[y_left as usize].parent = x;
        }

        self.nodes[y as usize].parent = x_parent;
        if x == self.root {
            self.root = y;
        } else if x == self.nodes[x_parent as usize].left {
            self.nodes[x_parent as usize].left = y;
        } else {
            self.nodes[x_parent as usize].right = y;
        }

        self.nodes[y as usize].left = x;
        self.nodes[x as usize].parent = y;
    }

    /// Right-rotation at `y`, the mirror of [`Self::rotate_left`].
    fn rotate_right(&mut self, y: NodeId) {
        let x = self.nodes[y as usize].left;
        let x_right = self.nodes[x as usize].right;
        let y_parent = self.nodes[y as usize].parent;

        self.nodes[y as usize].left = x_right;
        if x_right != NIL {
            self.nodes[x_right as usize].parent = y;
        }

        self.nodes[x as usize].parent = y_parent;
        if y == self.root {
            self.root = x;
        } else if y == self.nodes[y_parent as usize].left {
            self.nodes[y_parent as usize].left = x;
        } else {
            self.nodes[y_parent as usize].right = x;
        }

        self.nodes[x as usize].right = y;
        self.nodes[y as usize].parent = x;
    }
}

#[cfg(test)]
impl RedBlackTree {
    /// Verifies every red-black invariant: Black root with no parent, no
    /// Red-Red adjacency, uniform black-height, BST ordering, and parent
    /// links consistent with the owning edges.
    fn invariants_hold(&self) -> bool {
        if self.root == NIL {
            return true;
        }
        let root = &self.nodes[self.root as usize];
        if root.color != Color::Black || root.parent != NIL {
            return false;
        }
        self.black_height(self.root, None, None).is_some()
    }

    /// Returns the subtree's black-height, or `None` if any invariant is
    /// violated below (or at) `id`. `lo`/`hi` are exclusive value bounds
    /// inherited from ancestors.
    fn black_height(&self, id: NodeId, lo: Option<i64>, hi: Option<i64>) -> Option<u32> {
        if id == NIL {
            return Some(1);
        }
        let node = &self.nodes[id as usize];
        if lo.is_some_and(|lo| node.value <= lo) || hi.is_some_and(|hi| node.value >= hi) {
            return None;
        }
        if node.color == Color::Red
            && (self.color(node.left) == Color::Red || self.color(node.right) == Color::Red)
        {
            return None;
        }
        if node.left != NIL && self.nodes[node.left as usize].parent != id {
            return None;
        }
        if node.right != NIL && self.nodes[node.right as usize].parent != id {
            return None;
        }
        let left = self.black_height(node.left, lo, Some(node.value))?;
        let right = self.black_height(node.right, Some(node.value), hi)?;
        if left != right {
            return None;
        }
        Some(left + u32::from(node.color == Color::Black))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(values: impl IntoIterator<Item = i64>) -> RedBlackTree {
        let mut tree = RedBlackTree::new();
        for value in values {
            tree.insert(value);
        }
        tree
    }

    fn color_of(tree: &RedBlackTree, value: i64) -> Color {
        let mut current = tree.root;
        while current != NIL {
            let node = &tree.nodes[current as usize];
            match value.cmp(&node.value) {
                Ordering::Equal => return node.color,
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }
        panic!("value {value} not in tree");
    }

    #[test]
    fn empty_traversals() {
        let tree = RedBlackTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.inorder(), Vec::<i64>::new());
        assert_eq!(tree.level_order(), Vec::<i64>::new());
    }

    #[test]
    fn descending_insertions() {
        let tree = tree_of([7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(tree.inorder(), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(tree.level_order(), vec![6, 4, 7, 2, 5, 1, 3]);
        assert!(tree.invariants_hold());
    }

    #[test]
    fn single_insert_blackens_root() {
        let tree = tree_of([1]);
        assert_eq!(tree.level_order(), vec![1]);
        assert_eq!(color_of(&tree, 1), Color::Black);
    }

    #[test]
    fn second_insert_stays_red() {
        let tree = tree_of([1, 2]);
        assert_eq!(tree.level_order(), vec![1, 2]);
        assert_eq!(color_of(&tree, 1), Color::Black);
        assert_eq!(color_of(&tree, 2), Color::Red);
    }

    #[test]
    fn third_insert_rotates_and_recolors() {
        let tree = tree_of([1, 2, 3]);
        assert_eq!(tree.level_order(), vec![2, 1, 3]);
        assert_eq!(color_of(&tree, 2), Color::Black);
        assert_eq!(color_of(&tree, 1), Color::Red);
        assert_eq!(color_of(&tree, 3), Color::Red);
    }

    #[test]
    fn fourth_insert_recolors_uncle() {
        let tree = tree_of([1, 2, 3, 4]);
        assert_eq!(tree.level_order(), vec![2, 1, 3, 4]);
        assert_eq!(color_of(&tree, 2), Color::Black);
        assert_eq!(color_of(&tree, 1), Color::Black);
        assert_eq!(color_of(&tree, 3), Color::Black);
        assert_eq!(color_of(&tree, 4), Color::Red);
    }

    #[test]
    fn fifth_insert_rotates_right_spine() {
        let tree = tree_of([1, 2, 3, 4, 5]);
        assert_eq!(tree.level_order(), vec![2, 1, 4, 3, 5]);
        assert!(tree.invariants_hold());
    }

    #[test]
    fn duplicate_insert_is_a_noop() {
        let mut tree = tree_of([5, 3, 8]);
        let before = tree.level_order();

        tree.insert(3);
        tree.insert(5);
        tree.insert(8);

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.level_order(), before);
        assert!(tree.invariants_hold());
    }

    #[test]
    fn ascending_insertions_stay_balanced() {
        let mut tree = RedBlackTree::new();
        for value in 1..=64 {
            tree.insert(value);
            assert!(tree.invariants_hold(), "violation after inserting {value}");
        }
        assert_eq!(tree.inorder(), (1..=64).collect::<Vec<_>>());
    }

    #[test]
    fn descending_insertions_stay_balanced() {
        let mut tree = RedBlackTree::new();
        for value in (1..=64).rev() {
            tree.insert(value);
            assert!(tree.invariants_hold(), "violation after inserting {value}");
        }
        assert_eq!(tree.inorder(), (1..=64).collect::<Vec<_>>());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn random_insertions_keep_invariants(
                values in proptest::collection::vec(-1_000i64..1_000, 0..256)
            ) {
                let mut tree = RedBlackTree::new();
                for &value in &values {
                    tree.insert(value);
                    prop_assert!(tree.invariants_hold());
                }

                let mut expected = values;
                expected.sort_unstable();
                expected.dedup();
                prop_assert_eq!(tree.inorder(), expected);
            }
        }
    }
}
