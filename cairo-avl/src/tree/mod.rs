//! Persistent ordered-key tree with bulk set operations and exposure
//! accounting.
//!
//! The tree is a self-balancing binary search tree over opaque byte-string
//! keys which guarantees the difference in branch heights to be no more than
//! one, so lookups and point updates are `O(log(N))`.
//!
//! The implementation is immutable: every operation returns a new tree, and
//! the parts of the input that the operation did not deconstruct are shared
//! with the result. Bulk [`Tree::union`] and [`Tree::difference`] are
//! expressed through a join-based algebra and additionally tally, per run,
//! the commitment work a Merkleized embodiment of the tree would spend (see
//! [`Counters`]).

mod build;
mod dict;
mod join;
pub(crate) mod node;
mod ops;
mod verify;

pub use node::Counters;

use dict::DictLink;
use node::{Link, Node};

/// Persistent balanced tree mapping byte-string keys to byte-string values.
///
/// Input trees come from the builders ([`Tree::from_keys`],
/// [`Tree::from_inserts`]), which freeze the finished tree so that the next
/// bulk operation's counters start from a clean slate. Bulk operations
/// return the rewritten tree together with the run's [`Counters`]; read
/// [`Tree::new_hash_count`] off the result before feeding it into a further
/// bulk operation, since that next run clears the flags the count is based
/// on.
#[derive(Clone, Default)]
pub struct Tree {
    root: Link,
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Balanced build from a pre-deduplicated key sequence; each key doubles
    /// as its value. The keys need not be sorted.
    pub fn from_keys(keys: Vec<Vec<u8>>) -> Self {
        Self {
            root: build::build_balanced(keys),
        }
    }

    /// Incremental build by repeated point insert.
    pub fn from_inserts(keys: &[Vec<u8>]) -> Self {
        Self {
            root: build::build_by_inserts(keys),
        }
    }

    /// Bulk insert-or-update of every entry in `dict`, the dict's value
    /// winning on key collisions.
    pub fn union(&self, dict: &Dict) -> (Tree, Counters) {
        build::reset_flags(&self.root);
        let mut ctrs = Counters::default();
        let root = ops::union(self.root.clone(), &dict.root, &mut ctrs);
        (Tree { root }, ctrs)
    }

    /// Bulk delete of every key in `dict` from this tree.
    pub fn difference(&self, dict: &Dict) -> (Tree, Counters) {
        build::reset_flags(&self.root);
        let mut ctrs = Counters::default();
        let root = ops::difference(self.root.clone(), &dict.root, &mut ctrs);
        (Tree { root }, ctrs)
    }

    /// Point insert; the key doubles as the value.
    pub fn insert(&self, key: &[u8]) -> (Tree, Counters) {
        build::reset_flags(&self.root);
        let mut ctrs = Counters::default();
        let root = ops::insert(self.root.clone(), key, &mut ctrs);
        (Tree { root }, ctrs)
    }

    /// Partition around `key` into the strictly-smaller part, the
    /// strictly-greater part, and the matched entry's nested payload. The
    /// matched entry itself is consumed.
    pub fn split(&self, key: &[u8]) -> (Tree, Tree, Tree) {
        build::reset_flags(&self.root);
        let mut ctrs = Counters::default();
        let (l, r, n) = join::split(self.root.clone(), key, &mut ctrs);
        (Tree { root: l }, Tree { root: r }, Tree { root: n })
    }

    /// BST membership probe.
    pub fn contains(&self, key: &[u8]) -> bool {
        verify::contains(&self.root, key)
    }

    /// Check the balance invariant everywhere.
    pub fn is_balanced(&self) -> bool {
        verify::is_balanced(&self.root)
    }

    /// Check the ordering invariant everywhere.
    pub fn is_valid_bst(&self) -> bool {
        verify::is_valid_bst(&self.root)
    }

    /// Stored root height; zero for the empty tree.
    pub fn height(&self) -> usize {
        node::stored_height(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes a Merkleized embodiment would have to hash anew after
    /// the bulk operation that produced this tree.
    pub fn new_hash_count(&self) -> u64 {
        build::count_new_hashes(&self.root)
    }

    /// Mirror this tree as an update dict.
    pub fn to_dict(&self) -> Dict {
        Dict {
            root: dict::to_dict(&self.root),
        }
    }

    /// Get an in-order iterator over the tree's entries.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.root)
    }

    pub(crate) fn root(&self) -> &Link {
        &self.root
    }
}

/// Bulk-update dictionary, the right-hand operand of the bulk operations.
#[derive(Clone, Default)]
pub struct Dict {
    root: DictLink,
}

impl Dict {
    /// Create an empty dict.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Balanced build from a pre-deduplicated key sequence; each key doubles
    /// as its value.
    pub fn from_keys(keys: Vec<Vec<u8>>) -> Self {
        Self {
            root: build::build_dict_balanced(keys),
        }
    }

    /// Rebuild as a plain tree, dropping the reserved update/delete wiring.
    pub fn to_tree(&self) -> Tree {
        Tree {
            root: dict::to_node(&self.root),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

/// In-order iterator over a tree's entries.
pub struct Iter<'a> {
    next_stack: Vec<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(node) = self.next_stack.pop() {
            if node.r.is_some() {
                self.traverse_left(node.r.as_deref());
            }

            return Some((node.k.as_slice(), node.v.as_slice()));
        }

        None
    }
}

impl<'a> Iter<'a> {
    fn new(root: &'a Link) -> Self {
        let mut iter = Self {
            next_stack: Vec::new(),
        };

        iter.traverse_left(root.as_deref());
        iter
    }

    /// Dive into the left-most node of the given subtree.
    fn traverse_left(&mut self, mut node: Option<&'a Node>) {
        while let Some(current) = node {
            self.next_stack.push(current);
            node = current.l.as_deref();
        }
    }
}
