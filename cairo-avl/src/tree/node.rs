use std::{cell::Cell, sync::Arc};

/// Shared handle to a subtree. `None` is the empty tree.
pub(crate) type Link = Option<Arc<Node>>;

/// Balanced-tree node.
///
/// Nodes are semantically immutable and shared between the trees produced by
/// successive bulk operations; a bulk operation never rewrites a node it did
/// not allocate. The two `Cell` flags are per-operation scratch for the
/// exposure accounting and carry no tree structure. Because of them the tree
/// is a single-threaded value.
#[derive(Debug)]
pub(crate) struct Node {
    /// Key of the key-value pair.
    pub k: Vec<u8>,
    /// Value of the key-value pair.
    pub v: Vec<u8>,

    /// Subtree height, rooted in this node. The empty tree has height zero.
    pub h: usize,

    /// Left subtree.
    pub l: Link,

    /// Right subtree.
    pub r: Link,

    /// Opaque nested subtree, carried through the join algebra untouched.
    pub n: Link,

    /// Set once a bulk operation has structurally deconstructed this node.
    pub exposed: Cell<bool>,

    /// Set once a bulk operation has read this node's height.
    pub height_taken: Cell<bool>,
}

/// Commitment-work tally for one bulk operation.
///
/// In a Merkleized embodiment of the tree, `exposed` counts the input nodes
/// whose commitment had to be recomputed from their children, `height_probes`
/// counts the input nodes whose stored height was read without deconstructing
/// them, and `revisited` counts repeat observations that cost nothing
/// further.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub exposed: u64,
    pub height_probes: u64,
    pub revisited: u64,
}

/// Allocate a node. Fresh nodes are born exposed: their commitment does not
/// exist yet and will have to be computed either way.
pub(crate) fn new_node(k: Vec<u8>, v: Vec<u8>, h: usize, l: Link, r: Link, n: Link) -> Link {
    Some(Arc::new(Node {
        k,
        v,
        h,
        l,
        r,
        n,
        exposed: Cell::new(true),
        height_taken: Cell::new(true),
    }))
}

/// Deconstruct a subtree into its five fields.
///
/// The first deconstruction of an untouched node counts towards
/// `Counters::exposed` and subsumes an earlier height probe of the same node;
/// deconstructing an already-exposed node is a revisit.
pub(crate) fn expose(link: &Link, ctrs: &mut Counters) -> (Vec<u8>, Vec<u8>, Link, Link, Link) {
    let node = match link {
        Some(node) => node,
        None => return (Vec::new(), Vec::new(), None, None, None),
    };

    if node.exposed.get() {
        ctrs.revisited += 1;
    } else {
        if node.height_taken.get() {
            // The probe's cost is subsumed into the exposure.
            debug_assert!(ctrs.height_probes > 0, "height probe counter underflow");
            ctrs.height_probes -= 1;
        } else {
            node.height_taken.set(true);
        }
        ctrs.exposed += 1;
        node.exposed.set(true);
    }

    (
        node.k.clone(),
        node.v.clone(),
        node.l.clone(),
        node.r.clone(),
        node.n.clone(),
    )
}

/// Read a subtree height during a bulk operation.
///
/// The first probe of an untouched node counts towards
/// `Counters::height_probes`; any later read is a revisit.
pub(crate) fn height_of(link: &Link, ctrs: &mut Counters) -> usize {
    let node = match link {
        Some(node) => node,
        None => return 0,
    };

    if node.exposed.get() || node.height_taken.get() {
        ctrs.revisited += 1;
    } else {
        ctrs.height_probes += 1;
    }
    node.height_taken.set(true);

    node.h
}

/// Height read outside any bulk operation. Touches no scratch flags.
pub(crate) fn stored_height(link: &Link) -> usize {
    link.as_ref().map_or(0, |node| node.h)
}

#[cfg(test)]
mod tests {
    use super::{expose, height_of, new_node, stored_height, Counters};

    fn frozen_leaf(key: u8) -> super::Link {
        let leaf = new_node(vec![key], vec![key], 1, None, None, None);
        let node = leaf.as_ref().unwrap();
        node.exposed.set(false);
        node.height_taken.set(false);
        leaf
    }

    #[test]
    fn expose_of_empty_tree_returns_empty_fields_and_counts_nothing() {
        let mut ctrs = Counters::default();

        let (k, v, l, r, n) = expose(&None, &mut ctrs);

        assert!(k.is_empty() && v.is_empty());
        assert!(l.is_none() && r.is_none() && n.is_none());
        assert_eq!(ctrs, Counters::default());
    }

    #[test]
    fn first_expose_of_input_node_counts_once() {
        let leaf = frozen_leaf(7);
        let mut ctrs = Counters::default();

        expose(&leaf, &mut ctrs);

        assert_eq!(ctrs.exposed, 1);
        assert_eq!(ctrs.height_probes, 0);
        assert_eq!(ctrs.revisited, 0);
        assert!(leaf.as_ref().unwrap().exposed.get());
        assert!(leaf.as_ref().unwrap().height_taken.get());
    }

    #[test]
    fn second_expose_is_a_revisit() {
        let leaf = frozen_leaf(7);
        let mut ctrs = Counters::default();

        expose(&leaf, &mut ctrs);
        expose(&leaf, &mut ctrs);

        assert_eq!(ctrs.exposed, 1);
        assert_eq!(ctrs.revisited, 1);
    }

    #[test]
    fn height_probe_counts_once_then_revisits() {
        let leaf = frozen_leaf(7);
        let mut ctrs = Counters::default();

        assert_eq!(height_of(&leaf, &mut ctrs), 1);
        assert_eq!(height_of(&leaf, &mut ctrs), 1);

        assert_eq!(ctrs.height_probes, 1);
        assert_eq!(ctrs.revisited, 1);
        assert_eq!(ctrs.exposed, 0);
    }

    #[test]
    fn expose_after_probe_subsumes_the_probe() {
        let leaf = frozen_leaf(7);
        let mut ctrs = Counters::default();

        height_of(&leaf, &mut ctrs);
        expose(&leaf, &mut ctrs);

        assert_eq!(ctrs.exposed, 1);
        assert_eq!(ctrs.height_probes, 0);
        assert_eq!(ctrs.revisited, 0);
    }

    #[test]
    fn height_of_empty_tree_is_zero() {
        let mut ctrs = Counters::default();

        assert_eq!(height_of(&None, &mut ctrs), 0);
        assert_eq!(ctrs, Counters::default());
    }

    #[test]
    fn stored_height_reads_without_marking() {
        let leaf = frozen_leaf(7);

        assert_eq!(stored_height(&leaf), 1);
        assert_eq!(stored_height(&None), 0);
        assert!(!leaf.as_ref().unwrap().height_taken.get());
    }
}
