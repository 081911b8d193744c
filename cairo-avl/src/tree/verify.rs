//! Read-only verifiers. These walk stored fields directly and touch no
//! scratch flags, so they can run between bulk operations without
//! disturbing the accounting.

use std::cmp::Ordering;

use super::node::{stored_height, Link};

/// BST membership probe.
pub(crate) fn contains(link: &Link, key: &[u8]) -> bool {
    match link {
        Some(node) => match key.cmp(node.k.as_slice()) {
            Ordering::Equal => true,
            Ordering::Less => contains(&node.l, key),
            Ordering::Greater => contains(&node.r, key),
        },
        None => false,
    }
}

/// Every node's children differ in height by at most one.
pub(crate) fn is_balanced(link: &Link) -> bool {
    match link {
        Some(node) => {
            let h_l = stored_height(&node.l);
            let h_r = stored_height(&node.r);
            h_l.max(h_r) - h_l.min(h_r) <= 1 && is_balanced(&node.l) && is_balanced(&node.r)
        }
        None => true,
    }
}

/// Immediate-child ordering check; sufficient because keys are unique
/// within a tree.
pub(crate) fn is_valid_bst(link: &Link) -> bool {
    match link {
        Some(node) => {
            if node.l.as_ref().map_or(false, |l| l.k >= node.k) {
                return false;
            }
            if node.r.as_ref().map_or(false, |r| r.k <= node.k) {
                return false;
            }
            is_valid_bst(&node.l) && is_valid_bst(&node.r)
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::super::{build::build_balanced, node::new_node};
    use super::{contains, is_balanced, is_valid_bst};

    fn single_byte_keys(bytes: &[u8]) -> Vec<Vec<u8>> {
        bytes.iter().map(|b| vec![*b]).collect()
    }

    #[test]
    fn contains_finds_present_keys_only() {
        let tree = build_balanced(single_byte_keys(&[1, 3, 5, 7, 9]));

        assert!(contains(&tree, &[5]));
        assert!(contains(&tree, &[1]));
        assert!(contains(&tree, &[9]));
        assert!(!contains(&tree, &[4]));
        assert!(!contains(&None, &[1]));
    }

    #[test]
    fn empty_tree_passes_both_verifiers() {
        assert!(is_balanced(&None));
        assert!(is_valid_bst(&None));
    }

    #[test]
    fn imbalance_is_detected() {
        let grandchild = new_node(vec![3], vec![3], 1, None, None, None);
        let child = new_node(vec![2], vec![2], 2, grandchild, None, None);
        let root = new_node(vec![1], vec![1], 3, None, child, None);

        assert!(!is_balanced(&root));
    }

    #[test]
    fn misordered_child_is_detected() {
        let left = new_node(vec![9], vec![9], 1, None, None, None);
        let root = new_node(vec![5], vec![5], 2, left, None, None);

        assert!(!is_valid_bst(&root));
    }

    #[test]
    fn duplicate_child_key_is_rejected() {
        let left = new_node(vec![5], vec![5], 1, None, None, None);
        let root = new_node(vec![5], vec![5], 2, left, None, None);

        assert!(!is_valid_bst(&root));
    }
}
