//! Builders for input trees and update dicts, plus the freeze/count walks
//! that bracket a bulk operation.

use super::{
    dict::{self, DictLink},
    node::{new_node, stored_height, Counters, Link},
    ops,
};

/// Balanced build from a pre-deduplicated key sequence; each key doubles as
/// its value.
///
/// Keys are sorted and the median of every subsequence becomes a subtree
/// root, so sibling sizes differ by at most one. Heights are computed bottom
/// up and therefore always match the built shape. The finished tree is
/// frozen: its nodes read as untouched input on the next bulk operation.
pub(crate) fn build_balanced(mut keys: Vec<Vec<u8>>) -> Link {
    keys.sort();
    let root = from_slice(&keys);
    reset_flags(&root);
    root
}

fn from_slice(keys: &[Vec<u8>]) -> Link {
    if keys.is_empty() {
        return None;
    }

    let mid = keys.len() / 2;
    let l = from_slice(&keys[..mid]);
    let r = from_slice(&keys[mid + 1..]);
    let h = stored_height(&l).max(stored_height(&r)) + 1;
    new_node(keys[mid].clone(), keys[mid].clone(), h, l, r, None)
}

/// Incremental build by repeated point insert, then frozen.
pub(crate) fn build_by_inserts(keys: &[Vec<u8>]) -> Link {
    let mut scratch = Counters::default();
    let mut root = None;
    for key in keys {
        root = ops::insert(root, key, &mut scratch);
    }
    reset_flags(&root);
    root
}

/// Balanced build of an update dict from a pre-deduplicated key sequence.
pub(crate) fn build_dict_balanced(keys: Vec<Vec<u8>>) -> DictLink {
    dict::to_dict(&build_balanced(keys))
}

/// Clear the per-operation scratch flags across a whole tree.
///
/// Run before a bulk operation so its counters describe that run alone, and
/// after a build so the produced tree reads as pre-existing input.
pub(crate) fn reset_flags(link: &Link) {
    if let Some(node) = link {
        reset_flags(&node.l);
        node.exposed.set(false);
        node.height_taken.set(false);
        reset_flags(&node.r);
    }
}

/// Count the nodes of a finished bulk operation whose commitment would have
/// to be recomputed.
pub(crate) fn count_new_hashes(link: &Link) -> u64 {
    match link {
        Some(node) => {
            u64::from(node.exposed.get()) + count_new_hashes(&node.l) + count_new_hashes(&node.r)
        }
        None => 0,
    }
}
