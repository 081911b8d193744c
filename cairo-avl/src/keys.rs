//! Raw-input shaping: packing a byte corpus into the unique keys the tree
//! builders expect.

use std::collections::HashSet;

/// Pack a raw byte corpus into keys of `group` bytes each (the final key may
/// be shorter), keeping only the first occurrence of every key.
pub fn pack_keys(bytes: &[u8], group: usize) -> Vec<Vec<u8>> {
    assert!(group > 0, "group size must be positive");

    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for chunk in bytes.chunks(group) {
        if seen.insert(chunk) {
            keys.push(chunk.to_vec());
        }
    }

    keys
}

/// Split a corpus in two at `at`, clamped to the corpus length.
///
/// The halves are exactly `[..at]` and `[at..]`; no byte is dropped between
/// them.
pub fn split_corpus(bytes: &[u8], at: usize) -> (&[u8], &[u8]) {
    bytes.split_at(at.min(bytes.len()))
}
