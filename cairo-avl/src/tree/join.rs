//! The join algebra: every piece of new tree structure is created through
//! [`join`], which rebalances as it concatenates. `split`, `split_last` and
//! `join2` are its inverses; the bulk operations are written purely in terms
//! of these.

use std::cmp::Ordering;

use super::{
    dict::DictLink,
    node::{expose, height_of, new_node, Counters, Link},
    ops,
};

/// Height of a parent over two sibling subtrees.
///
/// Precondition: the sibling heights differ by at most one; the join
/// recursion guarantees this at every call site.
pub(crate) fn balanced_height(h_l: usize, h_r: usize) -> usize {
    debug_assert!(
        h_l.max(h_r) - h_l.min(h_r) <= 1,
        "siblings out of balance: {} vs {}",
        h_l,
        h_r
    );
    h_l.max(h_r) + 1
}

/// Left rotation around the entry `(k, v)`: the right child becomes the new
/// root. Deconstructs the rotated child and allocates the two replacements.
fn rotate_left(
    k: Vec<u8>,
    v: Vec<u8>,
    t_l: Link,
    t_r: Link,
    t_n: Link,
    ctrs: &mut Counters,
) -> (usize, Link) {
    let (k_r, v_r, t_rl, t_rr, t_rn) = expose(&t_r, ctrs);
    let h_l = height_of(&t_l, ctrs);
    let h_rl = height_of(&t_rl, ctrs);
    let h_rr = height_of(&t_rr, ctrs);

    let h_inner = balanced_height(h_l, h_rl);
    let inner = new_node(k, v, h_inner, t_l, t_rl, t_n);
    let h = balanced_height(h_inner, h_rr);
    (h, new_node(k_r, v_r, h, inner, t_rr, t_rn))
}

/// Mirror of [`rotate_left`].
fn rotate_right(
    k: Vec<u8>,
    v: Vec<u8>,
    t_l: Link,
    t_r: Link,
    t_n: Link,
    ctrs: &mut Counters,
) -> (usize, Link) {
    let (k_l, v_l, t_ll, t_lr, t_ln) = expose(&t_l, ctrs);
    let h_r = height_of(&t_r, ctrs);
    let h_ll = height_of(&t_ll, ctrs);
    let h_lr = height_of(&t_lr, ctrs);

    let h_inner = balanced_height(h_r, h_lr);
    let inner = new_node(k, v, h_inner, t_lr, t_r, t_n);
    let h = balanced_height(h_inner, h_ll);
    (h, new_node(k_l, v_l, h, t_ll, inner, t_ln))
}

/// Concatenation when the left tree is the taller side: descend the left
/// tree's right spine until the right tree fits, then patch up on the way
/// back, rotating where a patched node would tip over.
fn join_right(
    k: Vec<u8>,
    v: Vec<u8>,
    t_l: Link,
    t_r: Link,
    t_n: Link,
    ctrs: &mut Counters,
) -> (usize, Link) {
    let (k_l, v_l, t_ll, t_lr, t_ln) = expose(&t_l, ctrs);
    let h_lr = height_of(&t_lr, ctrs);
    let h_r = height_of(&t_r, ctrs);
    let h_ll = height_of(&t_ll, ctrs);

    if h_lr <= h_r + 1 {
        let h_mid = balanced_height(h_lr, h_r);
        if h_mid <= h_ll + 1 {
            let h = balanced_height(h_ll, h_mid);
            let mid = new_node(k, v, h_mid, t_lr, t_r, t_n);
            return (h, new_node(k_l, v_l, h, t_ll, mid, t_ln));
        }
        let (_, rotated) = rotate_right(k, v, t_lr, t_r, t_n, ctrs);
        return rotate_left(k_l, v_l, t_ll, rotated, t_ln, ctrs);
    }

    let (h_mid, mid) = join_right(k, v, t_lr, t_r, t_n, ctrs);
    if h_mid <= h_ll + 1 {
        let h = balanced_height(h_mid, h_ll);
        return (h, new_node(k_l, v_l, h, t_ll, mid, t_ln));
    }
    rotate_left(k_l, v_l, t_ll, mid, t_ln, ctrs)
}

/// Mirror of [`join_right`]: descend the right tree's left spine.
fn join_left(
    k: Vec<u8>,
    v: Vec<u8>,
    t_l: Link,
    t_r: Link,
    t_n: Link,
    ctrs: &mut Counters,
) -> (usize, Link) {
    let (k_r, v_r, t_rl, t_rr, t_rn) = expose(&t_r, ctrs);
    let h_rl = height_of(&t_rl, ctrs);
    let h_l = height_of(&t_l, ctrs);
    let h_rr = height_of(&t_rr, ctrs);

    if h_rl <= h_l + 1 {
        let h_mid = balanced_height(h_l, h_rl);
        if h_mid <= h_rr + 1 {
            let h = balanced_height(h_rr, h_mid);
            let mid = new_node(k, v, h_mid, t_l, t_rl, t_n);
            return (h, new_node(k_r, v_r, h, mid, t_rr, t_rn));
        }
        let (_, rotated) = rotate_left(k, v, t_l, t_rl, t_n, ctrs);
        return rotate_right(k_r, v_r, rotated, t_rr, t_rn, ctrs);
    }

    let (h_mid, mid) = join_left(k, v, t_l, t_rl, t_n, ctrs);
    if h_mid <= h_rr + 1 {
        let h = balanced_height(h_mid, h_rr);
        return (h, new_node(k_r, v_r, h, mid, t_rr, t_rn));
    }
    rotate_right(k_r, v_r, mid, t_rr, t_rn, ctrs)
}

/// Merge a left tree, a middle entry with its nested payload, and a right
/// tree into one balanced tree containing all of them.
///
/// The terminal case rewrites the nested payload as
/// `union(difference(t_n, d_u), d_d)`; with the update/delete wiring empty,
/// as it is on the current surface, the payload passes through unchanged.
pub(crate) fn join(
    k: Vec<u8>,
    v: Vec<u8>,
    d_u: &DictLink,
    d_d: &DictLink,
    t_l: Link,
    t_r: Link,
    t_n: Link,
    ctrs: &mut Counters,
) -> Link {
    let h_l = height_of(&t_l, ctrs);
    let h_r = height_of(&t_r, ctrs);

    if h_l > h_r + 1 {
        return join_right(k, v, t_l, t_r, t_n, ctrs).1;
    }
    if h_r > h_l + 1 {
        return join_left(k, v, t_l, t_r, t_n, ctrs).1;
    }

    let nested = ops::union(ops::difference(t_n, d_u, ctrs), d_d, ctrs);
    let h = balanced_height(h_l, h_r);
    new_node(k, v, h, t_l, t_r, nested)
}

/// Detach the rightmost entry, returning the remainder and the entry's key,
/// value and nested payload.
pub(crate) fn split_last(t: Link, ctrs: &mut Counters) -> (Link, Vec<u8>, Vec<u8>, Link) {
    let (k, v, l, r, n) = expose(&t, ctrs);
    if r.is_none() {
        return (l, k, v, n);
    }

    let (rest, last_k, last_v, last_n) = split_last(r, ctrs);
    (join(k, v, &None, &None, l, rest, n, ctrs), last_k, last_v, last_n)
}

/// Concatenate two trees with no middle entry.
pub(crate) fn join2(t_l: Link, t_r: Link, ctrs: &mut Counters) -> Link {
    if t_l.is_none() {
        return t_r;
    }
    let (rest, k, v, n) = split_last(t_l, ctrs);
    join(k, v, &None, &None, rest, t_r, n, ctrs)
}

/// Partition a tree around `key` into the strictly-smaller part, the
/// strictly-greater part, and the nested payload of the matched entry (empty
/// when the key is absent). The matched entry itself is consumed; the caller
/// supplies its replacement through [`join`].
pub(crate) fn split(t: Link, key: &[u8], ctrs: &mut Counters) -> (Link, Link, Link) {
    if t.is_none() {
        return (None, None, None);
    }

    let (k, v, l, r, n) = expose(&t, ctrs);
    match key.cmp(k.as_slice()) {
        Ordering::Equal => (l, r, n),
        Ordering::Less => {
            let (l_l, l_r, l_n) = split(l, key, ctrs);
            (l_l, join(k, v, &None, &None, l_r, r, n, ctrs), l_n)
        }
        Ordering::Greater => {
            let (r_l, r_r, r_n) = split(r, key, ctrs);
            (join(k, v, &None, &None, l, r_l, n, ctrs), r_r, r_n)
        }
    }
}
