//! Bulk operations over an input tree and an update dict, written entirely
//! in terms of the join algebra. The recursion structure is a post-order
//! visit of the dict, so the counter values at return are reproducible
//! functions of the two input shapes.

use super::{
    dict::{self, DictLink},
    join,
    node::{Counters, Link},
};

/// Bulk insert-or-update: every entry of `d` is written into `t`. On key
/// collisions the dict's value wins.
pub(crate) fn union(t: Link, d: &DictLink, ctrs: &mut Counters) -> Link {
    if t.is_none() {
        return dict::to_node(d);
    }
    if d.is_none() {
        return t;
    }

    let (k, v, d_l, d_r, d_u, d_d) = dict::expose_dict(d);
    let (t_l, t_r, t_n) = join::split(t, &k, ctrs);
    let l = union(t_l, &d_l, ctrs);
    let r = union(t_r, &d_r, ctrs);
    join::join(k, v, &d_u, &d_d, l, r, t_n, ctrs)
}

/// Bulk delete: every key of `d` that is present in `t` is removed.
pub(crate) fn difference(t: Link, d: &DictLink, ctrs: &mut Counters) -> Link {
    if t.is_none() {
        return None;
    }
    if d.is_none() {
        return t;
    }

    let (k, _, d_l, d_r, _, _) = dict::expose_dict(d);
    let (t_l, t_r, _) = join::split(t, &k, ctrs);
    let l = difference(t_l, &d_l, ctrs);
    let r = difference(t_r, &d_r, ctrs);
    join::join2(l, r, ctrs)
}

/// Point insert. Under point-insert the key doubles as the value.
pub(crate) fn insert(t: Link, key: &[u8], ctrs: &mut Counters) -> Link {
    let (t_l, t_r, t_n) = join::split(t, key, ctrs);
    join::join(
        key.to_vec(),
        key.to_vec(),
        &None,
        &None,
        t_l,
        t_r,
        t_n,
        ctrs,
    )
}
