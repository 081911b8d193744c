use std::sync::Arc;

use super::node::{new_node, Link};

/// Shared handle to a dict subtree. `None` is the empty dict.
pub(crate) type DictLink = Option<Arc<DictNode>>;

/// Bulk-update description node, the right-hand operand of a bulk operation.
///
/// Mirrors [`super::node::Node`] and additionally carries the
/// `update`/`delete` wiring
/// reserved for the authenticated-dictionary layering. Both stay empty on the
/// current surface and are handed through the join algebra unchanged.
#[derive(Debug)]
pub(crate) struct DictNode {
    pub k: Vec<u8>,
    pub v: Vec<u8>,
    pub h: usize,
    pub l: DictLink,
    pub r: DictLink,
    pub update: DictLink,
    pub delete: DictLink,
}

pub(crate) fn new_dict_node(k: Vec<u8>, v: Vec<u8>, h: usize, l: DictLink, r: DictLink) -> DictLink {
    Some(Arc::new(DictNode {
        k,
        v,
        h,
        l,
        r,
        update: None,
        delete: None,
    }))
}

/// Deconstruct a dict subtree into its six fields. Pure getter: dict nodes
/// belong to the update description, not to the committed tree, so no
/// exposure accounting applies.
pub(crate) fn expose_dict(
    link: &DictLink,
) -> (Vec<u8>, Vec<u8>, DictLink, DictLink, DictLink, DictLink) {
    match link {
        Some(d) => (
            d.k.clone(),
            d.v.clone(),
            d.l.clone(),
            d.r.clone(),
            d.update.clone(),
            d.delete.clone(),
        ),
        None => (Vec::new(), Vec::new(), None, None, None, None),
    }
}

/// Rebuild a dict as a plain tree, dropping the update/delete wiring. Every
/// produced node is fresh and therefore exposed.
pub(crate) fn to_node(link: &DictLink) -> Link {
    match link {
        Some(d) => new_node(
            d.k.clone(),
            d.v.clone(),
            d.h,
            to_node(&d.l),
            to_node(&d.r),
            None,
        ),
        None => None,
    }
}

/// Mirror a plain tree as a dict with empty update/delete wiring.
pub(crate) fn to_dict(link: &Link) -> DictLink {
    match link {
        Some(node) => new_dict_node(
            node.k.clone(),
            node.v.clone(),
            node.h,
            to_dict(&node.l),
            to_dict(&node.r),
        ),
        None => None,
    }
}
