//! This library provides a persistent, self-balancing ordered-key tree with
//! bulk set operations expressed through a join-based algebra.
//!
//! Trees map opaque byte-string keys to byte-string values, ordered by
//! lexicographic byte comparison. A bulk [`Tree::union`] or
//! [`Tree::difference`] run against a pre-built input tree rewrites the tree
//! functionally, sharing every untouched subtree with the input, and tallies
//! the commitment work a Merkleized embodiment of the tree would spend: the
//! input nodes it deconstructed, the input nodes whose height it probed, and
//! the fresh nodes whose commitment would be computed from scratch (see
//! [`Counters`] and [`Tree::new_hash_count`]).
//!
//! Raw input corpora are shaped into unique keys by the [`keys`] module, and
//! finished trees can be drawn through the [`viz`] module, which emits
//! Graphviz record-shape digraphs and shells out to the external `dot`
//! renderer.

pub mod keys;
pub mod viz;

mod error;
mod tree;

pub use error::{Error, Result};
pub use tree::{Counters, Dict, Iter, Tree};
