//! Property coverage for the bulk operations over arbitrary byte corpora.

use std::collections::BTreeSet;

use proptest::prelude::*;

use cairo_avl::{keys, Dict, Tree};

fn corpus() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 4..160)
}

fn packed(bytes: &[u8]) -> Vec<Vec<u8>> {
    keys::pack_keys(bytes, 4)
}

fn key_set(keys: &[Vec<u8>]) -> BTreeSet<Vec<u8>> {
    keys.iter().cloned().collect()
}

fn keys_of(tree: &Tree) -> Vec<Vec<u8>> {
    tree.iter().map(|(k, _)| k.to_vec()).collect()
}

proptest! {
    #[test]
    fn union_holds_exactly_the_key_union(a in corpus(), b in corpus()) {
        let a = packed(&a);
        let b = packed(&b);
        let tree = Tree::from_keys(a.clone());
        let dict = Dict::from_keys(b.clone());

        let (merged, _) = tree.union(&dict);

        let mut expected = key_set(&a);
        expected.extend(b.iter().cloned());
        prop_assert_eq!(keys_of(&merged), expected.into_iter().collect::<Vec<_>>());
        prop_assert!(merged.is_balanced());
        prop_assert!(merged.is_valid_bst());
    }

    #[test]
    fn difference_holds_exactly_the_key_difference(a in corpus(), b in corpus()) {
        let a = packed(&a);
        let b = packed(&b);
        let tree = Tree::from_keys(a.clone());
        let dict = Dict::from_keys(b.clone());

        let (remaining, _) = tree.difference(&dict);

        let expected: Vec<_> = key_set(&a).difference(&key_set(&b)).cloned().collect();
        prop_assert_eq!(keys_of(&remaining), expected);
        prop_assert!(remaining.is_balanced());
        prop_assert!(remaining.is_valid_bst());
    }

    #[test]
    fn union_with_self_is_idempotent(a in corpus()) {
        let tree = Tree::from_keys(packed(&a));

        let (merged, _) = tree.union(&tree.to_dict());

        prop_assert_eq!(keys_of(&merged), keys_of(&tree));
        prop_assert!(merged.is_balanced());
    }

    #[test]
    fn union_key_set_is_commutative(a in corpus(), b in corpus()) {
        let a = packed(&a);
        let b = packed(&b);
        let tree_a = Tree::from_keys(a.clone());
        let tree_b = Tree::from_keys(b);

        let (ab, _) = tree_a.union(&tree_b.to_dict());
        let (ba, _) = tree_b.union(&tree_a.to_dict());

        prop_assert_eq!(keys_of(&ab), keys_of(&ba));
    }

    #[test]
    fn incremental_build_agrees_with_balanced_build(a in corpus()) {
        let a = packed(&a);
        let balanced = Tree::from_keys(a.clone());
        let incremental = Tree::from_inserts(&a);

        prop_assert_eq!(keys_of(&incremental), keys_of(&balanced));
        prop_assert!(incremental.is_balanced());
        prop_assert!(incremental.is_valid_bst());
    }

    #[test]
    fn difference_with_self_annihilates(a in corpus()) {
        let tree = Tree::from_keys(packed(&a));

        let (remaining, _) = tree.difference(&tree.to_dict());

        prop_assert!(remaining.is_empty());
    }

    #[test]
    fn split_partitions_without_losing_keys(a in corpus(), b in corpus()) {
        let a = packed(&a);
        let key = packed(&b)[0].clone();
        let tree = Tree::from_keys(a);

        let (l, r, _) = tree.split(&key);

        for k in keys_of(&l) {
            prop_assert!(k.as_slice() < key.as_slice());
        }
        for k in keys_of(&r) {
            prop_assert!(k.as_slice() > key.as_slice());
        }

        let mut reassembled = keys_of(&l);
        if tree.contains(&key) {
            reassembled.push(key.clone());
        }
        reassembled.extend(keys_of(&r));
        prop_assert_eq!(reassembled, keys_of(&tree));
    }

    #[test]
    fn result_height_is_within_the_avl_bound(a in corpus(), b in corpus()) {
        let tree = Tree::from_keys(packed(&a));
        let dict = Dict::from_keys(packed(&b));

        let (merged, _) = tree.union(&dict);

        let n = merged.iter().count();
        let bound = 1.44 * ((n + 2) as f64).log2();
        prop_assert!((merged.height() as f64) <= bound);
    }

    #[test]
    fn counters_are_deterministic_per_input_pair(a in corpus(), b in corpus()) {
        let tree = Tree::from_keys(packed(&a));
        let dict = Dict::from_keys(packed(&b));

        let (first_tree, first) = tree.union(&dict);
        let (second_tree, second) = tree.union(&dict);

        prop_assert_eq!(first, second);
        prop_assert_eq!(first_tree.new_hash_count(), second_tree.new_hash_count());
    }
}
