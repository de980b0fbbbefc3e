//! End-to-end scenarios exercised against the public `Index` facade in
//! both trie variants where the scenario doesn't specifically target
//! one of them: a minimal branching set, a key that is itself a prefix
//! of a longer one, a long unbranched tail, a dense bucket, delta-packed
//! vs. flat agreement, and the all-ones boundary case.

use arei::{BitString, BuildOptions, Index, TrieVariant};

fn keys(strs: &[&str]) -> Vec<BitString> {
    strs.iter().map(|s| BitString::from_str01(s)).collect()
}

fn both_variants(sorted_keys: &[BitString]) -> (Index, Index) {
    let mut hzft_opts = BuildOptions::default();
    hzft_opts.trie_variant = TrieVariant::Hzft;
    let mut shzft_opts = BuildOptions::default();
    shzft_opts.trie_variant = TrieVariant::Shzft;
    (
        Index::build(sorted_keys, &hzft_opts).unwrap(),
        Index::build(sorted_keys, &shzft_opts).unwrap(),
    )
}

#[test]
fn scenario_a_minimal() {
    let ks = keys(&["10", "101", "11"]);
    let (hzft_idx, shzft_idx) = both_variants(&ks);
    for idx in [&hzft_idx, &shzft_idx] {
        assert_eq!(idx.weak_prefix_search(&BitString::from_str01("1")).unwrap(), (0, 3));
        assert_eq!(idx.weak_prefix_search(&BitString::from_str01("10")).unwrap(), (0, 2));
        assert_eq!(idx.weak_prefix_search(&BitString::from_str01("101")).unwrap(), (1, 2));
        assert_eq!(idx.weak_prefix_search(&BitString::from_str01("11")).unwrap(), (2, 3));
    }
}

/// A string that only extends a childless leaf's extent must not be
/// reported as a member: `"110"` fat-binary-searches to the same exit
/// node as the real leaf `"11"` (which has no children to refine past
/// it), so `weak_prefix_search` alone returns the same singleton
/// interval for both — `contains`/`rank_of` must tell them apart.
#[test]
fn scenario_a_contains_rejects_leaf_extension() {
    let ks = keys(&["10", "101", "11"]);
    let (hzft_idx, shzft_idx) = both_variants(&ks);
    for idx in [&hzft_idx, &shzft_idx] {
        assert!(idx.contains(&BitString::from_str01("11")));
        assert!(!idx.contains(&BitString::from_str01("110")));
        assert_eq!(idx.rank_of(&BitString::from_str01("110")), None);
    }
}

#[test]
fn scenario_b_prefix_of_longer() {
    let ks = keys(&["00001111", "1111"]);
    let (hzft_idx, shzft_idx) = both_variants(&ks);
    for idx in [&hzft_idx, &shzft_idx] {
        assert_eq!(idx.weak_prefix_search(&BitString::from_str01("0000")).unwrap(), (0, 1));
        assert_eq!(idx.weak_prefix_search(&BitString::from_str01("000011")).unwrap(), (0, 1));
        assert_eq!(idx.weak_prefix_search(&BitString::from_str01("1111")).unwrap(), (1, 2));
    }
}

#[test]
fn scenario_c_long_unbranched_tail() {
    let ks = keys(&["10000000", "11111111"]);
    let (hzft_idx, shzft_idx) = both_variants(&ks);
    for idx in [&hzft_idx, &shzft_idx] {
        assert_eq!(idx.weak_prefix_search(&BitString::from_str01("1000")).unwrap(), (0, 1));
        assert_eq!(idx.weak_prefix_search(&BitString::from_str01("1111")).unwrap(), (1, 2));
        assert_eq!(idx.weak_prefix_search(&BitString::from_str01("1")).unwrap(), (0, 2));
    }
}

#[test]
fn scenario_d_dense_bucket() {
    let keys: Vec<BitString> = (0u32..256)
        .map(|i| BitString::from_bits((0..8).rev().map(move |b| (i >> b) & 1 == 1)))
        .collect();
    let idx = Index::build(&keys, &BuildOptions::default()).unwrap();
    for (rank, key) in keys.iter().enumerate() {
        let (start, end) = idx.weak_prefix_search(key).unwrap();
        assert_eq!((start as usize, end as usize), (rank, rank + 1));
    }
}

#[test]
fn scenario_e_delta_packing_matches_hzft() {
    let mut zeros = vec![false, false];
    zeros.extend(std::iter::repeat(false).take(62));
    let mut ones = vec![true, true];
    ones.extend(std::iter::repeat(false).take(62));
    let k0 = BitString::from_bits(zeros);
    let k1 = BitString::from_bits(ones);
    let keys = vec![k0.clone(), k1.clone()];

    let mut hzft_opts = BuildOptions::default();
    hzft_opts.trie_variant = TrieVariant::Hzft;
    let mut shzft_opts = BuildOptions::default();
    shzft_opts.trie_variant = TrieVariant::Shzft;
    let hzft_idx = Index::build(&keys, &hzft_opts).unwrap();
    let shzft_idx = Index::build(&keys, &shzft_opts).unwrap();

    for key in &keys {
        for len in 1..=key.len() {
            let p = key.prefix(len);
            assert_eq!(
                hzft_idx.weak_prefix_search(&p).ok(),
                shzft_idx.weak_prefix_search(&p).ok(),
                "mismatch at prefix length {len}"
            );
        }
    }
}

#[test]
fn scenario_f_all_ones_boundary() {
    let ks = keys(&["1", "11", "111"]);
    let idx = Index::build(&ks, &BuildOptions::default()).unwrap();
    let (_, end) = idx.weak_prefix_search(&BitString::from_str01("111")).unwrap();
    assert_eq!(end, 3);
}
