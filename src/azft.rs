//------------ AZFT — approximate, pointer-free trie --------------------------
//
// Handles map to a `NodeData` record via an MPHF (the same `boomphf`
// collaborator HZFT uses), each carrying a signature (`PSig`, a seeded
// hash of the node's full extent) instead of the extent itself, plus
// four topology shortcuts computed once at build time by walking the
// already-built ZFT — an index-arena "fix up backrefs in a post-pass"
// pattern, generalized to MPH-slot indices instead of arena indices
// since AZFT never keeps the ZFT around.

use std::collections::HashMap;

use boomphf::Mphf;
use log::{log_enabled, trace, Level};

use crate::bitstring::BitString;
use crate::params::signature_mask;
use crate::two_fattest::two_fattest;
use crate::zfast::node::NodeIdx;
use crate::zfast::Zft;

/// Sentinel for `u32`-width topology/index fields: "no such node".
pub const SENTINEL: u32 = u32::MAX;

#[derive(Debug, Clone, Copy)]
pub struct NodeData {
    /// `u32::MAX` ("infinity") for a pseudo-descriptor.
    pub extent_len: u32,
    pub psig: u64,
    pub parent: u32,
    pub min_child: u32,
    pub min_greater_child: u32,
    pub right_child: u32,
    pub rank: u32,
}

impl NodeData {
    fn pseudo() -> NodeData {
        NodeData {
            extent_len: SENTINEL,
            psig: 0,
            parent: SENTINEL,
            min_child: SENTINEL,
            min_greater_child: SENTINEL,
            right_child: SENTINEL,
            rank: SENTINEL,
        }
    }

    pub fn is_pseudo(&self) -> bool {
        self.extent_len == SENTINEL
    }
}

/// The six structural candidates `LowerBound` returns, in order:
/// `minChild`, `minGreaterChild`, the nearest ancestor's
/// `minGreaterChild`, the nearest ancestor's `rightChild`, the exit
/// node's own `rightChild`, and the exit node itself.
pub type LowerBoundCandidates = [NodeData; 6];

#[derive(Debug, Clone)]
pub struct Azft {
    mphf: Mphf<BitString>,
    data: Vec<NodeData>,
    seed: u64,
    /// `PSig` width in bits; both stored and comparison signatures are
    /// masked to this width, so escalating it on a retry genuinely
    /// lowers the false-positive rate instead of being cosmetic.
    sig_bits: u8,
}

impl Azft {
    /// Build an AZFT from an already-built ZFT (its `SortedIterate` must
    /// have run so leaf ranks are assigned — `build` runs it itself).
    pub fn build(zft: &mut Zft, seed: u64, sig_bits: u8, gamma: f64) -> Azft {
        trace!("azft build: {} nodes, seed={seed}, sig_bits={sig_bits}", zft.iterate().count());
        zft.sorted_iterate();

        let true_descriptors: Vec<(NodeIdx, BitString, BitString, u32)> = zft
            .iterate()
            .map(|idx| {
                let n = zft.node(idx);
                (idx, n.handle(), n.extent.clone(), n.extent_length())
            })
            .collect();
        let pseudo_descriptors = zft.pseudo_descriptors();

        let mut keys: Vec<BitString> = true_descriptors.iter().map(|(_, h, _, _)| h.clone()).collect();
        keys.extend(pseudo_descriptors.into_iter());

        let mphf = Mphf::new(gamma, &keys);
        let mut data = vec![NodeData::pseudo(); keys.len()];

        let mut idx_to_slot: HashMap<NodeIdx, u32> = HashMap::with_capacity(true_descriptors.len());
        for (idx, handle, _, _) in &true_descriptors {
            idx_to_slot.insert(*idx, mphf.hash(handle) as u32);
        }

        let mut min_leaf_of: HashMap<NodeIdx, u32> = HashMap::with_capacity(true_descriptors.len());
        if let Some(root) = zft.root() {
            compute_min_leaf(zft, root, &idx_to_slot, &mut min_leaf_of);
        }

        let mut parent_of: HashMap<NodeIdx, u32> = HashMap::with_capacity(true_descriptors.len());
        if let Some(root) = zft.root() {
            compute_parent_pointers(zft, root, SENTINEL, &idx_to_slot, &mut parent_of);
        }

        for (idx, _handle, extent, extent_len) in &true_descriptors {
            let slot = idx_to_slot[idx];
            let node = zft.node(*idx);
            let min_greater_child = node
                .right
                .map(|r| min_leaf_of[&r])
                .unwrap_or(SENTINEL);
            let right_child = node.right.map(|r| idx_to_slot[&r]).unwrap_or(SENTINEL);
            data[slot as usize] = NodeData {
                extent_len: *extent_len,
                psig: extent.hash_with_seed(seed) & signature_mask(sig_bits),
                parent: parent_of[idx],
                min_child: min_leaf_of[idx],
                min_greater_child,
                right_child,
                rank: node.leaf_rank.unwrap_or(SENTINEL),
            };
        }

        Azft { mphf, data, seed, sig_bits }
    }

    fn resolve(&self, slot: u32) -> NodeData {
        if slot == SENTINEL {
            NodeData::pseudo()
        } else {
            self.data[slot as usize]
        }
    }

    /// Length of the longest extent in the AZFT that is a prefix of
    /// `q`, confirmed via a full re-hash of the candidate prefix against
    /// its stored `PSig`. `0` if no such extent.
    pub fn get_existing_prefix(&self, q: &BitString) -> u32 {
        let mut a: i64 = 0;
        let b_top = q.len() as i64;
        let mut b: i64 = b_top;
        while b - a > 1 {
            let f = two_fattest(a, b) as i64;
            let probe = q.prefix(f as u32);
            let confirmed = self.mphf.try_hash(&probe).and_then(|slot| {
                let nd = self.data[slot as usize];
                let ok = !nd.is_pseudo()
                    && (nd.extent_len as i64) <= b_top
                    && nd.psig == q.prefix(nd.extent_len).hash_with_seed(self.seed) & signature_mask(self.sig_bits);
                ok.then_some(nd.extent_len as i64)
            });
            if log_enabled!(Level::Trace) {
                trace!("azft probe: a={a}, b={b}, f={f}, confirmed={confirmed:?}");
            }
            match confirmed {
                Some(g) if g < f => b = f - 1,
                Some(g) => a = g,
                None => b = f - 1,
            }
        }
        a as u32
    }

    /// The six `LowerBound` candidates for `q`, in a fixed order the
    /// caller (MMPH) resolves by comparing stored delimiters.
    pub fn lower_bound(&self, q: &BitString) -> LowerBoundCandidates {
        let exit_len = self.get_existing_prefix(q);
        let exit_slot = if exit_len == 0 {
            None
        } else {
            self.mphf.try_hash(&q.prefix(exit_len))
        };
        let exit = exit_slot.map(|s| self.data[s as usize]).unwrap_or_else(NodeData::pseudo);

        let min_child = self.resolve(exit.min_child);
        let min_greater_child = self.resolve(exit.min_greater_child);
        let anc_mgc = self
            .walk_ancestor_with(exit_slot, |nd| nd.min_greater_child != SENTINEL)
            .map(|nd| self.resolve(nd.min_greater_child))
            .unwrap_or_else(NodeData::pseudo);
        let anc_rc = self
            .walk_ancestor_with(exit_slot, |nd| nd.right_child != SENTINEL)
            .map(|nd| self.resolve(nd.right_child))
            .unwrap_or_else(NodeData::pseudo);
        let own_right_child = self.resolve(exit.right_child);

        [min_child, min_greater_child, anc_mgc, anc_rc, own_right_child, exit]
    }

    fn walk_ancestor_with(&self, start_slot: Option<u32>, pred: impl Fn(&NodeData) -> bool) -> Option<NodeData> {
        let mut cur = start_slot?;
        loop {
            let parent = self.data[cur as usize].parent;
            if parent == SENTINEL {
                return None;
            }
            let pnd = self.data[parent as usize];
            if pred(&pnd) {
                return Some(pnd);
            }
            cur = parent;
        }
    }
}

/// Leftmost leaf handle slot in the subtree rooted at `idx`, computed
/// bottom-up and memoized (matches `sorted_visit`'s left/self/right
/// order in `zfast::mod`).
fn compute_min_leaf(
    zft: &Zft,
    idx: NodeIdx,
    idx_to_slot: &HashMap<NodeIdx, u32>,
    memo: &mut HashMap<NodeIdx, u32>,
) -> u32 {
    if let Some(&v) = memo.get(&idx) {
        return v;
    }
    let node = zft.node(idx);
    let result = if let Some(l) = node.left {
        compute_min_leaf(zft, l, idx_to_slot, memo)
    } else if node.is_leaf {
        idx_to_slot[&idx]
    } else if let Some(r) = node.right {
        compute_min_leaf(zft, r, idx_to_slot, memo)
    } else {
        idx_to_slot[&idx]
    };
    memo.insert(idx, result);
    result
}

/// Top-down: `parent(idx)` is the nearest ancestor for which `idx` lies
/// in its left subtree, path-compressed by propagating the inherited
/// pointer straight through right-child edges.
fn compute_parent_pointers(
    zft: &Zft,
    idx: NodeIdx,
    inherited: u32,
    idx_to_slot: &HashMap<NodeIdx, u32>,
    out: &mut HashMap<NodeIdx, u32>,
) {
    out.insert(idx, inherited);
    let node = zft.node(idx);
    if let Some(l) = node.left {
        compute_parent_pointers(zft, l, idx_to_slot[&idx], idx_to_slot, out);
    }
    if let Some(r) = node.right {
        compute_parent_pointers(zft, r, inherited, idx_to_slot, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soundness_on_scenario_a() {
        let keys = vec![
            BitString::from_str01("10"),
            BitString::from_str01("101"),
            BitString::from_str01("11"),
        ];
        let mut zft = Zft::build(&keys).unwrap();
        let azft = Azft::build(&mut zft, 7, 32, 2.0);

        // Every true extent length is recoverable for each key itself.
        assert_eq!(azft.get_existing_prefix(&BitString::from_str01("10")), 2);
        assert_eq!(azft.get_existing_prefix(&BitString::from_str01("101")), 3);
        assert_eq!(azft.get_existing_prefix(&BitString::from_str01("11")), 2);
    }

    #[test]
    fn long_tail_does_not_overrun() {
        let keys = vec![
            BitString::from_str01("10000000"),
            BitString::from_str01("11111111"),
        ];
        let mut zft = Zft::build(&keys).unwrap();
        let azft = Azft::build(&mut zft, 1, 32, 2.0);
        // "1000" is a prefix of the first key's extent, not a false
        // match against the second key's long unbranched tail.
        let exit = azft.get_existing_prefix(&BitString::from_str01("1000"));
        assert!(exit <= 8);
    }
}
