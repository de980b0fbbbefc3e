//------------ RLOC — range locator ------------------------------------------
//
// Derives a boundary set `P` from a ZFT, indexes it with an MMPH, and
// marks which `P`-elements are leaves in a `RoaringBitmap` (the same
// rank/select collaborator role SHZFT plays for its descriptor bitvector)
// so a node name converts to a leaf-rank interval via two MMPH ranks and
// two bitvector ranks.

use roaring::RoaringBitmap;

use crate::bitstring::BitString;
use crate::error::BuildError;
use crate::mmph::Mmph;
use crate::params::BuildOptions;
use crate::zfast::Zft;

pub struct Rloc {
    mmph: Mmph,
    bv: RoaringBitmap,
    total_leaves: u32,
}

impl Rloc {
    /// Build an `Rloc` over the boundary set derived from `zft`.
    pub fn build(zft: &Zft, options: &BuildOptions) -> Result<Rloc, BuildError> {
        let mut entries: Vec<(BitString, bool)> = Vec::new();
        for idx in zft.iterate() {
            let node = zft.node(idx);
            let e = &node.extent;
            entries.push((e.trim_trailing_zeros(), node.is_leaf));
            entries.push((e.append_bit(true), false));
            if !e.is_all_ones() {
                entries.push((e.successor().trim_trailing_zeros(), false));
            }
        }

        // Dedup by bit-string, `isLeaf = true` wins on collision.
        entries.sort_by(|(a, _), (b, _)| a.compare(b));
        let mut deduped: Vec<(BitString, bool)> = Vec::with_capacity(entries.len());
        for (key, is_leaf) in entries {
            match deduped.last_mut() {
                Some((last_key, last_leaf)) if *last_key == key => {
                    *last_leaf = *last_leaf || is_leaf;
                }
                _ => deduped.push((key, is_leaf)),
            }
        }
        deduped.sort_by(|(a, _), (b, _)| a.trie_compare(b));

        let p_keys: Vec<BitString> = deduped.iter().map(|(k, _)| k.clone()).collect();
        let mut bv = RoaringBitmap::new();
        for (i, (_, is_leaf)) in deduped.iter().enumerate() {
            if *is_leaf {
                bv.insert(i as u32);
            }
        }
        let total_leaves = bv.len() as u32;

        let mmph = Mmph::build(&p_keys, options)?;

        Ok(Rloc { mmph, bv, total_leaves })
    }

    /// `rank1(i)`: the count of `1`-bits strictly before index `i`
    /// (exclusive), the convention the boundary-set construction needs
    /// for `Query`'s left endpoint and the `Successor`-derived right
    /// endpoint alike.
    fn rank1_exclusive(&self, i: u32) -> u32 {
        if i == 0 {
            0
        } else {
            self.bv.rank(i - 1) as u32
        }
    }

    /// `Query(x)`: the half-open leaf-rank interval `[i, j)` under the
    /// trie node named `x`.
    pub fn query(&self, x: &BitString) -> Option<(u32, u32)> {
        if x.is_empty() {
            return Some((0, self.total_leaves));
        }

        let left_key = x.trim_trailing_zeros();
        let left_rank = self.mmph.rank(&left_key)?;
        let i = self.rank1_exclusive(left_rank as u32);

        let j = if x.is_all_ones() {
            self.total_leaves
        } else {
            let y = x.append_bit(true).successor().trim_trailing_zeros();
            match self.mmph.rank(&y) {
                Some(rr) => self.rank1_exclusive(rr as u32),
                None => i,
            }
        };

        Some((i, j))
    }

    pub fn byte_size(&self) -> usize {
        self.mmph.byte_size() + self.bv.serialized_size()
    }
}
