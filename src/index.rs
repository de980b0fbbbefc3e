//------------ Index — public facade -----------------------------------------
//
// Wires ZFT -> HZFT/SHZFT + RLOC -> LERLOC into the single type a caller
// constructs: one public entry point over the whole build pipeline,
// rather than exposing each component separately.

use log::{debug, trace};

use crate::bitstring::BitString;
use crate::error::{BuildError, QueryError};
use crate::hzft::Hzft;
use crate::lerloc::Lerloc;
use crate::memory::MemoryReport;
use crate::params::{select_widths, BuildOptions, TrieVariant};
use crate::rloc::Rloc;
use crate::shzft::Shzft;
use crate::zfast::Zft;

/// Either extent-dictionary backing, dispatched once at build time via
/// `BuildOptions::trie_variant`.
enum Dict {
    Hzft(Lerloc<Hzft>),
    Shzft(Lerloc<Shzft>),
}

/// A built, immutable Approximate Range Emptiness index over a sorted
/// set of bit-strings.
pub struct Index {
    dict: Dict,
    keys: Vec<BitString>,
    len: usize,
}

impl Index {
    /// Build an index over `sorted_keys`, which must be strictly
    /// ascending and distinct (checked).
    pub fn build(sorted_keys: &[BitString], options: &BuildOptions) -> Result<Index, BuildError> {
        debug!("building index over {} keys", sorted_keys.len());
        let mut zft = Zft::build(sorted_keys)?;
        zft.sorted_iterate();

        let max_len = sorted_keys.iter().map(|k| k.len()).max().unwrap_or(0);
        let widths = select_widths(max_len, sorted_keys.len(), sorted_keys.len().div_ceil(options.bucket_size.max(1)));
        trace!("selected widths: {widths:?}");

        let true_descriptors: Vec<(BitString, Option<u32>)> = zft
            .handles()
            .into_iter()
            .map(|(h, l)| (h, Some(l)))
            .collect();
        let pseudo: Vec<(BitString, Option<u32>)> =
            zft.pseudo_descriptors().into_iter().map(|k| (k, None)).collect();
        let mut descriptors = true_descriptors;
        descriptors.extend(pseudo);

        let rloc = Rloc::build(&zft, options)?;

        let dict = match options.trie_variant {
            TrieVariant::Hzft => {
                let hzft = Hzft::build(descriptors, 2.0);
                Dict::Hzft(Lerloc::new(hzft, rloc))
            }
            TrieVariant::Shzft => {
                let shzft = Shzft::build(descriptors, 2.0);
                Dict::Shzft(Lerloc::new(shzft, rloc))
            }
        };

        Ok(Index { dict, keys: sorted_keys.to_vec(), len: sorted_keys.len() })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Weak prefix search: the half-open leaf-rank interval of every
    /// key having `p` as a prefix. Behavior is well-defined but
    /// semantically meaningless if `p` is not a genuine prefix of any
    /// key in the original set.
    pub fn weak_prefix_search(&self, p: &BitString) -> Result<(u32, u32), QueryError> {
        let result = match &self.dict {
            Dict::Hzft(l) => l.weak_prefix_search(p),
            Dict::Shzft(l) => l.weak_prefix_search(p),
        };
        result.ok_or(QueryError::KeyNotFound)
    }

    /// Rank-location: given a trie node name `x`, the leaf-rank interval
    /// under it.
    pub fn query(&self, node_name: &BitString) -> Result<(u32, u32), QueryError> {
        let result = match &self.dict {
            Dict::Hzft(l) => l.rloc_query(node_name),
            Dict::Shzft(l) => l.rloc_query(node_name),
        };
        result.ok_or(QueryError::KeyNotFound)
    }

    pub fn byte_size(&self) -> usize {
        match &self.dict {
            Dict::Hzft(l) => l.byte_size(),
            Dict::Shzft(l) => l.byte_size(),
        }
    }

    pub fn memory_report(&self) -> MemoryReport {
        let (dict_name, dict_bytes) = match &self.dict {
            Dict::Hzft(l) => ("hzft", l.dict_byte_size()),
            Dict::Shzft(l) => ("shzft", l.dict_byte_size()),
        };
        let rloc_bytes = match &self.dict {
            Dict::Hzft(l) => l.rloc_byte_size(),
            Dict::Shzft(l) => l.rloc_byte_size(),
        };
        MemoryReport::branch(
            "index",
            vec![
                MemoryReport::leaf(dict_name, dict_bytes),
                MemoryReport::leaf("rloc", rloc_bytes),
            ],
        )
    }

    /// Whether `key` is exactly a member of the original set, resolved
    /// via weak prefix search plus a direct comparison of `key` against
    /// the resolved leaf's own bytes. A singleton rank interval alone is
    /// not sufficient: `key` may simply extend a childless leaf's
    /// extent (e.g. `"110"` against the set `{"10", "101", "11"}`
    /// resolves to the same singleton interval as the leaf `"11"`
    /// itself), so the interval's sole member must be read back and
    /// checked for exact equality.
    pub fn contains(&self, key: &BitString) -> bool {
        self.rank_of(key).is_some()
    }

    /// The exact rank of `key` in the original sorted set, if present.
    pub fn rank_of(&self, key: &BitString) -> Option<usize> {
        match self.weak_prefix_search(key) {
            Ok((i, j)) if j == i + 1 && self.keys[i as usize] == *key => Some(i as usize),
            _ => None,
        }
    }
}
