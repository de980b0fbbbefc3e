//------------ HZFT — flat MPHF-backed extent dictionary ---------------------
//
// The flat extent-dictionary variant: an MPHF over the descriptor set
// gives each one a slot, and a parallel array holds the extent length.
// The MPHF is the `boomphf` crate, an external collaborator in the same
// role `roaring` plays for SHZFT's bitmaps.

use boomphf::Mphf;

use crate::bitstring::BitString;
use crate::two_fattest::ExtentDictionary;

/// `O(n log L)`-space extent dictionary: an MPHF over every true and
/// pseudo descriptor, with a flat `u32` extent-length array alongside
/// (`u32::MAX` marking a pseudo-descriptor's "infinity").
#[derive(Debug, Clone)]
pub struct Hzft {
    mphf: Mphf<BitString>,
    // Keys as inserted into the MPHF, kept so `lookup` can double-check
    // a hash slot actually belongs to the queried key (MPHFs only
    // guarantee no collisions *within* the built set).
    keys: Vec<BitString>,
    extent_lens: Vec<u32>,
}

const PSEUDO: u32 = u32::MAX;

impl Hzft {
    /// `descriptors` are `(key, Some(extent_len))` for true descriptors
    /// and `(key, None)` for pseudo-descriptors.
    pub fn build(descriptors: Vec<(BitString, Option<u32>)>, gamma: f64) -> Hzft {
        let keys: Vec<BitString> = descriptors.iter().map(|(k, _)| k.clone()).collect();
        let mphf = Mphf::new(gamma, &keys);
        let mut extent_lens = vec![PSEUDO; keys.len()];
        for (key, len) in &descriptors {
            let idx = mphf.hash(key) as usize;
            extent_lens[idx] = len.unwrap_or(PSEUDO);
        }
        Hzft { mphf, keys, extent_lens }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Approximate in-memory footprint in bytes, for `MemoryReport`.
    fn footprint(&self) -> usize {
        // boomphf's Mphf doesn't expose a size accessor; approximate via
        // its documented ~3 bits/key at gamma=2.0, plus the raw key and
        // extent-length tables actually held here.
        let mphf_bits = (self.keys.len() as f64 * 3.0).ceil() as usize;
        let mphf_bytes = (mphf_bits + 7) / 8;
        let keys_bytes: usize = self.keys.iter().map(|k| 8 + k.len().div_ceil(8) as usize).sum();
        let extents_bytes = self.extent_lens.len() * std::mem::size_of::<u32>();
        mphf_bytes + keys_bytes + extents_bytes
    }
}

impl ExtentDictionary for Hzft {
    fn lookup(&self, key: &BitString) -> Option<u32> {
        let idx = self.mphf.try_hash(key)? as usize;
        if self.keys.get(idx) != Some(key) {
            return None;
        }
        let len = self.extent_lens[idx];
        if len == PSEUDO {
            None
        } else {
            Some(len)
        }
    }

    fn byte_size(&self) -> usize {
        self.footprint()
    }
}
