//------------ SHZFT — succinct, rank-indexed extent dictionary --------------
//
// The succinct sibling of HZFT, built on `roaring::RoaringBitmap` as a
// compressed rank/select bitvector playing the rank-select collaborator
// role HZFT fills with raw keys. True descriptors get a `1` in
// `descriptor_bits` at their MPHF slot; each one's `Δ = extentLength -
// |handle|` — the gap two-fattest decomposition keeps small by
// construction — is packed into a bit array sized to the largest delta
// actually seen. A lookup recovers `extentLength` as `|handle| + Δ[j]`
// from a single array read at `j = rank(slot)`, not an accumulation
// over every entry before it, giving HZFT's `O(n log L)` a genuinely
// smaller and genuinely `O(1)`-per-query succinct sibling.

use boomphf::Mphf;
use roaring::RoaringBitmap;

use crate::bitstring::BitString;
use crate::two_fattest::ExtentDictionary;

/// A minimal fixed-width packed integer array backed by a flat `Vec<u64>`.
#[derive(Debug, Clone)]
struct PackedArray {
    bits_per_entry: u32,
    data: Vec<u64>,
    len: usize,
}

impl PackedArray {
    fn new(len: usize, bits_per_entry: u32) -> PackedArray {
        let total_bits = len * bits_per_entry as usize;
        let words = total_bits.div_ceil(64);
        PackedArray { bits_per_entry, data: vec![0u64; words], len }
    }

    fn set(&mut self, idx: usize, value: u64) {
        debug_assert!(idx < self.len);
        let bit_off = idx * self.bits_per_entry as usize;
        for b in 0..self.bits_per_entry {
            let bit = (value >> b) & 1;
            let pos = bit_off + b as usize;
            let word = pos / 64;
            let shift = pos % 64;
            self.data[word] |= bit << shift;
        }
    }

    fn get(&self, idx: usize) -> u64 {
        debug_assert!(idx < self.len);
        let bit_off = idx * self.bits_per_entry as usize;
        let mut value = 0u64;
        for b in 0..self.bits_per_entry {
            let pos = bit_off + b as usize;
            let word = pos / 64;
            let shift = pos % 64;
            let bit = (self.data[word] >> shift) & 1;
            value |= bit << b;
        }
        value
    }

    fn byte_size(&self) -> usize {
        self.data.len() * 8
    }
}

#[derive(Debug, Clone)]
pub struct Shzft {
    mphf: Mphf<BitString>,
    keys: Vec<BitString>,
    descriptor_bits: RoaringBitmap,
    /// `Δ[j] = extentLength(node) − |handle|` for the `j`-th true
    /// descriptor in ascending MPHF-slot order (`j` is that
    /// descriptor's rank among set bits of `descriptor_bits`). Always
    /// non-negative: a handle is by definition a prefix of its own
    /// extent.
    deltas: PackedArray,
    max_delta_bits: u32,
}

impl Shzft {
    pub fn build(descriptors: Vec<(BitString, Option<u32>)>, gamma: f64) -> Shzft {
        let keys: Vec<BitString> = descriptors.iter().map(|(k, _)| k.clone()).collect();
        let mphf = Mphf::new(gamma, &keys);

        let mut slot_of_true: Vec<(u32, u32, u32)> = Vec::new(); // (slot, handle_len, extent_len)
        let mut descriptor_bits = RoaringBitmap::new();
        for (key, len) in &descriptors {
            let slot = mphf.hash(key) as u32;
            if let Some(l) = len {
                descriptor_bits.insert(slot);
                slot_of_true.push((slot, key.len(), *l));
            }
        }
        slot_of_true.sort_by_key(|&(slot, _, _)| slot);

        let mut max_delta: u32 = 0;
        let mut deltas_plain = Vec::with_capacity(slot_of_true.len());
        for &(_, handle_len, extent_len) in &slot_of_true {
            let delta = extent_len - handle_len;
            max_delta = max_delta.max(delta);
            deltas_plain.push(delta);
        }
        let max_delta_bits = bits_needed(max_delta);
        let mut deltas = PackedArray::new(deltas_plain.len(), max_delta_bits.max(1));
        for (i, d) in deltas_plain.into_iter().enumerate() {
            deltas.set(i, d as u64);
        }

        Shzft { mphf, keys, descriptor_bits, deltas, max_delta_bits }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn footprint(&self) -> usize {
        let mphf_bits = (self.keys.len() as f64 * 3.0).ceil() as usize;
        let mphf_bytes = (mphf_bits + 7) / 8;
        let keys_bytes: usize = self.keys.iter().map(|k| 8 + k.len().div_ceil(8) as usize).sum();
        mphf_bytes + keys_bytes + self.descriptor_bits.serialized_size() + self.deltas.byte_size()
    }

    pub fn max_delta_bits(&self) -> u32 {
        self.max_delta_bits
    }
}

fn bits_needed(v: u32) -> u32 {
    32 - v.leading_zeros()
}

impl ExtentDictionary for Shzft {
    fn lookup(&self, key: &BitString) -> Option<u32> {
        let slot = self.mphf.try_hash(key)? as u32;
        if self.keys.get(slot as usize) != Some(key) {
            return None;
        }
        if !self.descriptor_bits.contains(slot) {
            return None;
        }
        // rank of `slot` among set bits, inclusive, 1-based; `- 1` gives
        // its 0-based position in `deltas`.
        let rank = self.descriptor_bits.rank(slot) as usize - 1;
        let delta = self.deltas.get(rank) as u32;
        Some(key.len() + delta)
    }

    fn byte_size(&self) -> usize {
        self.footprint()
    }
}
