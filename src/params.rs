//------------ Build parameters ----------------------------------------------
//
// Picks a concrete machine representation and accounts for it in memory
// reports. A fully generic `{u8,u16,u32}` dispatch table would need
// const-generics threaded through every dictionary; instead `Widths` is
// computed the way that dispatch would pick a width and used for
// memory-report accounting and signature masking, while the in-memory
// representation stays a single concrete `u32`/`u64` path end to end
// (see DESIGN.md).

use serde_derive::{Deserialize, Serialize};

/// Which extent dictionary an [`Index`](crate::Index) is backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrieVariant {
    /// Flat MPHF-backed dictionary, `O(n log L)` space.
    Hzft,
    /// Rank-indexed bitvector + delta-packed extents, `O(n log log L)`.
    Shzft,
}

/// Signature-width policy for the AZFT's per-node `PSig` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureWidth {
    /// Derive a width from `n`, `L_max` and the bucket count, escalating
    /// on MMPH validation failure.
    Auto,
    /// Use exactly this many bits, never escalated.
    Fixed(u8),
}

/// Build-time configuration for an [`Index`](crate::Index).
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub bucket_size: usize,
    pub signature_width: SignatureWidth,
    pub max_retries: usize,
    pub trie_variant: TrieVariant,
    pub seed: u64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            bucket_size: 256,
            signature_width: SignatureWidth::Auto,
            max_retries: 100,
            trie_variant: TrieVariant::Hzft,
            seed: 0,
        }
    }
}

/// Concrete bit widths for the `E` (extent length), `S` (signature) and
/// `I` (node index) fields, selected from `{8, 16, 32}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Widths {
    pub e_bits: u8,
    pub s_bits: u8,
    pub i_bits: u8,
}

const CANDIDATE_WIDTHS: [u8; 3] = [8, 16, 32];

/// Smallest candidate width whose all-ones value (reserved as a
/// sentinel) still exceeds `value`.
fn smallest_fitting(value: u64) -> u8 {
    for w in CANDIDATE_WIDTHS {
        let max_for_w = (1u64 << w) - 1;
        if value < max_for_w {
            return w;
        }
    }
    32
}

/// Select `E`, `I` from the maximum key length and node-index space, and
/// `S` from the signature false-positive-rate formula.
pub fn select_widths(max_len: u32, n: usize, num_buckets: usize) -> Widths {
    let e_bits = smallest_fitting(max_len as u64);
    let i_bits = smallest_fitting((2 * num_buckets.max(1)) as u64);
    let s_bits = select_signature_width(n, max_len, num_buckets);
    Widths { e_bits, s_bits, i_bits }
}

/// The auto-signature-width formula alone, exposed so callers that
/// don't need the full `Widths` triple (MMPH's build-time starting
/// width) can derive the same starting point `select_widths` uses for
/// its `s_bits`.
pub fn select_signature_width(n: usize, max_len: u32, num_buckets: usize) -> u8 {
    let n = n.max(2) as f64;
    let l = (max_len.max(2)) as f64;
    let eps = (num_buckets.max(1) as f64 / n).max(f64::MIN_POSITIVE);
    let raw = n.ln().log2() + l.ln().log2() - eps.log2();
    let raw = raw.max(1.0);
    for w in CANDIDATE_WIDTHS {
        if raw <= w as f64 {
            return w;
        }
    }
    32
}

/// Escalate a signature width to the next candidate on a retry.
/// Saturates at the widest candidate.
pub fn escalate_width(current: u8) -> u8 {
    CANDIDATE_WIDTHS
        .iter()
        .copied()
        .find(|&w| w > current)
        .unwrap_or(32)
}

/// A bit mask selecting the low `bits` bits of a `u64` signature.
pub fn signature_mask(bits: u8) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_grow_with_length() {
        let w1 = select_widths(10, 100, 1);
        let w2 = select_widths(1000, 100, 1);
        assert!(w1.e_bits <= w2.e_bits);
    }

    #[test]
    fn escalation_saturates() {
        assert_eq!(escalate_width(8), 16);
        assert_eq!(escalate_width(16), 32);
        assert_eq!(escalate_width(32), 32);
    }
}
