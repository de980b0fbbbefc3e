//------------ Optional on-disk layout (feature = "persist") ----------------
//
// The index is designed so persistence is a future add-on rather than a
// requirement, so this core implements only the header record, not a
// full serializer. An optional, gated feature with zero cost in the
// default build, without pulling in a storage engine this index
// doesn't need.

use serde_derive::{Deserialize, Serialize};

use crate::params::{BuildOptions, TrieVariant};

const FORMAT_VERSION: u32 = 1;

/// `[header | MPHF1 | … | rank-select bitvectors | packed Δ/rank arrays
/// | delimiter bit-strings]`; this type covers the header record. The
/// body sections are intentionally left to a future on-disk writer —
/// this feature exists so the header format is settled, not to ship a
/// full serializer for a static core with no persistence requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistHeader {
    pub version: u32,
    pub e_bits: u8,
    pub s_bits: u8,
    pub i_bits: u8,
    pub bucket_size: usize,
    pub key_count: usize,
    pub seed: u64,
    pub trie_variant: TrieVariant,
}

impl PersistHeader {
    pub fn new(options: &BuildOptions, widths: crate::params::Widths, key_count: usize) -> PersistHeader {
        PersistHeader {
            version: FORMAT_VERSION,
            e_bits: widths.e_bits,
            s_bits: widths.s_bits,
            i_bits: widths.i_bits,
            bucket_size: options.bucket_size,
            key_count,
            seed: options.seed,
            trie_variant: options.trie_variant,
        }
    }

    /// Little-endian length-prefixed JSON encoding of the header, the
    /// simplest honest "little-endian header" this crate can offer
    /// without a bit-packing dependency beyond what HZFT/SHZFT already
    /// use internally.
    pub fn to_bytes(&self) -> Vec<u8> {
        let body = serde_json::to_vec(self).expect("header serialization is infallible");
        let mut out = Vec::with_capacity(4 + body.len());
        out.extend_from_slice(&(body.len() as u32).to_le_bytes());
        out.extend_from_slice(&body);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<PersistHeader, serde_json::Error> {
        let len = u32::from_le_bytes(bytes[..4].try_into().expect("truncated persist header")) as usize;
        serde_json::from_slice(&bytes[4..4 + len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Widths;

    #[test]
    fn header_roundtrips() {
        let options = BuildOptions::default();
        let widths = Widths { e_bits: 8, s_bits: 16, i_bits: 8 };
        let header = PersistHeader::new(&options, widths, 42);
        let bytes = header.to_bytes();
        let back = PersistHeader::from_bytes(&bytes).unwrap();
        assert_eq!(back.key_count, 42);
        assert_eq!(back.bucket_size, options.bucket_size);
    }
}
