//------------ Two-fattest number and fat binary search ----------------------

use log::{log_enabled, trace, Level};

use crate::bitstring::BitString;

/// The unique integer `f` in `(a, b]` with the highest count of trailing
/// zeros, ties broken to the largest such `f`. `a` may be `-1`, a
/// sentinel meaning "no lower bound".
///
/// Degenerate cases: `a == b` returns `0`; `a == -1, b == 0` returns `0`;
/// otherwise `a == -1` behaves as `a == 0`.
pub fn two_fattest(a: i64, b: i64) -> u64 {
    if a == b {
        return 0;
    }
    let a = if a == -1 {
        if b == 0 {
            return 0;
        }
        0
    } else {
        a
    };
    if a == b {
        return 0;
    }
    debug_assert!(a < b, "two_fattest requires a < b, got a={a} b={b}");
    let x = (a ^ b) as u64;
    let msb = 63 - x.leading_zeros();
    let mask: u64 = !0u64 << msb;
    mask & (b as u64)
}

/// A dictionary mapping bit-strings to extent lengths, with missing
/// entries (or entries explicitly marked as pseudo-descriptors) treated
/// as `+infinity`. Implemented by HZFT, SHZFT and AZFT.
pub trait ExtentDictionary {
    /// `Some(extent_len)` for a true descriptor, `None` for a missing
    /// key or a pseudo-descriptor (treated as the `infinity` sentinel).
    fn lookup(&self, key: &BitString) -> Option<u32>;

    /// Resident footprint in bytes, for `Index::memory_report`.
    fn byte_size(&self) -> usize;
}

/// Binary search over prefix lengths of `q`, probing at "two-fattest"
/// offsets. Returns the length of the longest extent in `dict` that is
/// a prefix of `q`, or `0` if none (including for an empty `q`). Runs
/// in `O(log |q|)` dictionary probes.
pub fn fat_binary_search<D: ExtentDictionary + ?Sized>(q: &BitString, dict: &D) -> u32 {
    let mut a: i64 = 0;
    let b_top = q.len() as i64;
    let mut b: i64 = b_top;
    while b - a > 1 {
        let f = two_fattest(a, b) as i64;
        let probe = q.prefix(f as u32);
        let looked_up = dict.lookup(&probe);
        if log_enabled!(Level::Trace) {
            trace!("fat binary search probe: a={a}, b={b}, f={f}, lookup={looked_up:?}");
        }
        match looked_up {
            Some(g) if (g as i64) < b_top => {
                a = g as i64;
            }
            _ => {
                b = f - 1;
            }
        }
    }
    a as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapDict(HashMap<BitString, u32>);
    impl ExtentDictionary for MapDict {
        fn lookup(&self, key: &BitString) -> Option<u32> {
            self.0.get(key).copied()
        }

        fn byte_size(&self) -> usize {
            0
        }
    }

    #[test]
    fn two_fattest_basic() {
        assert_eq!(two_fattest(0, 0), 0);
        assert_eq!(two_fattest(-1, 0), 0);
        assert_eq!(two_fattest(4, 5), 5);
        // (1,2] -> 2 has the most trailing zeros in that range.
        assert_eq!(two_fattest(1, 2), 2);
        // (0,4] -> 4 = 100b has two trailing zeros, the most in range.
        assert_eq!(two_fattest(0, 4), 4);
    }

    #[test]
    fn fat_binary_search_finds_longest_prefix() {
        let q = BitString::from_str01("101100");
        let mut m = HashMap::new();
        m.insert(BitString::from_str01("1"), 1u32);
        m.insert(BitString::from_str01("1011"), 4u32);
        let dict = MapDict(m);
        assert_eq!(fat_binary_search(&q, &dict), 4);
    }

    #[test]
    fn fat_binary_search_empty_query() {
        let q = BitString::empty();
        let dict = MapDict(HashMap::new());
        assert_eq!(fat_binary_search(&q, &dict), 0);
    }
}
