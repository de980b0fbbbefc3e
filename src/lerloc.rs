//------------ LERLOC — local exact range locator ---------------------------
//
// Composes an extent dictionary (HZFT or SHZFT) with RLOC into a single
// weak-prefix-search entry point. This is the module `Index` calls
// directly.

use crate::bitstring::BitString;
use crate::rloc::Rloc;
use crate::two_fattest::{fat_binary_search, ExtentDictionary};

pub struct Lerloc<D: ExtentDictionary> {
    dict: D,
    rloc: Rloc,
}

impl<D: ExtentDictionary> Lerloc<D> {
    pub fn new(dict: D, rloc: Rloc) -> Lerloc<D> {
        Lerloc { dict, rloc }
    }

    /// `WeakPrefixSearch(p)`: the half-open leaf-rank interval of every
    /// key of `S` having `p` as a prefix. Behavior is undefined (but
    /// well-defined and non-panicking) if `p` is not actually a prefix
    /// of any key.
    pub fn weak_prefix_search(&self, p: &BitString) -> Option<(u32, u32)> {
        let exit_len = fat_binary_search(p, &self.dict);
        let x = p.prefix(exit_len);
        self.rloc.query(&x)
    }

    /// `RLOC.Query(x)` directly, bypassing the dictionary — used for
    /// `Index::query` (rank-location on an explicit node name).
    pub fn rloc_query(&self, x: &BitString) -> Option<(u32, u32)> {
        self.rloc.query(x)
    }

    pub fn byte_size(&self) -> usize {
        self.dict.byte_size() + self.rloc.byte_size()
    }

    pub fn dict_byte_size(&self) -> usize {
        self.dict.byte_size()
    }

    pub fn rloc_byte_size(&self) -> usize {
        self.rloc.byte_size()
    }
}
