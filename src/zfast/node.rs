//------------ ZFT node ------------------------------------------------------
//
// Nodes live in a contiguous arena rather than a pointer-rich tree;
// children and parent are plain indices with `None` the sentinel, in the
// same spirit as a `SlotMap`-style arena handle.

use crate::bitstring::BitString;
use crate::two_fattest::two_fattest;

pub type NodeIdx = usize;

#[derive(Debug, Clone)]
pub struct ZftNode {
    pub extent: BitString,
    /// `|parent.extent| + 1`; `0` for the root.
    pub name_length: u32,
    /// Whether this node holds a key of `S` (independent of whether it
    /// also has children — a key may be a proper prefix of another).
    pub is_leaf: bool,
    pub parent: Option<NodeIdx>,
    pub left: Option<NodeIdx>,
    pub right: Option<NodeIdx>,
    /// Set once `SortedIterate` has run over the whole trie.
    pub leaf_rank: Option<u32>,
}

impl ZftNode {
    pub fn new_leaf(extent: BitString, name_length: u32, parent: Option<NodeIdx>) -> Self {
        ZftNode {
            extent,
            name_length,
            is_leaf: true,
            parent,
            left: None,
            right: None,
            leaf_rank: None,
        }
    }

    pub fn child(&self, bit: bool) -> Option<NodeIdx> {
        if bit {
            self.right
        } else {
            self.left
        }
    }

    pub fn set_child(&mut self, bit: bool, idx: NodeIdx) {
        if bit {
            self.right = Some(idx);
        } else {
            self.left = Some(idx);
        }
    }

    pub fn extent_length(&self) -> u32 {
        self.extent.len()
    }

    /// `handle(u) = Prefix(extent, TwoFattest(nameLength - 1, extentLength))`.
    pub fn handle_length(&self) -> u32 {
        let a = self.name_length as i64 - 1;
        let b = self.extent_length() as i64;
        if a >= b {
            return 0;
        }
        two_fattest(a, b) as u32
    }

    pub fn handle(&self) -> BitString {
        self.extent.prefix(self.handle_length())
    }
}
