//! `arei` — Approximate Range Emptiness index.
//!
//! A static, succinct data structure answering **weak prefix search**
//! (given a prefix `p` of some key, the half-open rank interval of
//! every key sharing it) and **rank location** (given a trie node name,
//! the leaf-rank interval beneath it) over an immutable sorted set of
//! bit-strings.
//!
//! Build once from a sorted, distinct key set with [`Index::build`];
//! the result is cheap to query and safe to share across threads. See
//! [`prelude`] for the common entry points.

pub mod azft;
pub mod bitstring;
pub mod error;
pub mod hzft;
pub mod index;
pub mod lerloc;
pub mod memory;
pub mod mmph;
pub mod params;
#[cfg(feature = "persist")]
pub mod persist;
pub mod prelude;
pub mod rloc;
pub mod shzft;
pub mod two_fattest;
pub mod zfast;

pub use bitstring::BitString;
pub use error::{BuildError, InvariantViolation, QueryError};
pub use index::Index;
pub use memory::MemoryReport;
pub use params::{BuildOptions, SignatureWidth, TrieVariant};
