//! Re-exports for the common entry points a downstream caller needs.

pub use crate::bitstring::BitString;
pub use crate::error::{BuildError, InvariantViolation, QueryError};
pub use crate::index::Index;
pub use crate::memory::MemoryReport;
pub use crate::params::{BuildOptions, SignatureWidth, TrieVariant};
