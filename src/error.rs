//------------ Errors for the index -----------------------------------------

use std::fmt;

/// Errors that can occur while building an [`Index`](crate::Index).
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum BuildError {
    /// The key iterator yielded keys out of ascending order.
    InputUnsorted,
    /// The same key was inserted into the trie twice.
    DuplicateKey,
    /// The MMPH validation loop could not converge within the configured
    /// retry and signature-width escalation budget.
    BuildFailed {
        reason: String,
        last_seed: u64,
    },
}

impl std::error::Error for BuildError {}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BuildError::InputUnsorted => {
                write!(f, "Error: input keys were not presented in sorted order.")
            }
            BuildError::DuplicateKey => {
                write!(f, "Error: duplicate key in build input.")
            }
            BuildError::BuildFailed { reason, last_seed } => {
                write!(
                    f,
                    "Error: build failed to converge (last seed {last_seed}): {reason}"
                )
            }
        }
    }
}

/// Errors that can occur while querying a built [`Index`](crate::Index).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum QueryError {
    /// The key passed to a monotone minimal perfect hash was outside the
    /// set the hash was constructed over.
    KeyNotFound,
}

impl std::error::Error for QueryError {}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QueryError::KeyNotFound => {
                write!(f, "Error: key not found in the constructed set.")
            }
        }
    }
}

/// A bug: an internal invariant was violated. Should never happen at
/// runtime; if it does, the index must be considered corrupted.
#[derive(Debug, Copy, Clone)]
pub struct InvariantViolation(pub &'static str);

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: invariant violated: {}", self.0)
    }
}

impl std::error::Error for InvariantViolation {}

/// Panics in debug builds, matching the checked-iterator convention used
/// throughout the build path; in release builds this still panics since
/// there is no safe way to continue once an invariant has failed.
#[track_caller]
pub(crate) fn invariant(cond: bool, msg: &'static str) {
    if !cond {
        panic!("{}", InvariantViolation(msg));
    }
}
