use crate::identity::TypeIdentity;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when using a `HeterogeneousList` or `Specification`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// Attempted to retrieve a value with a type that doesn't match what was stored
    #[error(
        "type mismatch: requested `{}` but the envelope holds `{}`",
        .requested.name_against(actual),
        .actual.name_against(requested)
    )]
    TypeMismatch {
        requested: TypeIdentity,
        actual: TypeIdentity,
    },
    /// An index-based operation received an index outside its valid range
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// Two specifications disagree on the type at `index`
    #[error(
        "specification mismatch at index {index}: expected `{}`, found `{}`",
        .expected.name_against(actual),
        .actual.name_against(expected)
    )]
    EntryMismatch {
        index: usize,
        expected: TypeIdentity,
        actual: TypeIdentity,
    },
    /// The actual specification ended before the expected one
    #[error("specification mismatch at index {index}: expected `{expected}`, found nothing")]
    MissingEntry {
        index: usize,
        expected: TypeIdentity,
    },
    /// The actual specification has entries beyond the expected one
    #[error("specification mismatch at index {index}: expected nothing, found `{actual}`")]
    UnexpectedEntry { index: usize, actual: TypeIdentity },
}

impl ListError {
    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        debug!(index, len, "rejected out of range index");
        ListError::IndexOutOfRange { index, len }
    }
}
