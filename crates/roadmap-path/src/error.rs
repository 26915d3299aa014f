//! Path-search error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("no path exists between the given cities")]
    NoPath,

    #[error("more than one shortest, most-recently-repaired path exists")]
    Ambiguous,

    #[error("out of memory")]
    OutOfMemory,
}

pub type PathResult<T> = Result<T, PathError>;
