//! Name-index error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("a city with this name already exists")]
    NotUnique,

    #[error("out of memory")]
    OutOfMemory,
}

pub type IndexResult<T> = Result<T, IndexError>;
