//! Trunk-subsystem error type.

use thiserror::Error;

use roadmap_core::RoadId;
use roadmap_path::PathError;

#[derive(Debug, Error)]
pub enum TrunkError {
    #[error("the two endpoints must be distinct")]
    IdenticalCities,

    #[error("no path exists between the given cities")]
    NoPath,

    #[error("more than one shortest, most-recently-repaired path exists")]
    Ambiguous,

    #[error("city is already on this trunk")]
    AlreadyOnTrunk,

    #[error("road {0} is not part of this trunk")]
    RoadNotInTrunk(RoadId),

    #[error("out of memory")]
    OutOfMemory,
}

impl From<PathError> for TrunkError {
    fn from(e: PathError) -> Self {
        match e {
            PathError::NoPath => TrunkError::NoPath,
            PathError::Ambiguous => TrunkError::Ambiguous,
            PathError::OutOfMemory => TrunkError::OutOfMemory,
        }
    }
}

pub type TrunkResult<T> = Result<T, TrunkError>;
