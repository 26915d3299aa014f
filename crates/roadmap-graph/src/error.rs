//! Graph-subsystem error type.

use thiserror::Error;

use roadmap_core::{CityId, RoadId};

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("the two endpoints must be distinct")]
    IdenticalCities,

    #[error("road length must be in [1, u32::MAX - 1]")]
    InvalidLength,

    #[error("year must not be zero")]
    InvalidYear,

    #[error("a road already exists between these cities")]
    DuplicateRoad,

    #[error("city {0} not found")]
    CityNotFound(CityId),

    #[error("no road between the given cities")]
    NoSuchRoad,

    #[error("road {0} not found")]
    RoadNotFound(RoadId),

    #[error("repair year {got} precedes the road's current year {current}")]
    YearRegression { got: i32, current: i32 },

    #[error("out of memory")]
    OutOfMemory,
}

pub type GraphResult<T> = Result<T, GraphError>;
