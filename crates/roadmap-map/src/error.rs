//! The façade-level error type, composing every subsystem's error enum.

use thiserror::Error;

use roadmap_core::{NameError, TrunkId};
use roadmap_graph::GraphError;
use roadmap_index::IndexError;
use roadmap_path::PathError;
use roadmap_trunk::TrunkError;

#[derive(Debug, Error)]
pub enum MapError {
    #[error(transparent)]
    Name(#[from] NameError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Trunk(#[from] TrunkError),

    #[error("trunk id must be in 1..=999")]
    InvalidTrunkId,

    #[error("trunk slot {0} is already in use")]
    SlotTaken(TrunkId),

    #[error("trunk slot {0} is empty")]
    SlotEmpty(TrunkId),

    #[error("city not found")]
    NoSuchCity,

    #[error("a route list needs at least two distinct city names and one length/year per gap")]
    InvalidRouteList,

    #[error("duplicate city name in route list")]
    DuplicateName,

    #[error("an existing road's recorded length/year does not match the route list")]
    InconsistentRoad,

    #[error("repair year {got} precedes an existing road's current year {current}")]
    YearRegression { got: i32, current: i32 },
}

pub type MapResult<T> = Result<T, MapError>;
