//! City/road graph storage and the low-level mutation operations
//! (`add_road`, `repair_road`, `destroy_road`, `find_road`) that the
//! `roadmap-map` façade composes into its public commands.

pub mod city;
pub mod error;
pub mod ops;
pub mod road;
pub mod route_set;

pub use city::{City, CityStore};
pub use error::{GraphError, GraphResult};
pub use ops::{add_road, destroy_road, find_road, repair_road, AddRoadOutcome};
pub use road::{Road, RoadStore};
pub use route_set::RouteSet;
