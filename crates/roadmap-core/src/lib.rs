//! `roadmap-core` — foundational types for the roadmap trunk-route engine.
//!
//! This crate is a dependency of every other `roadmap-*` crate. It
//! intentionally has no `roadmap-*` dependencies and a single external one
//! (`thiserror`, for `NameError`).
//!
//! # What lives here
//!
//! | Module     | Contents                                         |
//! |------------|---------------------------------------------------|
//! | [`ids`]    | `CityId`, `RoadId`, `TrunkId`                     |
//! | [`name`]   | `validate_name`, `NameError`                      |
//! | [`limits`] | Shared numeric bounds (road length, trunk count)  |

pub mod ids;
pub mod limits;
pub mod name;

#[cfg(test)]
mod tests;

pub use ids::{CityId, RoadId, TrunkId};
pub use limits::{BLOCKED_LENGTH, MAX_ROAD_LENGTH, MIN_ROAD_LENGTH, TRUNK_SLOT_COUNT};
pub use name::{validate_name, NameError};
