//! Shared numeric bounds referenced by more than one crate.

/// Road length must be in `[1, MAX_ROAD_LENGTH]` (`u32::MAX` is reserved as
/// the "blocked" sentinel — see `roadmap_path`).
pub const MAX_ROAD_LENGTH: u32 = u32::MAX - 1;

/// Minimum valid road length.
pub const MIN_ROAD_LENGTH: u32 = 1;

/// Sentinel road length meaning "blocked" (excluded from path search).
pub const BLOCKED_LENGTH: u32 = u32::MAX;

/// Number of trunk-route slots, `1..=999`.
pub const TRUNK_SLOT_COUNT: usize = 999;
