//! Trunk-route (Route) construction, extension, detour, and description.

pub mod block_scope;
pub mod error;
pub mod trunk;

pub use block_scope::BlockScope;
pub use error::{TrunkError, TrunkResult};
pub use trunk::{attach, build, describe, detach, detour, extend, Trunk};
