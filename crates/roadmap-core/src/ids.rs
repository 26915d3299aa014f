//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony. The inner integer is `pub` to allow
//! direct indexing into store `Vec`s via `id.0 as usize`, but callers should
//! prefer the `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the inner type's MAX.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a store index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a city in the `CityStore`.
    pub struct CityId(u32);
}

typed_id! {
    /// Index of a road in the `RoadStore`.
    pub struct RoadId(u32);
}

/// Identifier of a trunk route, valid in `1..=999`. Never constructed as `0`
/// by the façade; `0` is reserved internally to mean "no trunk" wherever a
/// sentinel is needed (e.g. an unused slot).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct TrunkId(pub u16);

impl TrunkId {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = 999;

    /// Construct a `TrunkId`, rejecting anything outside `1..=999`.
    pub fn new(raw: u32) -> Option<TrunkId> {
        if (Self::MIN as u32..=Self::MAX as u32).contains(&raw) {
            Some(TrunkId(raw as u16))
        } else {
            None
        }
    }

    /// Index into a zero-based, 999-slot table (`0..=998`).
    #[inline]
    pub fn slot_index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for TrunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
