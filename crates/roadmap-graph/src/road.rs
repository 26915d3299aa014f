//! Road records and the `RoadStore` arena.

use roadmap_core::{CityId, RoadId, BLOCKED_LENGTH};

use crate::route_set::RouteSet;

/// An undirected edge between two distinct cities.
///
/// Holds *non-owning* references to its two cities (by id) and the set of
/// trunk ids currently traversing it (see [`RouteSet`]).
pub struct Road {
    city1: CityId,
    city2: CityId,
    length: u32,
    year: i32,
    routes: RouteSet,
    blocked: bool,
}

impl Road {
    fn new(city1: CityId, city2: CityId, length: u32, year: i32) -> Self {
        Road { city1, city2, length, year, routes: RouteSet::new(), blocked: false }
    }

    pub fn cities(&self) -> (CityId, CityId) {
        (self.city1, self.city2)
    }

    /// The city at the other end of this road from `from`.
    ///
    /// # Panics
    /// Panics (debug builds only) if `from` is not one of this road's two
    /// endpoints — callers only ever invoke this with a city known to be
    /// incident to the road (it came from that city's own incidence list).
    pub fn other_end(&self, from: CityId) -> CityId {
        if from == self.city1 {
            self.city2
        } else {
            debug_assert_eq!(from, self.city2);
            self.city1
        }
    }

    pub fn has_city(&self, city: CityId) -> bool {
        self.city1 == city || self.city2 == city
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn routes(&self) -> &RouteSet {
        &self.routes
    }

    /// `true` iff this road is hidden from path search: either explicitly
    /// blocked, or its length is the `u32::MAX` sentinel.
    pub fn is_blocked(&self) -> bool {
        self.blocked || self.length == BLOCKED_LENGTH
    }

    /// Internal toggle used only by `roadmap-trunk`'s build/extend/detour
    /// search scaffolding — never exposed on the Map façade's public API.
    pub fn block(&mut self) {
        self.blocked = true;
    }

    pub fn unblock(&mut self) {
        self.blocked = false;
    }

    pub(crate) fn set_year(&mut self, year: i32) {
        self.year = year;
    }

    /// Record that trunk `id` now traverses this road. Called only from
    /// `roadmap-trunk::attach`.
    pub fn add_route(&mut self, id: roadmap_core::TrunkId) {
        self.routes.add(id);
    }

    /// Record that trunk `id` no longer traverses this road. Called only
    /// from `roadmap-trunk::detach`.
    pub fn remove_route(&mut self, id: roadmap_core::TrunkId) {
        self.routes.remove(id);
    }
}

/// Append-mostly arena of `Road` records, indexed by `RoadId`.
///
/// Unlike [`crate::city::CityStore`], roads can be destroyed mid-lifetime
/// (by `remove_road`, after every trunk using them has been detoured) —
/// destroyed slots become tombstones (`None`) rather than being compacted,
/// so no other `RoadId` ever changes meaning. [`RoadStore::trim`] is a
/// separate, tail-only operation used exclusively to unwind a failed bulk
/// insert back to a recorded watermark.
#[derive(Default)]
pub struct RoadStore {
    roads: Vec<Option<Road>>,
}

impl RoadStore {
    pub fn new() -> Self {
        RoadStore { roads: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.roads.len()
    }

    pub fn get(&self, id: RoadId) -> &Road {
        self.roads[id.index()].as_ref().expect("RoadId refers to a destroyed road")
    }

    pub(crate) fn get_mut(&mut self, id: RoadId) -> &mut Road {
        self.roads[id.index()].as_mut().expect("RoadId refers to a destroyed road")
    }

    pub fn try_get(&self, id: RoadId) -> Option<&Road> {
        self.roads.get(id.index()).and_then(|r| r.as_ref())
    }

    /// Allocate storage for one more road. Returns `None` on allocation
    /// failure (caller should propagate `OutOfMemory` without having
    /// mutated anything else).
    pub fn try_add(&mut self, city1: CityId, city2: CityId, length: u32, year: i32) -> Option<RoadId> {
        self.roads.try_reserve(1).ok()?;
        let id = RoadId(self.roads.len() as u32);
        self.roads.push(Some(Road::new(city1, city2, length, year)));
        Some(id)
    }

    /// Remove every road added since `len`. Used to unwind a failed bulk
    /// operation; only ever called with a `len` that is the store's length
    /// at the start of that operation, so every removed slot is a road this
    /// same operation just added (never a live, pre-existing road).
    pub fn trim(&mut self, len: usize) {
        self.roads.truncate(len);
    }

    /// Tombstone a live road. The slot is never reused.
    pub(crate) fn destroy(&mut self, id: RoadId) {
        self.roads[id.index()] = None;
    }

    pub fn is_blocked(&self, id: RoadId) -> bool {
        self.get(id).is_blocked()
    }

    /// Internal toggle used only by `roadmap-trunk` — never exposed on the
    /// Map façade's public API.
    pub fn block(&mut self, id: RoadId) {
        self.get_mut(id).block();
    }

    pub fn unblock(&mut self, id: RoadId) {
        self.get_mut(id).unblock();
    }

    /// Record that trunk `trunk_id` now traverses road `id`.
    pub fn add_route(&mut self, id: RoadId, trunk_id: roadmap_core::TrunkId) {
        self.get_mut(id).add_route(trunk_id);
    }

    /// Record that trunk `trunk_id` no longer traverses road `id`.
    pub fn remove_route(&mut self, id: RoadId, trunk_id: roadmap_core::TrunkId) {
        self.get_mut(id).remove_route(trunk_id);
    }

    pub(crate) fn set_year(&mut self, id: RoadId, year: i32) {
        self.get_mut(id).set_year(year);
    }

    /// Iterate over every live (non-tombstoned) road.
    pub fn iter(&self) -> impl Iterator<Item = (RoadId, &Road)> {
        self.roads
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.as_ref().map(|r| (RoadId(i as u32), r)))
    }
}
