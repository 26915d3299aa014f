//! Scoped acquisition of the blocked-flag scratch area used by `extend` and
//! `detour` to exclude a trunk's interior from a fresh path search.
//!
//! Every flag this scope sets is guaranteed to
//! be cleared again when the scope is dropped — including on an early
//! return from the calling function, a panic notwithstanding. Re-blocking
//! an already-blocked city or road is a no-op and is not recorded for
//! unblocking, so nested scopes never clear a flag a caller outside this
//! scope had already set.

use roadmap_core::{CityId, RoadId};
use roadmap_graph::{CityStore, RoadStore};

pub struct BlockScope<'a> {
    cities: &'a mut CityStore,
    roads: &'a mut RoadStore,
    blocked_cities: Vec<CityId>,
    blocked_roads: Vec<RoadId>,
}

impl<'a> BlockScope<'a> {
    pub fn new(cities: &'a mut CityStore, roads: &'a mut RoadStore) -> Self {
        BlockScope { cities, roads, blocked_cities: Vec::new(), blocked_roads: Vec::new() }
    }

    pub fn block_city(&mut self, id: CityId) {
        if !self.cities.is_blocked(id) {
            self.cities.block(id);
            self.blocked_cities.push(id);
        }
    }

    pub fn block_road(&mut self, id: RoadId) {
        if !self.roads.is_blocked(id) {
            self.roads.block(id);
            self.blocked_roads.push(id);
        }
    }

    pub fn cities(&self) -> &CityStore {
        self.cities
    }

    pub fn roads(&self) -> &RoadStore {
        self.roads
    }
}

impl Drop for BlockScope<'_> {
    fn drop(&mut self) {
        for id in self.blocked_cities.drain(..) {
            self.cities.unblock(id);
        }
        for id in self.blocked_roads.drain(..) {
            self.roads.unblock(id);
        }
    }
}
