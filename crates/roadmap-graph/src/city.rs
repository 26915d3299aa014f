//! City records and the append-only `CityStore` arena.

use roadmap_core::{CityId, RoadId};

/// A vertex in the road graph.
///
/// Holds a *non-owning* list of incident road ids — the `Road` records
/// themselves live in `RoadStore`. `blocked` excludes the city from path
/// search without destroying it (see `roadmap-path`).
pub struct City {
    name: Vec<u8>,
    roads: Vec<RoadId>,
    blocked: bool,
}

impl City {
    fn new(name: Vec<u8>) -> Self {
        City { name, roads: Vec::new(), blocked: false }
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn roads(&self) -> &[RoadId] {
        &self.roads
    }

    pub(crate) fn connect(&mut self, road: RoadId) {
        self.roads.push(road);
    }

    /// Remove `road` from this city's incidence list. No-op if absent.
    pub(crate) fn detach(&mut self, road: RoadId) {
        if let Some(pos) = self.roads.iter().position(|&r| r == road) {
            self.roads.swap_remove(pos);
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Internal toggle used only by `roadmap-trunk`'s build/extend/detour
    /// search scaffolding — never exposed on the Map façade's public API.
    pub fn block(&mut self) {
        self.blocked = true;
    }

    pub fn unblock(&mut self) {
        self.blocked = false;
    }
}

/// Append-only arena of `City` records, indexed by `CityId`.
///
/// Cities are never destroyed except by [`CityStore::trim`] (used to unwind
/// a failed bulk operation) or whole-map teardown — see the lifecycle notes
/// in the crate's owning façade. A `CityId` handed out by [`CityStore::add`]
/// is therefore stable for as long as the store itself lives.
#[derive(Default)]
pub struct CityStore {
    cities: Vec<City>,
}

impl CityStore {
    pub fn new() -> Self {
        CityStore { cities: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn get(&self, id: CityId) -> &City {
        &self.cities[id.index()]
    }

    pub(crate) fn get_mut(&mut self, id: CityId) -> &mut City {
        &mut self.cities[id.index()]
    }

    /// Allocate storage for one more city. Returns `None` if the
    /// backing `Vec` cannot grow (caller should propagate `OutOfMemory`
    /// without having mutated anything else).
    pub fn try_add(&mut self, name: Vec<u8>) -> Option<CityId> {
        self.cities.try_reserve(1).ok()?;
        let id = CityId(self.cities.len() as u32);
        self.cities.push(City::new(name));
        Some(id)
    }

    /// Remove every city added since `len`, in reverse order of insertion.
    /// Used to unwind a failed bulk operation back to a recorded watermark.
    pub fn trim(&mut self, len: usize) {
        self.cities.truncate(len);
    }

    pub fn is_blocked(&self, id: CityId) -> bool {
        self.cities[id.index()].blocked
    }

    /// Internal toggle used only by `roadmap-trunk` — never exposed on the
    /// Map façade's public API.
    pub fn block(&mut self, id: CityId) {
        self.cities[id.index()].block();
    }

    pub fn unblock(&mut self, id: CityId) {
        self.cities[id.index()].unblock();
    }
}
