//! The `Map` facade (C8): one method per external command, composing the
//! graph/index/path/trunk crates and owning the 999-slot trunk table.

use std::collections::HashSet;

use roadmap_core::{validate_name, CityId, RoadId, TrunkId, TRUNK_SLOT_COUNT};
use roadmap_graph::{CityStore, RoadStore};
use roadmap_index::NameIndex;
use roadmap_trunk::Trunk;

use crate::error::{MapError, MapResult};

/// Owns every city, road, name-index entry, and trunk slot in the map.
///
/// Constructed with [`Map::new`]; there is no paired teardown call — `Map`
/// is simply dropped, letting `Vec`'s own destructors release everything it
/// owns. This replaces the source's explicit `newMap`/`deleteMap` pairing.
pub struct Map {
    cities: CityStore,
    roads: RoadStore,
    index: NameIndex,
    trunks: Vec<Option<Trunk>>,
}

impl Default for Map {
    fn default() -> Self {
        Self::new()
    }
}

impl Map {
    pub fn new() -> Self {
        Map {
            cities: CityStore::new(),
            roads: RoadStore::new(),
            index: NameIndex::new(),
            trunks: (0..TRUNK_SLOT_COUNT).map(|_| None).collect(),
        }
    }

    fn trunk_id(id: u32) -> MapResult<TrunkId> {
        TrunkId::new(id).ok_or(MapError::InvalidTrunkId)
    }

    /// Create a road between two cities, creating either endpoint city that
    /// does not yet exist. All-or-nothing: on any sub-failure the city,
    /// road, and name-index stores are left exactly as they were on entry.
    pub fn add_road(&mut self, name1: &[u8], name2: &[u8], length: u32, year: i32) -> MapResult<()> {
        validate_name(name1)?;
        validate_name(name2)?;

        let city_watermark = self.cities.len();
        let road_watermark = self.roads.len();
        let city1 = self.index.find(name1);
        let city2 = self.index.find(name2);

        let outcome = roadmap_graph::add_road(
            &mut self.cities,
            &mut self.roads,
            name1,
            name2,
            city1,
            city2,
            length,
            year,
        )?;

        let mut new_names: Vec<Vec<u8>> = Vec::new();
        let mut new_ids: Vec<CityId> = Vec::new();
        if let Some(id) = outcome.new_city1 {
            new_names.push(name1.to_vec());
            new_ids.push(id);
        }
        if let Some(id) = outcome.new_city2 {
            new_names.push(name2.to_vec());
            new_ids.push(id);
        }

        if !new_names.is_empty() {
            if let Err(e) = self.index.bulk_insert(&new_names, &new_ids) {
                self.cities.trim(city_watermark);
                self.roads.trim(road_watermark);
                return Err(e.into());
            }
        }

        Ok(())
    }

    /// Overwrite the year of the road between two existing cities.
    pub fn repair_road(&mut self, name1: &[u8], name2: &[u8], year: i32) -> MapResult<()> {
        validate_name(name1)?;
        validate_name(name2)?;
        let city1 = self.index.find(name1);
        let city2 = self.index.find(name2);
        roadmap_graph::repair_road(&self.cities, &mut self.roads, city1, city2, year)?;
        Ok(())
    }

    /// Create a new trunk route in slot `id` between two existing cities.
    pub fn new_route(&mut self, id: u32, name1: &[u8], name2: &[u8]) -> MapResult<()> {
        let trunk_id = Self::trunk_id(id)?;
        let slot = trunk_id.slot_index();
        if self.trunks[slot].is_some() {
            return Err(MapError::SlotTaken(trunk_id));
        }
        validate_name(name1)?;
        validate_name(name2)?;
        let city1 = self.index.find(name1).ok_or(MapError::NoSuchCity)?;
        let city2 = self.index.find(name2).ok_or(MapError::NoSuchCity)?;

        let trunk = roadmap_trunk::build(&self.cities, &self.roads, trunk_id, city1, city2)?;
        roadmap_trunk::attach(&mut self.roads, &trunk);
        self.trunks[slot] = Some(trunk);
        Ok(())
    }

    /// Extend an existing trunk route to reach `name`.
    pub fn extend_route(&mut self, id: u32, name: &[u8]) -> MapResult<()> {
        let trunk_id = Self::trunk_id(id)?;
        let slot = trunk_id.slot_index();
        let existing = self.trunks[slot].take().ok_or(MapError::SlotEmpty(trunk_id))?;

        validate_name(name)?;
        let city = match self.index.find(name) {
            Some(c) => c,
            None => {
                self.trunks[slot] = Some(existing);
                return Err(MapError::NoSuchCity);
            }
        };

        match roadmap_trunk::extend(&mut self.cities, &mut self.roads, &existing, city) {
            Ok(extended) => {
                roadmap_trunk::detach(&mut self.roads, &existing);
                roadmap_trunk::attach(&mut self.roads, &extended);
                self.trunks[slot] = Some(extended);
                Ok(())
            }
            Err(e) => {
                self.trunks[slot] = Some(existing);
                Err(e.into())
            }
        }
    }

    /// Remove the road between two cities, rebuilding every trunk that uses
    /// it via a detour first. If any detour fails, the map is left
    /// unchanged and the road is not removed.
    pub fn remove_road(&mut self, name1: &[u8], name2: &[u8]) -> MapResult<()> {
        validate_name(name1)?;
        validate_name(name2)?;
        let city1 = self.index.find(name1).ok_or(MapError::NoSuchCity)?;
        let city2 = self.index.find(name2).ok_or(MapError::NoSuchCity)?;
        let road_id = roadmap_graph::find_road(&self.cities, &self.roads, city1, city2)
            .ok_or(roadmap_graph::GraphError::NoSuchRoad)?;

        let affected: Vec<TrunkId> = self.roads.get(road_id).routes().iter().collect();
        let mut rebuilt: Vec<(usize, Trunk)> = Vec::with_capacity(affected.len());
        for trunk_id in affected {
            let slot = trunk_id.slot_index();
            let old = self.trunks[slot].as_ref().expect("route set referenced an empty slot");
            let new_trunk = roadmap_trunk::detour(&mut self.cities, &mut self.roads, old, road_id)?;
            rebuilt.push((slot, new_trunk));
        }

        for (slot, new_trunk) in rebuilt {
            let old = self.trunks[slot].take().expect("slot held the trunk we just detoured");
            roadmap_trunk::detach(&mut self.roads, &old);
            roadmap_trunk::attach(&mut self.roads, &new_trunk);
            self.trunks[slot] = Some(new_trunk);
        }

        roadmap_graph::destroy_road(&mut self.cities, &mut self.roads, road_id);
        Ok(())
    }

    /// Destroy trunk route `id`, detaching it from every road it used.
    pub fn remove_route(&mut self, id: u32) -> MapResult<()> {
        let trunk_id = Self::trunk_id(id)?;
        let slot = trunk_id.slot_index();
        let trunk = self.trunks[slot].take().ok_or(MapError::SlotEmpty(trunk_id))?;
        roadmap_trunk::detach(&mut self.roads, &trunk);
        Ok(())
    }

    /// The bit-exact description of trunk route `id`, or an empty string if
    /// `id` is out of range or the slot is empty.
    pub fn get_route_description(&self, id: u32) -> Vec<u8> {
        match TrunkId::new(id) {
            Some(trunk_id) => match &self.trunks[trunk_id.slot_index()] {
                Some(trunk) => roadmap_trunk::describe(trunk, &self.cities, &self.roads),
                None => Vec::new(),
            },
            None => Vec::new(),
        }
    }

    fn resolve_with_pending(&self, pending: &[(Vec<u8>, CityId)], name: &[u8]) -> Option<CityId> {
        self.index.find(name).or_else(|| pending.iter().find(|(n, _)| n == name).map(|(_, id)| *id))
    }

    /// Atomically create trunk route `id` from an explicit, ordered list of
    /// city names and the lengths/years of the roads between consecutive
    /// names. Any road between consecutive names that already exists must
    /// match the given length and have a year no later than the given one;
    /// any road that does not yet exist is created. On any failure the map
    /// is left byte-for-byte as it was before the call.
    pub fn route_from_list(
        &mut self,
        id: u32,
        names: &[Vec<u8>],
        lengths: &[u32],
        years: &[i32],
    ) -> MapResult<()> {
        let trunk_id = Self::trunk_id(id)?;
        let slot = trunk_id.slot_index();
        if self.trunks[slot].is_some() {
            return Err(MapError::SlotTaken(trunk_id));
        }
        if names.len() < 2 || lengths.len() != names.len() - 1 || years.len() != names.len() - 1 {
            return Err(MapError::InvalidRouteList);
        }
        for name in names {
            validate_name(name)?;
        }
        let mut seen = HashSet::with_capacity(names.len());
        for name in names {
            if !seen.insert(name.as_slice()) {
                return Err(MapError::DuplicateName);
            }
        }

        // Step 1: every already-existing road on the list must be
        // consistent with what the caller claims about it. Only cities
        // already in the index can possibly have an existing road, since
        // nothing has been created yet.
        for i in 0..names.len() - 1 {
            let c1 = self.index.find(&names[i]);
            let c2 = self.index.find(&names[i + 1]);
            if let (Some(c1), Some(c2)) = (c1, c2) {
                if let Some(road_id) = roadmap_graph::find_road(&self.cities, &self.roads, c1, c2) {
                    let road = self.roads.get(road_id);
                    if road.length() != lengths[i] {
                        return Err(MapError::InconsistentRoad);
                    }
                    if road.year() > years[i] {
                        return Err(MapError::YearRegression { got: years[i], current: road.year() });
                    }
                }
            }
        }

        let city_watermark = self.cities.len();
        let road_watermark = self.roads.len();

        // Step 3: create whichever consecutive roads don't exist yet.
        let mut pending: Vec<(Vec<u8>, CityId)> = Vec::new();
        let mut trunk_roads: Vec<RoadId> = Vec::with_capacity(names.len() - 1);
        for i in 0..names.len() - 1 {
            let c1 = self.resolve_with_pending(&pending, &names[i]);
            let c2 = self.resolve_with_pending(&pending, &names[i + 1]);
            let existing = match (c1, c2) {
                (Some(a), Some(b)) => roadmap_graph::find_road(&self.cities, &self.roads, a, b),
                _ => None,
            };
            let road_id = match existing {
                Some(road_id) => road_id,
                None => {
                    match roadmap_graph::add_road(
                        &mut self.cities,
                        &mut self.roads,
                        &names[i],
                        &names[i + 1],
                        c1,
                        c2,
                        lengths[i],
                        years[i],
                    ) {
                        Ok(outcome) => {
                            if let Some(id) = outcome.new_city1 {
                                pending.push((names[i].clone(), id));
                            }
                            if let Some(id) = outcome.new_city2 {
                                pending.push((names[i + 1].clone(), id));
                            }
                            outcome.road
                        }
                        Err(e) => {
                            self.cities.trim(city_watermark);
                            self.roads.trim(road_watermark);
                            return Err(e.into());
                        }
                    }
                }
            };
            trunk_roads.push(road_id);
        }

        // Step 5: commit the newly created cities to the name index.
        if !pending.is_empty() {
            let (new_names, new_ids): (Vec<Vec<u8>>, Vec<CityId>) = pending.into_iter().unzip();
            if let Err(e) = self.index.bulk_insert(&new_names, &new_ids) {
                self.cities.trim(city_watermark);
                self.roads.trim(road_watermark);
                return Err(e.into());
            }
        }

        // Step 6: bring every pre-existing road's year up to the list's.
        for i in 0..names.len() - 1 {
            let c1 = self.index.find(&names[i]).expect("just indexed or pre-existing");
            let c2 = self.index.find(&names[i + 1]).expect("just indexed or pre-existing");
            roadmap_graph::repair_road(&self.cities, &mut self.roads, Some(c1), Some(c2), years[i])
                .expect("step 1 already verified this repair cannot regress");
        }

        // Step 7: attach and place the trunk.
        let first = self.index.find(&names[0]).expect("just indexed or pre-existing");
        let last = self.index.find(&names[names.len() - 1]).expect("just indexed or pre-existing");
        let trunk = Trunk::from_roads(trunk_id, first, last, trunk_roads);
        roadmap_trunk::attach(&mut self.roads, &trunk);
        self.trunks[slot] = Some(trunk);

        Ok(())
    }
}
