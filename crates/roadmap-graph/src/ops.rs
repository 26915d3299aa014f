//! Graph mutation operations: `add_road`, `repair_road`, `remove_road`.
//!
//! These functions operate purely at the `CityId`/`RoadId` level — name
//! resolution and name-index maintenance are the façade's job (see
//! `roadmap-map`), which keeps this crate free of any dependency on
//! `roadmap-index`.

use roadmap_core::{CityId, RoadId, MAX_ROAD_LENGTH, MIN_ROAD_LENGTH};

use crate::city::CityStore;
use crate::error::{GraphError, GraphResult};
use crate::road::RoadStore;

/// Result of a successful [`add_road`]: the new road, plus which of the two
/// endpoints (if any) were freshly created cities the caller must register
/// in its name index.
pub struct AddRoadOutcome {
    pub road: RoadId,
    pub new_city1: Option<CityId>,
    pub new_city2: Option<CityId>,
}

/// Find the road directly connecting `c1` and `c2`, if any.
pub fn find_road(cities: &CityStore, roads: &RoadStore, c1: CityId, c2: CityId) -> Option<RoadId> {
    cities
        .get(c1)
        .roads()
        .iter()
        .copied()
        .find(|&rid| roads.try_get(rid).is_some_and(|r| r.has_city(c2)))
}

/// Create a road between `name1` and `name2`.
///
/// `city1`/`city2` are the already-resolved `CityId`s for each name, or
/// `None` if the name is not yet in the map (the caller resolves this via
/// its name index before calling). Missing cities are created here; on any
/// failure the city/road stores are left exactly as they were on entry.
pub fn add_road(
    cities: &mut CityStore,
    roads: &mut RoadStore,
    name1: &[u8],
    name2: &[u8],
    city1: Option<CityId>,
    city2: Option<CityId>,
    length: u32,
    year: i32,
) -> GraphResult<AddRoadOutcome> {
    if year == 0 {
        return Err(GraphError::InvalidYear);
    }
    if !(MIN_ROAD_LENGTH..=MAX_ROAD_LENGTH).contains(&length) {
        return Err(GraphError::InvalidLength);
    }
    if name1 == name2 {
        return Err(GraphError::IdenticalCities);
    }
    if let (Some(c1), Some(c2)) = (city1, city2) {
        if find_road(cities, roads, c1, c2).is_some() {
            return Err(GraphError::DuplicateRoad);
        }
    }

    let city_watermark = cities.len();
    let road_watermark = roads.len();

    let mut new_city1 = None;
    let c1 = match city1 {
        Some(id) => id,
        None => match cities.try_add(name1.to_vec()) {
            Some(id) => {
                new_city1 = Some(id);
                id
            }
            None => return Err(GraphError::OutOfMemory),
        },
    };

    let mut new_city2 = None;
    let c2 = match city2 {
        Some(id) => id,
        None => match cities.try_add(name2.to_vec()) {
            Some(id) => {
                new_city2 = Some(id);
                id
            }
            None => {
                cities.trim(city_watermark);
                return Err(GraphError::OutOfMemory);
            }
        },
    };

    let road_id = match roads.try_add(c1, c2, length, year) {
        Some(id) => id,
        None => {
            cities.trim(city_watermark);
            roads.trim(road_watermark);
            return Err(GraphError::OutOfMemory);
        }
    };

    cities.get_mut(c1).connect(road_id);
    cities.get_mut(c2).connect(road_id);

    Ok(AddRoadOutcome { road: road_id, new_city1, new_city2 })
}

/// Overwrite a road's year. Rejects a regression to an earlier year than the
/// road's current one (equal is allowed — repairing twice with the same
/// year is a no-op).
pub fn repair_road(
    cities: &CityStore,
    roads: &mut RoadStore,
    city1: Option<CityId>,
    city2: Option<CityId>,
    year: i32,
) -> GraphResult<()> {
    let (Some(c1), Some(c2)) = (city1, city2) else {
        return Err(GraphError::CityNotFound(CityId::INVALID));
    };
    if year == 0 {
        return Err(GraphError::InvalidYear);
    }
    let road_id = find_road(cities, roads, c1, c2).ok_or(GraphError::NoSuchRoad)?;
    let current = roads.get(road_id).year();
    if year < current {
        return Err(GraphError::YearRegression { got: year, current });
    }
    roads.set_year(road_id, year);
    Ok(())
}

/// Destroy a road: detach it from both its cities and tombstone its slot.
///
/// The caller (the Map façade) must have already rebuilt every trunk that
/// used this road via a successful detour — this function performs no
/// trunk-related work and always succeeds once `road_id` is confirmed live.
pub fn destroy_road(cities: &mut CityStore, roads: &mut RoadStore, road_id: RoadId) {
    let (c1, c2) = roads.get(road_id).cities();
    cities.get_mut(c1).detach(road_id);
    cities.get_mut(c2).detach(road_id);
    roads.destroy(road_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> (CityStore, RoadStore) {
        (CityStore::new(), RoadStore::new())
    }

    #[test]
    fn add_road_both_new_creates_both_cities() {
        let (mut cities, mut roads) = fresh();
        let outcome = add_road(&mut cities, &mut roads, b"A", b"B", None, None, 10, 2000).unwrap();
        assert!(outcome.new_city1.is_some());
        assert!(outcome.new_city2.is_some());
        assert_eq!(cities.len(), 2);
        assert_eq!(roads.len(), 1);
    }

    #[test]
    fn add_road_rejects_zero_length() {
        let (mut cities, mut roads) = fresh();
        let err = add_road(&mut cities, &mut roads, b"A", b"B", None, None, 0, 2000).unwrap_err();
        assert!(matches!(err, GraphError::InvalidLength));
        assert_eq!(cities.len(), 0);
        assert_eq!(roads.len(), 0);
    }

    #[test]
    fn add_road_rejects_zero_year() {
        let (mut cities, mut roads) = fresh();
        let err = add_road(&mut cities, &mut roads, b"A", b"B", None, None, 10, 0).unwrap_err();
        assert!(matches!(err, GraphError::InvalidYear));
    }

    #[test]
    fn add_road_rejects_identical_names() {
        let (mut cities, mut roads) = fresh();
        let err = add_road(&mut cities, &mut roads, b"A", b"A", None, None, 10, 2000).unwrap_err();
        assert!(matches!(err, GraphError::IdenticalCities));
    }

    #[test]
    fn add_road_rejects_duplicate_road() {
        let (mut cities, mut roads) = fresh();
        let o = add_road(&mut cities, &mut roads, b"A", b"B", None, None, 10, 2000).unwrap();
        let (c1, c2) = roads.get(o.road).cities();
        let err =
            add_road(&mut cities, &mut roads, b"A", b"B", Some(c1), Some(c2), 5, 1999).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateRoad));
        assert_eq!(roads.len(), 1);
    }

    #[test]
    fn repair_road_rejects_year_regression() {
        let (mut cities, mut roads) = fresh();
        let o = add_road(&mut cities, &mut roads, b"A", b"B", None, None, 10, 2000).unwrap();
        let (c1, c2) = roads.get(o.road).cities();
        let err = repair_road(&cities, &mut roads, Some(c1), Some(c2), 1999).unwrap_err();
        assert!(matches!(err, GraphError::YearRegression { got: 1999, current: 2000 }));
    }

    #[test]
    fn repair_road_allows_equal_year() {
        let (mut cities, mut roads) = fresh();
        let o = add_road(&mut cities, &mut roads, b"A", b"B", None, None, 10, 2000).unwrap();
        let (c1, c2) = roads.get(o.road).cities();
        repair_road(&cities, &mut roads, Some(c1), Some(c2), 2000).unwrap();
        assert_eq!(roads.get(o.road).year(), 2000);
    }

    #[test]
    fn destroy_road_detaches_from_both_cities() {
        let (mut cities, mut roads) = fresh();
        let o = add_road(&mut cities, &mut roads, b"A", b"B", None, None, 10, 2000).unwrap();
        let (c1, c2) = roads.get(o.road).cities();
        destroy_road(&mut cities, &mut roads, o.road);
        assert!(!cities.get(c1).roads().contains(&o.road));
        assert!(!cities.get(c2).roads().contains(&o.road));
        assert!(roads.try_get(o.road).is_none());
    }
}
