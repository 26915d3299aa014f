//! The `Trunk` (Route) type and its construction operations (C7).

use roadmap_core::{CityId, RoadId, TrunkId};
use roadmap_graph::{CityStore, RoadStore};

use crate::block_scope::BlockScope;
use crate::error::{TrunkError, TrunkResult};

/// An immutable-after-construction ordered sequence of roads forming a
/// simple walk from `first` to `last`, tagged with the slot it occupies.
///
/// Rebuilding a trunk (via [`extend`] or [`detour`]) always produces a new
/// `Trunk` value rather than mutating one in place — the façade swaps the
/// old value for the new one in its slot table once the rebuild succeeds.
pub struct Trunk {
    id: TrunkId,
    first: CityId,
    last: CityId,
    roads: Vec<RoadId>,
}

impl Trunk {
    /// Build a trunk directly from an already-known road sequence, bypassing
    /// path search entirely. Used only by bulk route construction from a
    /// literal list, where the road sequence is dictated by the caller's
    /// input order rather than discovered by search.
    pub fn from_roads(id: TrunkId, first: CityId, last: CityId, roads: Vec<RoadId>) -> Trunk {
        Trunk { id, first, last, roads }
    }

    pub fn id(&self) -> TrunkId {
        self.id
    }

    pub fn first(&self) -> CityId {
        self.first
    }

    pub fn last(&self) -> CityId {
        self.last
    }

    pub fn roads(&self) -> &[RoadId] {
        &self.roads
    }

    pub fn len(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    pub fn has_city(&self, roads: &RoadStore, city: CityId) -> bool {
        self.visit_cities(roads).contains(&city)
    }

    pub fn has_road(&self, road: RoadId) -> bool {
        self.roads.contains(&road)
    }

    /// The cities visited in order, `first` through `last` inclusive —
    /// `roads.len() + 1` entries.
    pub fn visit_cities(&self, roads: &RoadStore) -> Vec<CityId> {
        let mut out = Vec::with_capacity(self.roads.len() + 1);
        let mut cur = self.first;
        out.push(cur);
        for &rid in &self.roads {
            cur = roads.get(rid).other_end(cur);
            out.push(cur);
        }
        out
    }
}

fn path_stats(roads: &RoadStore, path: &[RoadId]) -> (u64, i32) {
    path.iter().fold((0u64, i32::MAX), |(dist, min_year), &rid| {
        let road = roads.get(rid);
        (dist + road.length() as u64, min_year.min(road.year()))
    })
}

/// `true` iff `a` is a strictly better canonical key than `b`.
fn better(a: (u64, i32), b: (u64, i32)) -> bool {
    a.0 < b.0 || (a.0 == b.0 && a.1 > b.1)
}

/// Build a trunk as the canonical path between two distinct cities.
///
/// Rejects `from == to` — callers are expected to have already turned that
/// into a more specific user-facing error (e.g. "already on route").
pub fn build(
    cities: &CityStore,
    roads: &RoadStore,
    id: TrunkId,
    from: CityId,
    to: CityId,
) -> TrunkResult<Trunk> {
    if from == to {
        return Err(TrunkError::IdenticalCities);
    }
    let path = roadmap_path::search(cities, roads, from, to)?;
    Ok(Trunk { id, first: from, last: to, roads: path })
}

/// Extend `trunk` to reach `city`, prepending or appending whichever
/// candidate path is canonically better.
///
/// Both candidate searches block every city already on the trunk except the
/// one endpoint relevant to that candidate, so neither can route back
/// through the trunk's own interior.
pub fn extend(
    cities: &mut CityStore,
    roads: &mut RoadStore,
    trunk: &Trunk,
    city: CityId,
) -> TrunkResult<Trunk> {
    if trunk.has_city(roads, city) {
        return Err(TrunkError::AlreadyOnTrunk);
    }

    let visited = trunk.visit_cities(roads);

    let prepend = {
        let mut scope = BlockScope::new(cities, roads);
        for &c in &visited {
            if c != trunk.first {
                scope.block_city(c);
            }
        }
        roadmap_path::search(scope.cities(), scope.roads(), city, trunk.first)
    };

    let append = {
        let mut scope = BlockScope::new(cities, roads);
        for &c in &visited {
            if c != trunk.last {
                scope.block_city(c);
            }
        }
        roadmap_path::search(scope.cities(), scope.roads(), trunk.last, city)
    };

    use roadmap_path::PathError as PE;

    let chosen_prefix = match (prepend, append) {
        (Err(PE::OutOfMemory), _) | (_, Err(PE::OutOfMemory)) => return Err(TrunkError::OutOfMemory),
        (Err(PE::Ambiguous), _) | (_, Err(PE::Ambiguous)) => return Err(TrunkError::Ambiguous),
        (Err(PE::NoPath), Err(PE::NoPath)) => return Err(TrunkError::NoPath),
        (Ok(p), Err(PE::NoPath)) => Prefix::Prepend(p),
        (Err(PE::NoPath), Ok(p)) => Prefix::Append(p),
        (Ok(p1), Ok(p2)) => {
            // Compare the *whole resulting route*, not the bare extension
            // segment: the existing trunk's own weakest link can dominate
            // both candidates' min-year and make them tie even though the
            // segments alone don't.
            let existing = path_stats(roads, &trunk.roads);
            let fold_in = |seg: (u64, i32)| (existing.0 + seg.0, existing.1.min(seg.1));
            let s1 = fold_in(path_stats(roads, &p1));
            let s2 = fold_in(path_stats(roads, &p2));
            if better(s1, s2) {
                Prefix::Prepend(p1)
            } else if better(s2, s1) {
                Prefix::Append(p2)
            } else {
                return Err(TrunkError::Ambiguous);
            }
        }
    };

    let (first, last, new_roads) = match chosen_prefix {
        Prefix::Prepend(mut extension) => {
            extension.extend(trunk.roads.iter().copied());
            (city, trunk.last, extension)
        }
        Prefix::Append(extension) => {
            let mut new_roads = trunk.roads.clone();
            new_roads.extend(extension);
            (trunk.first, city, new_roads)
        }
    };

    Ok(Trunk { id: trunk.id, first, last, roads: new_roads })
}

enum Prefix {
    Prepend(Vec<RoadId>),
    Append(Vec<RoadId>),
}

/// Replace `road` within `trunk` with a detour around it.
///
/// Every city of the trunk except the two endpoints of `road` is blocked,
/// `road` itself is blocked, and the canonical path between those two
/// endpoints is searched fresh. The returned trunk has the same `first`/
/// `last` orientation as the input.
pub fn detour(
    cities: &mut CityStore,
    roads: &mut RoadStore,
    trunk: &Trunk,
    road: RoadId,
) -> TrunkResult<Trunk> {
    let pos = trunk.roads.iter().position(|&r| r == road).ok_or(TrunkError::RoadNotInTrunk(road))?;
    let visited = trunk.visit_cities(roads);
    let before = visited[pos];
    let after = visited[pos + 1];

    let detour_path = {
        let mut scope = BlockScope::new(cities, roads);
        for (i, &c) in visited.iter().enumerate() {
            if i != pos && i != pos + 1 {
                scope.block_city(c);
            }
        }
        scope.block_road(road);
        roadmap_path::search(scope.cities(), scope.roads(), before, after)?
    };

    let mut new_roads = Vec::with_capacity(trunk.roads.len() - 1 + detour_path.len());
    new_roads.extend_from_slice(&trunk.roads[..pos]);
    new_roads.extend(detour_path);
    new_roads.extend_from_slice(&trunk.roads[pos + 1..]);

    Ok(Trunk { id: trunk.id, first: trunk.first, last: trunk.last, roads: new_roads })
}

/// Record `trunk`'s id in the route set of every road it uses.
pub fn attach(roads: &mut RoadStore, trunk: &Trunk) {
    for &rid in &trunk.roads {
        roads.add_route(rid, trunk.id);
    }
}

/// Remove `trunk`'s id from the route set of every road it uses.
pub fn detach(roads: &mut RoadStore, trunk: &Trunk) {
    for &rid in &trunk.roads {
        roads.remove_route(rid, trunk.id);
    }
}

/// Render the bit-exact textual description:
/// `<id>;<name0>;<len0>;<year0>;<name1>;…;<nameN>`.
pub fn describe(trunk: &Trunk, cities: &CityStore, roads: &RoadStore) -> Vec<u8> {
    let visited = trunk.visit_cities(roads);
    let mut out = trunk.id.0.to_string().into_bytes();
    for (i, &rid) in trunk.roads.iter().enumerate() {
        let road = roads.get(rid);
        out.push(b';');
        out.extend_from_slice(cities.get(visited[i]).name());
        out.push(b';');
        out.extend_from_slice(road.length().to_string().as_bytes());
        out.push(b';');
        out.extend_from_slice(road.year().to_string().as_bytes());
    }
    out.push(b';');
    out.extend_from_slice(cities.get(*visited.last().expect("trunk visits at least one city")).name());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadmap_graph::add_road;

    fn find_city(cities: &CityStore, name: &[u8]) -> Option<CityId> {
        (0..cities.len()).map(|i| CityId(i as u32)).find(|&id| cities.get(id).name() == name)
    }

    fn link(cities: &mut CityStore, roads: &mut RoadStore, a: &[u8], b: &[u8], length: u32, year: i32) {
        let c1 = find_city(cities, a);
        let c2 = find_city(cities, b);
        add_road(cities, roads, a, b, c1, c2, length, year).unwrap();
    }

    fn city(cities: &CityStore, name: &[u8]) -> CityId {
        find_city(cities, name).expect("city not found")
    }

    #[test]
    fn build_wraps_the_search_result() {
        let mut cities = CityStore::new();
        let mut roads = RoadStore::new();
        link(&mut cities, &mut roads, b"A", b"B", 10, 2000);
        let trunk = build(&cities, &roads, TrunkId::new(1).unwrap(), city(&cities, b"A"), city(&cities, b"B")).unwrap();
        assert_eq!(trunk.len(), 1);
    }

    #[test]
    fn build_rejects_identical_endpoints() {
        let mut cities = CityStore::new();
        let mut roads = RoadStore::new();
        link(&mut cities, &mut roads, b"A", b"B", 10, 2000);
        let a = city(&cities, b"A");
        let err = build(&cities, &roads, TrunkId::new(1).unwrap(), a, a).unwrap_err();
        assert!(matches!(err, TrunkError::IdenticalCities));
    }

    #[test]
    fn describe_renders_bit_exact_format() {
        let mut cities = CityStore::new();
        let mut roads = RoadStore::new();
        link(&mut cities, &mut roads, b"A", b"B", 10, 2000);
        let trunk =
            build(&cities, &roads, TrunkId::new(7).unwrap(), city(&cities, b"A"), city(&cities, b"B")).unwrap();
        let desc = describe(&trunk, &cities, &roads);
        assert_eq!(desc, b"7;A;10;2000;B".to_vec());
    }

    #[test]
    fn extend_appends_when_that_side_is_shorter() {
        let mut cities = CityStore::new();
        let mut roads = RoadStore::new();
        link(&mut cities, &mut roads, b"A", b"B", 10, 2000);
        link(&mut cities, &mut roads, b"B", b"C", 1, 2000);
        let trunk =
            build(&cities, &roads, TrunkId::new(1).unwrap(), city(&cities, b"A"), city(&cities, b"B")).unwrap();
        let extended = extend(&mut cities, &mut roads, &trunk, city(&cities, b"C")).unwrap();
        assert_eq!(extended.len(), 2);
        assert_eq!(extended.last(), city(&cities, b"C"));
        assert_eq!(extended.first(), city(&cities, b"A"));
    }

    #[test]
    fn extend_is_ambiguous_when_the_trunks_own_weakest_link_ties_both_candidates() {
        let mut cities = CityStore::new();
        let mut roads = RoadStore::new();
        // Trunk A-B is the weakest link at 1990; both extension candidates
        // are individually newer (2010 and 2020) but tie once the trunk's
        // own weakest link is folded into each whole-route comparison.
        link(&mut cities, &mut roads, b"A", b"B", 10, 1990);
        link(&mut cities, &mut roads, b"C", b"A", 10, 2010);
        link(&mut cities, &mut roads, b"B", b"C", 10, 2020);
        let trunk =
            build(&cities, &roads, TrunkId::new(1).unwrap(), city(&cities, b"A"), city(&cities, b"B")).unwrap();
        let err = extend(&mut cities, &mut roads, &trunk, city(&cities, b"C")).unwrap_err();
        assert!(matches!(err, TrunkError::Ambiguous));
    }

    #[test]
    fn extend_rejects_a_city_already_on_the_trunk() {
        let mut cities = CityStore::new();
        let mut roads = RoadStore::new();
        link(&mut cities, &mut roads, b"A", b"B", 10, 2000);
        let trunk =
            build(&cities, &roads, TrunkId::new(1).unwrap(), city(&cities, b"A"), city(&cities, b"B")).unwrap();
        let err = extend(&mut cities, &mut roads, &trunk, city(&cities, b"A")).unwrap_err();
        assert!(matches!(err, TrunkError::AlreadyOnTrunk));
    }

    #[test]
    fn detour_replaces_a_removed_road_with_a_bypass() {
        let mut cities = CityStore::new();
        let mut roads = RoadStore::new();
        link(&mut cities, &mut roads, b"A", b"B", 1, 2000);
        link(&mut cities, &mut roads, b"B", b"C", 1, 2000);
        link(&mut cities, &mut roads, b"A", b"D", 1, 1990);
        link(&mut cities, &mut roads, b"D", b"C", 1, 1990);
        let trunk =
            build(&cities, &roads, TrunkId::new(1).unwrap(), city(&cities, b"A"), city(&cities, b"C")).unwrap();
        assert_eq!(trunk.len(), 2);
        let blocked_road = trunk.roads()[0];
        let detoured = detour(&mut cities, &mut roads, &trunk, blocked_road).unwrap();
        assert!(!detoured.has_road(blocked_road));
        assert_eq!(detoured.first(), city(&cities, b"A"));
        assert_eq!(detoured.last(), city(&cities, b"C"));
        // blocked flags must be fully released afterward
        assert!(!cities.is_blocked(city(&cities, b"B")));
        assert!(!roads.is_blocked(blocked_road));
    }

    #[test]
    fn attach_then_detach_round_trips_the_route_set() {
        let mut cities = CityStore::new();
        let mut roads = RoadStore::new();
        link(&mut cities, &mut roads, b"A", b"B", 10, 2000);
        let trunk =
            build(&cities, &roads, TrunkId::new(3).unwrap(), city(&cities, b"A"), city(&cities, b"B")).unwrap();
        attach(&mut roads, &trunk);
        assert!(roads.get(trunk.roads()[0]).routes().contains(trunk.id()));
        detach(&mut roads, &trunk);
        assert!(!roads.get(trunk.roads()[0]).routes().contains(trunk.id()));
    }
}
