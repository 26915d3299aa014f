//! The constrained shortest-path search (C6).
//!
//! Finds the path from `from` to `to` that is, in order of priority:
//!
//! 1. shortest by total length;
//! 2. among those, the one maximizing the minimum repair year of any road
//!    it crosses (its "weakest link");
//! 3. unique — if two distinct road sequences achieve the same
//!    `(length, min_year)` pair, the result is ambiguous rather than an
//!    arbitrary pick of one.
//!
//! This is a textbook Dijkstra relaxation with the usual `(distance, -year)`
//! comparator, plus bookkeeping to detect rule 3. Every city settles at most
//! once (first pop = final answer, standard for non-negative edge weights);
//! a per-city `ambiguous` flag is raised whenever a second, equally-good
//! realization of that city's key is discovered, either as a duplicate pop
//! of an already-settled city or as a tying relaxation into a
//! not-yet-settled one (the latter matters because we only push a neighbor
//! onto the heap when its key strictly improves, so a tie would otherwise
//! leave no second heap entry to detect the duplicate at pop time). Once
//! the target is first settled we keep draining the heap while its next
//! entry's key still equals the target's — anything with a strictly larger
//! key cannot feed back an equal-or-better path to the target — and stop.
//! An `ambiguous` flag anywhere on the reconstructed path (not just at the
//! target) means two distinct prefixes shared a common suffix into the
//! target with the same overall key, so it also makes the full path
//! ambiguous.

use std::collections::BinaryHeap;

use roadmap_core::{CityId, RoadId};
use roadmap_graph::{CityStore, RoadStore};

use crate::error::{PathError, PathResult};
use crate::queue::HeapEntry;

type Key = (u64, i32);

/// `a` is a strictly better canonical key than `b`: smaller distance, or
/// equal distance with a larger minimum repair year.
fn better(a: Key, b: Key) -> bool {
    a.0 < b.0 || (a.0 == b.0 && a.1 > b.1)
}

/// Run the constrained search and return the ordered road sequence from
/// `from` to `to`. An empty `Vec` means `from == to`.
pub fn search(
    cities: &CityStore,
    roads: &RoadStore,
    from: CityId,
    to: CityId,
) -> PathResult<Vec<RoadId>> {
    if from == to {
        return Ok(Vec::new());
    }

    let n = cities.len();
    let mut best: Vec<Option<Key>> = Vec::new();
    best.try_reserve(n).map_err(|_| PathError::OutOfMemory)?;
    best.resize(n, None);
    let mut settled: Vec<bool> = Vec::new();
    settled.try_reserve(n).map_err(|_| PathError::OutOfMemory)?;
    settled.resize(n, false);
    let mut ambiguous: Vec<bool> = Vec::new();
    ambiguous.try_reserve(n).map_err(|_| PathError::OutOfMemory)?;
    ambiguous.resize(n, false);
    let mut came_from: Vec<Option<RoadId>> = Vec::new();
    came_from.try_reserve(n).map_err(|_| PathError::OutOfMemory)?;
    came_from.resize(n, None);

    let mut heap = BinaryHeap::new();
    best[from.index()] = Some((0, i32::MAX));
    heap.try_reserve(1).map_err(|_| PathError::OutOfMemory)?;
    heap.push(HeapEntry { city: from, distance: 0, min_year: i32::MAX });

    let mut target_key: Option<Key> = None;

    while let Some(top) = heap.peek() {
        if let Some(tk) = target_key {
            if (top.distance, top.min_year) != tk {
                break;
            }
        }
        let entry = heap.pop().expect("just peeked");
        let key = (entry.distance, entry.min_year);
        let idx = entry.city.index();

        if settled[idx] {
            if best[idx] == Some(key) {
                ambiguous[idx] = true;
            }
            continue;
        }
        if best[idx] != Some(key) {
            // Stale entry: a later, strictly better key already won.
            continue;
        }

        settled[idx] = true;
        if entry.city == to && target_key.is_none() {
            target_key = Some(key);
        }

        if cities.is_blocked(entry.city) {
            continue;
        }

        for &road_id in cities.get(entry.city).roads() {
            let road = roads.get(road_id);
            if road.is_blocked() {
                continue;
            }
            let neighbor = road.other_end(entry.city);
            if cities.is_blocked(neighbor) {
                continue;
            }
            let candidate: Key =
                (key.0 + road.length() as u64, key.1.min(road.year()));

            match best[neighbor.index()] {
                None => {
                    best[neighbor.index()] = Some(candidate);
                    came_from[neighbor.index()] = Some(road_id);
                    heap.try_reserve(1).map_err(|_| PathError::OutOfMemory)?;
                    heap.push(HeapEntry {
                        city: neighbor,
                        distance: candidate.0,
                        min_year: candidate.1,
                    });
                }
                Some(existing) if better(candidate, existing) => {
                    if !settled[neighbor.index()] {
                        best[neighbor.index()] = Some(candidate);
                        came_from[neighbor.index()] = Some(road_id);
                        ambiguous[neighbor.index()] = false;
                        heap.try_reserve(1).map_err(|_| PathError::OutOfMemory)?;
                        heap.push(HeapEntry {
                            city: neighbor,
                            distance: candidate.0,
                            min_year: candidate.1,
                        });
                    }
                }
                Some(existing) if candidate == existing => {
                    ambiguous[neighbor.index()] = true;
                    if !settled[neighbor.index()] {
                        heap.try_reserve(1).map_err(|_| PathError::OutOfMemory)?;
                        heap.push(HeapEntry {
                            city: neighbor,
                            distance: candidate.0,
                            min_year: candidate.1,
                        });
                    }
                }
                Some(_) => {}
            }
        }
    }

    if !settled[to.index()] {
        return Err(PathError::NoPath);
    }

    let mut path = Vec::new();
    let mut cur = to;
    let mut any_ambiguous = ambiguous[to.index()];
    while cur != from {
        let road_id = came_from[cur.index()].expect("settled city has a predecessor road");
        path.push(road_id);
        let prev = roads.get(road_id).other_end(cur);
        any_ambiguous |= ambiguous[prev.index()];
        cur = prev;
    }

    if any_ambiguous {
        return Err(PathError::Ambiguous);
    }

    path.reverse();
    Ok(path)
}
