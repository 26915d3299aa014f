//! Name → `CityId` trie index.
//!
//! # Shape
//!
//! A trie branching 16-ways per *nibble* of each input byte: two hops per
//! byte (high nibble, then low nibble), giving an effective 256-ary branch
//! over whole bytes without paying for a 256-wide array at every node. Nodes
//! live in a single arena `Vec`; children are `u32` indices into that arena
//! (`NIL` for "no such child") rather than raw pointers, so there is no
//! ownership cycle and no per-node heap allocation — the same
//! index-not-pointer discipline used by `roadmap-graph`'s stores.
//!
//! # Atomicity
//!
//! Unlike the city/road arenas, a trie insert doesn't only *append* — it also
//! writes a new child pointer into a node that may already have existed
//! before this call (any node on the shared-prefix path). Recording the
//! arena's length and `truncate`-ing back to it on failure undoes the
//! appended nodes but not that earlier write, leaving a dangling child
//! pointer in a node the index had no business touching after a failed call.
//!
//! So insertion here is a plan-then-commit: walk the trie read-only first,
//! recording the new nodes each `(name, city)` pair would need — shared
//! prefixes within the same batch reuse nodes the earlier pairs in that
//! batch planned to create — and only once every pair has been planned is
//! `self.nodes` reserved for the total and the plan replayed. Reservation
//! happening before the first write means the replay itself cannot fail, so
//! a failed plan always leaves `self.nodes` byte-identical to its state
//! before the call.

use std::collections::HashSet;

use roadmap_core::CityId;

use crate::error::{IndexError, IndexResult};

const FANOUT: usize = 16;
const NIL: u32 = u32::MAX;

struct TrieNode {
    children: [u32; FANOUT],
    city: Option<CityId>,
}

impl TrieNode {
    fn empty() -> Self {
        TrieNode { children: [NIL; FANOUT], city: None }
    }
}

/// Name-to-city index. Node 0 is always the root.
pub struct NameIndex {
    nodes: Vec<TrieNode>,
}

#[inline]
fn nibble(byte: u8, depth: usize) -> usize {
    if depth % 2 == 0 {
        (byte >> 4) as usize
    } else {
        (byte & 0x0F) as usize
    }
}

impl NameIndex {
    pub fn new() -> Self {
        NameIndex { nodes: vec![TrieNode::empty()] }
    }

    /// Look up a name; `None` if absent.
    pub fn find(&self, name: &[u8]) -> Option<CityId> {
        let mut cur = 0usize;
        for depth in 0..name.len() * 2 {
            let n = nibble(name[depth / 2], depth);
            let next = self.nodes[cur].children[n];
            if next == NIL {
                return None;
            }
            cur = next as usize;
        }
        self.nodes[cur].city
    }

    /// Insert a single `(name, city)` pair.
    ///
    /// Fails with `NotUnique` if `name` is already present, or
    /// `OutOfMemory` if the arena cannot grow (the index is left unchanged
    /// in that case).
    pub fn insert(&mut self, name: &[u8], city: CityId) -> IndexResult<()> {
        if self.find(name).is_some() {
            return Err(IndexError::NotUnique);
        }
        self.commit_batch(std::iter::once((name, city)))
    }

    /// Insert every `(names[i], cities[i])` pair for which `names[i]` is not
    /// already present, in lockstep. Either every eligible pair is inserted,
    /// or (on `OutOfMemory`) none is — the index is restored to its
    /// pre-call state.
    pub fn bulk_insert(&mut self, names: &[Vec<u8>], cities: &[CityId]) -> IndexResult<()> {
        debug_assert_eq!(names.len(), cities.len());
        self.commit_batch(names.iter().map(Vec::as_slice).zip(cities.iter().copied()))
    }

    /// Plan then commit every pair in `pairs` that isn't already present
    /// (checked against both the index's pre-call state and earlier pairs
    /// in this same batch). `self.nodes` is touched only after the whole
    /// batch's node requirement has been reserved up front.
    fn commit_batch<'a>(&mut self, pairs: impl Iterator<Item = (&'a [u8], CityId)>) -> IndexResult<()> {
        let base = self.nodes.len() as u32;
        let mut new_children: Vec<[u32; FANOUT]> = Vec::new();
        let mut new_city: Vec<Option<CityId>> = Vec::new();
        let mut parent_writes: Vec<(u32, usize, u32)> = Vec::new();
        let mut leaf_writes: Vec<(u32, CityId)> = Vec::new();
        let mut queued: HashSet<Vec<u8>> = HashSet::new();

        for (name, city) in pairs {
            if self.find(name).is_some() || queued.contains(name) {
                continue;
            }
            queued.insert(name.to_vec());
            self.plan_insert(name, city, base, &mut new_children, &mut new_city, &mut parent_writes, &mut leaf_writes);
        }

        self.nodes.try_reserve(new_children.len()).map_err(|_| IndexError::OutOfMemory)?;

        for (children, city) in new_children.into_iter().zip(new_city) {
            self.nodes.push(TrieNode { children, city });
        }
        for (parent, n, child) in parent_writes {
            self.nodes[parent as usize].children[n] = child;
        }
        for (node, city) in leaf_writes {
            self.nodes[node as usize].city = Some(city);
        }
        Ok(())
    }

    /// Walk the path for `name`, recording the new nodes it would need
    /// (offset from `base`, i.e. not yet present in `self.nodes`) without
    /// mutating the arena. Nodes `>= base` refer to `new_children`/`new_city`
    /// by `index - base`; writes into nodes `< base` are deferred into
    /// `parent_writes`/`leaf_writes` so they only land after reservation
    /// succeeds.
    fn plan_insert(
        &self,
        name: &[u8],
        city: CityId,
        base: u32,
        new_children: &mut Vec<[u32; FANOUT]>,
        new_city: &mut Vec<Option<CityId>>,
        parent_writes: &mut Vec<(u32, usize, u32)>,
        leaf_writes: &mut Vec<(u32, CityId)>,
    ) {
        let mut cur: u32 = 0;
        for depth in 0..name.len() * 2 {
            let n = nibble(name[depth / 2], depth);
            if cur >= base {
                let idx = (cur - base) as usize;
                let next = new_children[idx][n];
                if next != NIL {
                    cur = next;
                    continue;
                }
                let new_idx = base + new_children.len() as u32;
                new_children.push([NIL; FANOUT]);
                new_city.push(None);
                new_children[idx][n] = new_idx;
                cur = new_idx;
            } else {
                let next = self.nodes[cur as usize].children[n];
                if next != NIL {
                    cur = next;
                    continue;
                }
                let new_idx = base + new_children.len() as u32;
                new_children.push([NIL; FANOUT]);
                new_city.push(None);
                parent_writes.push((cur, n, new_idx));
                cur = new_idx;
            }
        }
        if cur >= base {
            new_city[(cur - base) as usize] = Some(city);
        } else {
            debug_assert!(self.nodes[cur as usize].city.is_none());
            leaf_writes.push((cur, city));
        }
    }
}

impl Default for NameIndex {
    fn default() -> Self {
        Self::new()
    }
}
