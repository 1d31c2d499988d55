// Waypoint graph: spatial nodes joined by symmetric adjacency.
//
// The graph is a flat `Vec<Waypoint>` in enumeration order (the order the
// authoring store lists its nodes). Adjacency is stored per waypoint as a
// small list of stable `WaypointId`s rather than references, so there are no
// ownership cycles; `connect`/`disconnect` always edit both sides together.
//
// Each waypoint also carries a dense `index` in `0..N-1`. It is *not* an
// identity: removing a waypoint shifts the list, and the indices of everything
// after it are stale until `reindex()` runs. The shortest-path index refuses to
// build from a graph that still needs a reindex.
//
// Every edit that could change routing (node set, adjacency, positions) bumps
// `revision`, which `ShortestPathIndex` records at build time so that queries
// against an outdated table fail fast instead of returning wrong paths.
//
// See also: `shortest_paths.rs` for the Floyd–Warshall table built from this
// graph, `snapshot.rs` for the JSON authoring-store format, `router.rs` which
// owns the graph alongside its index.

use crate::config::NavConfig;
use crate::error::NavError;
use crate::types::{Vec3, WaypointId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Neighbor list of a waypoint. Most junctions have at most four exits.
pub type Adjacency = SmallVec<[WaypointId; 4]>;

/// A fixed spatial point in the navigable graph.
#[derive(Clone, Debug)]
pub struct Waypoint {
    pub id: WaypointId,
    /// Dense position in `0..N-1`, refreshed by `WaypointGraph::reindex()`.
    pub index: usize,
    pub position: Vec3,
    adjacent: Adjacency,
}

impl Waypoint {
    /// Identities of the directly connected waypoints, in connection order.
    pub fn adjacent(&self) -> &[WaypointId] {
        &self.adjacent
    }

    pub fn is_adjacent(&self, other: WaypointId) -> bool {
        self.adjacent.contains(&other)
    }

    /// Straight-line distance from this waypoint to an arbitrary point.
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }
}

/// The waypoint graph container.
#[derive(Clone, Debug, Default)]
pub struct WaypointGraph {
    waypoints: Vec<Waypoint>,
    /// Identity -> current position in `waypoints`. Lookup only, never iterated.
    slots: FxHashMap<WaypointId, usize>,
    next_id: u32,
    revision: u64,
    needs_reindex: bool,
}

impl WaypointGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// All waypoints in enumeration order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn waypoint(&self, id: WaypointId) -> Option<&Waypoint> {
        self.slots.get(&id).map(|&slot| &self.waypoints[slot])
    }

    /// Counter bumped by every edit that affects routing.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True after the node set changed and before the next `reindex()`.
    pub fn needs_reindex(&self) -> bool {
        self.needs_reindex
    }

    fn slot(&self, id: WaypointId) -> Result<usize, NavError> {
        self.slots
            .get(&id)
            .copied()
            .ok_or(NavError::UnknownWaypoint(id))
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn touch_node_set(&mut self) {
        self.revision += 1;
        self.needs_reindex = true;
    }

    /// Append a waypoint at the given position. Returns its identity.
    pub fn add_waypoint(&mut self, position: Vec3) -> WaypointId {
        let id = WaypointId(self.next_id);
        self.next_id += 1;
        let slot = self.waypoints.len();
        self.waypoints.push(Waypoint {
            id,
            index: slot,
            position,
            adjacent: Adjacency::new(),
        });
        self.slots.insert(id, slot);
        self.touch_node_set();
        id
    }

    /// Remove a waypoint and every connection to it. The remaining waypoints
    /// keep their relative order. The removed waypoint is returned with its
    /// former adjacency intact.
    pub fn remove_waypoint(&mut self, id: WaypointId) -> Result<Waypoint, NavError> {
        let slot = self.slot(id)?;
        let neighbors = self.waypoints[slot].adjacent.clone();
        for neighbor in neighbors {
            let neighbor_slot = self.slot(neighbor)?;
            remove_link(&mut self.waypoints[neighbor_slot].adjacent, id);
        }

        let removed = self.waypoints.remove(slot);
        self.slots.remove(&id);
        for (s, waypoint) in self.waypoints.iter().enumerate().skip(slot) {
            self.slots.insert(waypoint.id, s);
        }
        self.touch_node_set();
        Ok(removed)
    }

    /// Move a waypoint. Edge lengths change, so the index must be rebuilt.
    pub fn set_position(&mut self, id: WaypointId, position: Vec3) -> Result<(), NavError> {
        let slot = self.slot(id)?;
        self.waypoints[slot].position = position;
        self.touch();
        Ok(())
    }

    /// Connect two waypoints in both directions. Returns `false` if they were
    /// already connected or if `a == b` (self-links are never created).
    pub fn connect(&mut self, a: WaypointId, b: WaypointId) -> Result<bool, NavError> {
        let slot_a = self.slot(a)?;
        let slot_b = self.slot(b)?;
        if a == b {
            tracing::warn!(waypoint = %a, "cannot connect a waypoint to itself");
            return Ok(false);
        }
        if self.waypoints[slot_a].is_adjacent(b) {
            return Ok(false);
        }
        self.waypoints[slot_a].adjacent.push(b);
        self.waypoints[slot_b].adjacent.push(a);
        self.touch();
        Ok(true)
    }

    /// Remove the connection between two waypoints on both sides. Returns
    /// `false` if they were not connected.
    pub fn disconnect(&mut self, a: WaypointId, b: WaypointId) -> Result<bool, NavError> {
        let slot_a = self.slot(a)?;
        let slot_b = self.slot(b)?;
        let removed = remove_link(&mut self.waypoints[slot_a].adjacent, b);
        remove_link(&mut self.waypoints[slot_b].adjacent, a);
        if removed {
            self.touch();
        }
        Ok(removed)
    }

    pub fn are_connected(&self, a: WaypointId, b: WaypointId) -> bool {
        self.waypoint(a).is_some_and(|w| w.is_adjacent(b))
    }

    /// Place a new waypoint `config.new_waypoint_distance` ahead of `from`
    /// along `forward` and connect it to `from`. A degenerate `forward` falls
    /// back to +Z.
    pub fn extend(
        &mut self,
        from: WaypointId,
        forward: Vec3,
        config: &NavConfig,
    ) -> Result<WaypointId, NavError> {
        let origin = self.waypoints[self.slot(from)?].position;
        let direction = forward.normalized().unwrap_or(Vec3::new(0.0, 0.0, 1.0));
        let id = self.add_waypoint(origin + direction * config.new_waypoint_distance);
        self.connect(from, id)?;
        Ok(id)
    }

    /// Assign dense indices `0..N-1` in enumeration order. Idempotent.
    pub fn reindex(&mut self) {
        for (i, waypoint) in self.waypoints.iter_mut().enumerate() {
            waypoint.index = i;
        }
        self.needs_reindex = false;
    }

    /// Straight-line (not graph) distance between two waypoints.
    pub fn distance_between(&self, a: WaypointId, b: WaypointId) -> Result<f32, NavError> {
        let pa = self.waypoints[self.slot(a)?].position;
        let pb = self.waypoints[self.slot(b)?].position;
        Ok(pa.distance(pb))
    }

    /// The waypoint closest to `point` by Euclidean distance. Ties go to the
    /// first in enumeration order. Returns `None` if the graph is empty.
    pub fn nearest_waypoint(&self, point: Vec3) -> Option<WaypointId> {
        self.waypoints
            .iter()
            .map(|w| (w.id, w.distance_to(point)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}

/// Remove `target` from an adjacency list, preserving order.
fn remove_link(adjacent: &mut Adjacency, target: WaypointId) -> bool {
    match adjacent.iter().position(|&id| id == target) {
        Some(pos) => {
            adjacent.remove(pos);
            true
        }
        None => false,
    }
}
