// All-pairs shortest paths over the waypoint graph (Floyd–Warshall).
//
// `ShortestPathIndex` stores two dense `N×N` tables in row-major `Vec`s:
// `distance[i][j]` (Euclidean path length, `+inf` when unreachable) and
// `next_hop[i][j]` (the waypoint to step to from `i` when heading for `j`).
// Rows and columns are the graph's dense waypoint indices at build time.
//
// The table is rebuilt in full on demand; there is no incremental update.
// It records the graph revision it was built from, and snapshots waypoint
// identities and positions, so that callers can detect a stale table and so
// that path reconstruction never reads a graph that has moved on.
//
// ## Relaxation order
//
// Iteration order is `k, i, j` with a strict `<`, so ties keep the first path
// found. During pass `k`, row `k` and column `k` cannot change (relaxing
// through `k` itself adds `distance[k][k] = 0`), which makes every row
// independent within a pass. Large graphs relax rows in parallel with rayon;
// the result is identical to the sequential order.
//
// See also: `graph.rs` for the graph being indexed, `router.rs` which maps
// arbitrary points onto waypoints and stitches the node path into a route.

use crate::config::NavConfig;
use crate::error::NavError;
use crate::graph::WaypointGraph;
use crate::types::{Vec3, WaypointId};
use rayon::prelude::*;

/// Upper bound on reconstructed path length, in hops. This is a safety limit
/// against a corrupted next-hop table looping forever. Legitimate paths longer
/// than this are truncated as well, so keep graphs well under it.
pub const MAX_PATH_HOPS: usize = 100;

/// Dense all-pairs distance and next-hop tables.
#[derive(Clone, Debug, Default)]
pub struct ShortestPathIndex {
    len: usize,
    distance: Vec<f32>,
    next_hop: Vec<Option<u32>>,
    ids: Vec<WaypointId>,
    positions: Vec<Vec3>,
    graph_revision: u64,
}

impl ShortestPathIndex {
    /// Build the tables for the current graph.
    pub fn build(graph: &WaypointGraph, config: &NavConfig) -> Result<Self, NavError> {
        let mut index = Self::default();
        index.rebuild(graph, config)?;
        Ok(index)
    }

    /// Recompute both tables from scratch. On error the previous tables are
    /// left untouched.
    pub fn rebuild(&mut self, graph: &WaypointGraph, config: &NavConfig) -> Result<(), NavError> {
        if graph.is_empty() {
            return Err(NavError::EmptyGraph);
        }
        if graph.needs_reindex() {
            return Err(NavError::NotReindexed);
        }

        let n = graph.len();
        let mut distance = vec![f32::INFINITY; n * n];
        let mut next_hop: Vec<Option<u32>> = vec![None; n * n];
        for i in 0..n {
            distance[i * n + i] = 0.0;
            next_hop[i * n + i] = Some(i as u32);
        }

        // Seed direct edges. Adjacency is symmetric, so both directions get set.
        for waypoint in graph.waypoints() {
            let i = waypoint.index;
            for &neighbor_id in waypoint.adjacent() {
                let neighbor = graph
                    .waypoint(neighbor_id)
                    .ok_or(NavError::UnknownWaypoint(neighbor_id))?;
                let j = neighbor.index;
                distance[i * n + j] = waypoint.position.distance(neighbor.position);
                next_hop[i * n + j] = Some(j as u32);
            }
        }

        let parallel = n >= config.parallel_rebuild_min_waypoints;
        let mut row_k_distance = vec![0.0f32; n];
        for k in 0..n {
            row_k_distance.copy_from_slice(&distance[k * n..(k + 1) * n]);
            let relax = |(row_distance, row_next): (&mut [f32], &mut [Option<u32>])| {
                relax_row(k, &row_k_distance, row_distance, row_next);
            };
            if parallel {
                distance
                    .par_chunks_mut(n)
                    .zip(next_hop.par_chunks_mut(n))
                    .for_each(relax);
            } else {
                distance
                    .chunks_mut(n)
                    .zip(next_hop.chunks_mut(n))
                    .for_each(relax);
            }
        }

        self.len = n;
        self.distance = distance;
        self.next_hop = next_hop;
        self.ids = graph.waypoints().iter().map(|w| w.id).collect();
        self.positions = graph.waypoints().iter().map(|w| w.position).collect();
        self.graph_revision = graph.revision();

        tracing::debug!(
            waypoints = n,
            parallel,
            revision = self.graph_revision,
            "rebuilt shortest-path index"
        );
        Ok(())
    }

    /// Number of waypoints the tables were built for.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Graph revision the tables were built from.
    pub fn graph_revision(&self) -> u64 {
        self.graph_revision
    }

    /// True if the graph has not been edited since the last rebuild.
    pub fn is_current(&self, graph: &WaypointGraph) -> bool {
        self.len > 0 && !graph.needs_reindex() && self.graph_revision == graph.revision()
    }

    /// Fail with `StaleIndex` unless `is_current(graph)`.
    pub fn ensure_current(&self, graph: &WaypointGraph) -> Result<(), NavError> {
        if self.is_current(graph) {
            Ok(())
        } else {
            Err(NavError::StaleIndex {
                built_for: self.graph_revision,
                current: graph.revision(),
            })
        }
    }

    pub fn waypoint_id(&self, index: usize) -> WaypointId {
        self.ids[index]
    }

    pub fn position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }

    /// Flat table offset of `(from, to)`. Both must be below `len()`; an
    /// out-of-range column would otherwise alias into the next row.
    fn cell(&self, from: usize, to: usize) -> usize {
        assert!(
            from < self.len && to < self.len,
            "waypoint index out of range: ({from}, {to}) with {} waypoints",
            self.len
        );
        from * self.len + to
    }

    /// Shortest path length between two indices, `+inf` if unreachable.
    /// Panics if either index is not below `len()`.
    pub fn distance(&self, from: usize, to: usize) -> f32 {
        self.distance[self.cell(from, to)]
    }

    /// The waypoint index to step to from `from` when heading for `to`.
    /// Panics if either index is not below `len()`.
    pub fn next_hop(&self, from: usize, to: usize) -> Option<usize> {
        self.next_hop[self.cell(from, to)].map(|hop| hop as usize)
    }

    /// Waypoint indices from `start` to `end` inclusive, or an empty vector if
    /// `end` is unreachable from `start`.
    ///
    /// Reconstruction stops after `MAX_PATH_HOPS` hops and returns what it has
    /// so far; that only happens if the next-hop table is corrupt.
    ///
    /// `start` and `end` must be below `len()`; out-of-range indices panic.
    pub fn path_between(&self, start: usize, end: usize) -> Vec<usize> {
        let mut path = Vec::new();
        if self.next_hop(start, end).is_none() {
            return path;
        }
        path.push(start);
        let mut current = start;
        while current != end {
            let Some(hop) = self.next_hop(current, end) else {
                tracing::warn!(
                    start,
                    end,
                    at = current,
                    "next-hop table has a gap on a reachable path"
                );
                break;
            };
            current = hop;
            path.push(current);
            if path.len() > MAX_PATH_HOPS {
                tracing::warn!(
                    start,
                    end,
                    hops = MAX_PATH_HOPS,
                    "path reconstruction hit the hop limit; next-hop table is corrupt"
                );
                break;
            }
        }
        path
    }

    /// Sum of edge lengths along `path_between(start, end)`, or `None` if
    /// `end` is unreachable. Same index precondition as `path_between`.
    pub fn path_distance(&self, start: usize, end: usize) -> Option<f32> {
        let path = self.path_between(start, end);
        if path.is_empty() {
            return None;
        }
        Some(
            path.windows(2)
                .map(|pair| self.positions[pair[0]].distance(self.positions[pair[1]]))
                .sum(),
        )
    }
}

/// Relax one row `i` through intermediate `k`.
fn relax_row(
    k: usize,
    row_k_distance: &[f32],
    row_distance: &mut [f32],
    row_next: &mut [Option<u32>],
) {
    let through_k = row_distance[k];
    if through_k == f32::INFINITY {
        return;
    }
    let hop_toward_k = row_next[k];
    for ((dist, next), &k_to_j) in row_distance
        .iter_mut()
        .zip(row_next.iter_mut())
        .zip(row_k_distance)
    {
        let candidate = through_k + k_to_j;
        if candidate < *dist {
            *dist = candidate;
            *next = hop_toward_k;
        }
    }
}
