// JSON interchange format for the authoring store.
//
// An authoring tool saves the graph as an ordered list of waypoint records,
// each holding a position and the list positions of its neighbors. List
// order is enumeration order, so the record at position 1 is the waypoint
// the router's default look-ahead compares against.
//
// Hand-edited files are common, so import is lenient about one-sided links
// (they are made two-sided) and self-links (dropped with a warning), but
// rejects references to positions that do not exist.
//
// See also: `graph.rs` for the in-memory graph, `demos/warehouse.json` for a
// sample file.

use crate::error::NavError;
use crate::graph::WaypointGraph;
use crate::types::{Vec3, WaypointId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub waypoints: Vec<WaypointRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaypointRecord {
    pub position: Vec3,
    /// List positions of connected waypoints.
    #[serde(default)]
    pub adjacent: Vec<usize>,
}

impl GraphSnapshot {
    pub fn from_json(json: &str) -> Result<Self, NavError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, NavError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl WaypointGraph {
    /// Build a reindexed graph from a snapshot.
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Result<Self, NavError> {
        let count = snapshot.waypoints.len();
        let mut graph = WaypointGraph::new();
        let ids: Vec<WaypointId> = snapshot
            .waypoints
            .iter()
            .map(|record| graph.add_waypoint(record.position))
            .collect();

        for (from, record) in snapshot.waypoints.iter().enumerate() {
            for &to in &record.adjacent {
                if to >= count {
                    return Err(NavError::InvalidSnapshot(format!(
                        "waypoint {from} links to position {to}, but there are only {count} waypoints"
                    )));
                }
                if to == from {
                    tracing::warn!(position = from, "ignoring self-link in graph snapshot");
                    continue;
                }
                graph.connect(ids[from], ids[to])?;
            }
        }

        graph.reindex();
        Ok(graph)
    }

    /// Export in enumeration order. Neighbor positions are the neighbors'
    /// current list positions, so the graph need not be reindexed first.
    pub fn to_snapshot(&self) -> GraphSnapshot {
        let waypoints = self
            .waypoints()
            .iter()
            .map(|waypoint| WaypointRecord {
                position: waypoint.position,
                adjacent: waypoint
                    .adjacent()
                    .iter()
                    .filter_map(|&id| self.waypoints().iter().position(|w| w.id == id))
                    .collect(),
            })
            .collect();
        GraphSnapshot { waypoints }
    }

    pub fn from_json(json: &str) -> Result<Self, NavError> {
        Self::from_snapshot(&GraphSnapshot::from_json(json)?)
    }

    pub fn to_json(&self) -> Result<String, NavError> {
        self.to_snapshot().to_json()
    }
}
