// Data-driven navigation configuration.
//
// Tunable routing parameters live in `NavConfig`, loadable from JSON at
// startup so the look-ahead behavior and authoring defaults can be adjusted
// without recompiling. Every field has a default; a partial JSON object only
// overrides the fields it names.
//
// See also: `router.rs` which reads the look-ahead settings,
// `shortest_paths.rs` which reads the parallel rebuild threshold, `graph.rs`
// which reads `new_waypoint_distance` for `extend()`.

use crate::error::NavError;
use serde::{Deserialize, Serialize};

/// Which node the router compares against when deciding whether to skip
/// the nearest waypoint as the next steering target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookaheadReference {
    /// A fixed waypoint at the given list position, independent of the
    /// computed route. Position 1 reproduces the deployed behavior.
    FixedWaypoint { list_position: usize },
    /// The second waypoint of the computed route (the next hop after the
    /// nearest waypoint).
    RouteNode,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// If the horizontal heading from the query start to its nearest waypoint
    /// and the heading from that waypoint onward differ by more than this
    /// many degrees, the onward waypoint becomes the next point.
    pub lookahead_angle_degrees: f32,
    pub lookahead_reference: LookaheadReference,
    /// Node count at which the Floyd–Warshall relaxation switches to
    /// row-parallel execution.
    pub parallel_rebuild_min_waypoints: usize,
    /// Distance ahead of an existing waypoint at which `extend()` places a
    /// new one.
    pub new_waypoint_distance: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            lookahead_angle_degrees: 115.0,
            lookahead_reference: LookaheadReference::FixedWaypoint { list_position: 1 },
            parallel_rebuild_min_waypoints: 256,
            new_waypoint_distance: 1.0,
        }
    }
}

impl NavConfig {
    pub fn from_json(json: &str) -> Result<Self, NavError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, NavError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
