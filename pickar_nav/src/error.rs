// Error type for graph editing, index building, and routing.
//
// Every fallible public operation in this crate returns `Result<_, NavError>`.
// Unreachable destinations are *not* errors: they are a normal routing outcome
// (see `RouteKind::Unreachable` in `router.rs`).

use crate::types::WaypointId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    /// The graph has no waypoints, so there is nothing to project onto.
    #[error("waypoint graph is empty")]
    EmptyGraph,

    #[error("unknown waypoint {0}")]
    UnknownWaypoint(WaypointId),

    /// The node set changed and `reindex()` has not run since.
    #[error("waypoint indices are stale; reindex before rebuilding paths")]
    NotReindexed,

    /// The graph was edited after the shortest-path index was built.
    #[error("shortest-path index built for graph revision {built_for}, graph is at {current}")]
    StaleIndex { built_for: u64, current: u64 },

    #[error("invalid graph snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
