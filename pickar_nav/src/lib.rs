// pickar_nav: waypoint-graph navigation library.
//
// A guidance display (an AR headset, a handheld, a debug viewer) tracks a
// position and has a goal. This crate answers "which way, and what should I
// draw" over a hand-authored graph of waypoints: it precomputes all-pairs
// shortest paths once per graph edit, then serves cheap point-to-point route
// queries and hands the resulting polyline to a host-supplied presenter.
//
// Module overview:
// - `types.rs`:          Vec3 math, WaypointId.
// - `graph.rs`:          WaypointGraph: waypoints, symmetric adjacency, edit revision.
// - `snapshot.rs`:       JSON import/export of the authoring-store format.
// - `shortest_paths.rs`: Floyd–Warshall distance + next-hop tables, path reconstruction.
// - `router.rs`:         Router: nearest-waypoint projection, route assembly, look-ahead.
// - `presenter.rs`:      PathPresenter trait (render/clear) + RecordingPresenter.
// - `config.rs`:         NavConfig: look-ahead angle/reference and build tuning.
// - `error.rs`:          NavError.
//
// The binary `pickar_route` (`main.rs`) loads a snapshot and prints a single
// route; see its `--help`.
//
// Nothing here draws, reads input devices, or keeps global state. The host
// owns the Router and the presenter and decides when to rebuild.

pub mod config;
pub mod error;
pub mod graph;
pub mod presenter;
pub mod router;
pub mod shortest_paths;
pub mod snapshot;
pub mod types;

pub use config::{LookaheadReference, NavConfig};
pub use error::NavError;
pub use graph::{Waypoint, WaypointGraph};
pub use presenter::{PathPresenter, RecordingPresenter};
pub use router::{Route, RouteKind, Router};
pub use shortest_paths::ShortestPathIndex;
pub use snapshot::{GraphSnapshot, WaypointRecord};
pub use types::{Vec3, WaypointId};
