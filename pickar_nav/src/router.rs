// Point-to-point routing over the waypoint graph.
//
// `Router` is the service the host application talks to. It owns the graph,
// the shortest-path index built from it, and the host's `PathPresenter`.
// Queries take arbitrary points (a tracked position and a goal), not
// waypoints:
//
//   1. Project `start` and `end` onto their nearest waypoints `S` and `E`.
//   2. If `S == E`, the route is the straight line `[start, end]` and the next
//      point is `end`.
//   3. Otherwise fetch the node path `S..E` from the index and render
//      `[start, S, ..., E, end]`.
//   4. The next point is `S`, unless walking from `start` to `S` and then on
//      to the look-ahead reference would mean turning back sharply (more than
//      `lookahead_angle_degrees` on the ground plane). In that case the query
//      point is already past `S` and the reference becomes the next point.
//   5. If `S` and `E` are in different components, render the straight line
//      `[start, end]` rather than keeping an old path on screen. The next
//      point is still chosen as in step 4, from `S`, so the caller is never
//      steered straight at a goal the graph cannot reach.
//
// The look-ahead reference is, by default, the waypoint at list position 1
// regardless of the route (`LookaheadReference::FixedWaypoint`). That matches
// the deployed behavior; `LookaheadReference::RouteNode` uses the route's own
// second waypoint instead.
//
// Construction is explicit (`Router::new`) and teardown hands the presenter
// back (`into_presenter`). Structural edits go through `graph_mut()` and must
// be followed by `rebuild()`; until then routing queries fail with
// `NavError::StaleIndex`.
//
// See also: `shortest_paths.rs` for the next-hop table, `presenter.rs` for
// the rendering boundary, `config.rs` for the look-ahead settings.

use crate::config::{LookaheadReference, NavConfig};
use crate::error::NavError;
use crate::graph::WaypointGraph;
use crate::presenter::PathPresenter;
use crate::shortest_paths::ShortestPathIndex;
use crate::types::{Vec3, WaypointId, horizontal_direction};
use serde::{Deserialize, Serialize};

/// How a route was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteKind {
    /// Start and end project onto the same waypoint; straight line.
    SameWaypoint,
    /// Routed through the waypoint graph.
    Graph,
    /// The projected waypoints are in different components; straight line.
    Unreachable,
}

/// An assembled route, ready to render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Polyline from the raw start to the raw end.
    pub points: Vec<Vec3>,
    /// Waypoints the polyline passes through (empty for straight lines).
    pub waypoints: Vec<WaypointId>,
    /// Where the caller should steer toward next.
    pub next_point: Vec3,
    pub kind: RouteKind,
}

impl Route {
    fn direct(start: Vec3, end: Vec3, next_point: Vec3, kind: RouteKind) -> Self {
        Self {
            points: vec![start, end],
            waypoints: Vec::new(),
            next_point,
            kind,
        }
    }
}

pub struct Router<P: PathPresenter> {
    graph: WaypointGraph,
    index: ShortestPathIndex,
    presenter: P,
    config: NavConfig,
    route: Option<Route>,
}

impl<P: PathPresenter> Router<P> {
    /// Reindex the graph and build its shortest-path index.
    pub fn new(mut graph: WaypointGraph, presenter: P, config: NavConfig) -> Result<Self, NavError> {
        graph.reindex();
        let index = ShortestPathIndex::build(&graph, &config)?;
        Ok(Self {
            graph,
            index,
            presenter,
            config,
            route: None,
        })
    }

    /// Reindex and rebuild the index after structural edits.
    pub fn rebuild(&mut self) -> Result<(), NavError> {
        self.graph.reindex();
        self.index.rebuild(&self.graph, &self.config)
    }

    pub fn graph(&self) -> &WaypointGraph {
        &self.graph
    }

    /// Mutable access for authoring edits. Call `rebuild()` afterwards.
    pub fn graph_mut(&mut self) -> &mut WaypointGraph {
        &mut self.graph
    }

    pub fn index(&self) -> &ShortestPathIndex {
        &self.index
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The most recently rendered route, if it has not been cleared.
    pub fn current_route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Steering target from the last `route_and_render`.
    pub fn next_point(&self) -> Option<Vec3> {
        self.route.as_ref().map(|r| r.next_point)
    }

    /// The waypoint nearest to `point`.
    pub fn nearest_waypoint(&self, point: Vec3) -> Result<WaypointId, NavError> {
        self.graph.nearest_waypoint(point).ok_or(NavError::EmptyGraph)
    }

    fn nearest_index(&self, point: Vec3) -> Result<usize, NavError> {
        let id = self.nearest_waypoint(point)?;
        self.graph
            .waypoint(id)
            .map(|w| w.index)
            .ok_or(NavError::UnknownWaypoint(id))
    }

    fn ensure_routable(&self) -> Result<(), NavError> {
        if self.graph.is_empty() {
            return Err(NavError::EmptyGraph);
        }
        self.index.ensure_current(&self.graph)
    }

    /// Route from `start` to `end`, hand the polyline to the presenter, and
    /// remember the next point. On error any displayed path is cleared.
    pub fn route_and_render(&mut self, start: Vec3, end: Vec3) -> Result<&Route, NavError> {
        let route = match self.plan_route(start, end) {
            Ok(route) => route,
            Err(err) => {
                self.clear_route();
                return Err(err);
            }
        };
        self.presenter.render(&route.points);
        Ok(&*self.route.insert(route))
    }

    /// Remove any displayed path; used when the caller has no active goal.
    pub fn clear_route(&mut self) {
        self.route = None;
        self.presenter.clear();
    }

    /// Travel distance from `start` to `end` along the route that
    /// `route_and_render` would produce, including the legs from the raw
    /// points to their nearest waypoints. `+inf` if unreachable.
    pub fn path_distance(&self, start: Vec3, end: Vec3) -> Result<f32, NavError> {
        self.ensure_routable()?;
        let s = self.nearest_index(start)?;
        let e = self.nearest_index(end)?;
        if s == e {
            return Ok(start.distance(end));
        }
        Ok(match self.index.path_distance(s, e) {
            Some(along) => {
                along + self.index.position(s).distance(start) + self.index.position(e).distance(end)
            }
            None => f32::INFINITY,
        })
    }

    /// Clear the display and hand the presenter back to the host.
    pub fn into_presenter(mut self) -> P {
        self.clear_route();
        self.presenter
    }

    fn plan_route(&self, start: Vec3, end: Vec3) -> Result<Route, NavError> {
        self.ensure_routable()?;
        let s = self.nearest_index(start)?;
        let e = self.nearest_index(end)?;
        if s == e {
            return Ok(Route::direct(start, end, end, RouteKind::SameWaypoint));
        }

        let path = self.index.path_between(s, e);
        if path.is_empty() {
            tracing::debug!(
                from = %self.index.waypoint_id(s),
                to = %self.index.waypoint_id(e),
                "no path between waypoints; drawing a straight line"
            );
            return Ok(Route::direct(
                start,
                end,
                self.lookahead(start, &[s]),
                RouteKind::Unreachable,
            ));
        }

        let mut points = Vec::with_capacity(path.len() + 2);
        points.push(start);
        points.extend(path.iter().map(|&i| self.index.position(i)));
        points.push(end);

        Ok(Route {
            points,
            waypoints: path.iter().map(|&i| self.index.waypoint_id(i)).collect(),
            next_point: self.lookahead(start, &path),
            kind: RouteKind::Graph,
        })
    }

    /// Pick the steering target for a non-empty node path.
    fn lookahead(&self, start: Vec3, path: &[usize]) -> Vec3 {
        let nearest = self.index.position(path[0]);
        let Some(approach) = horizontal_direction(start, nearest) else {
            return nearest;
        };
        let reference = match self.config.lookahead_reference {
            LookaheadReference::FixedWaypoint { list_position } => {
                (list_position < self.index.len()).then(|| self.index.position(list_position))
            }
            LookaheadReference::RouteNode => path.get(1).map(|&i| self.index.position(i)),
        };
        let Some(reference) = reference else {
            return nearest;
        };
        let Some(onward) = horizontal_direction(nearest, reference) else {
            return nearest;
        };
        if approach.angle_degrees(onward) > self.config.lookahead_angle_degrees {
            reference
        } else {
            nearest
        }
    }
}
