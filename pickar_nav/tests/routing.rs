// End-to-end routing scenarios through the public API: build a graph, hand it
// to a Router with a RecordingPresenter, and check what would be drawn.

use pickar_nav::{
    NavConfig, RecordingPresenter, RouteKind, Router, ShortestPathIndex, Vec3, WaypointGraph,
    WaypointId,
};

const WAREHOUSE: &str = include_str!("../../demos/warehouse.json");

fn router(graph: WaypointGraph) -> Router<RecordingPresenter> {
    Router::new(graph, RecordingPresenter::new(), NavConfig::default()).unwrap()
}

fn triangle(graph: &mut WaypointGraph, origin: Vec3) -> [WaypointId; 3] {
    let a = graph.add_waypoint(origin);
    let b = graph.add_waypoint(origin + Vec3::new(1.0, 0.0, 0.0));
    let c = graph.add_waypoint(origin + Vec3::new(0.0, 0.0, 1.0));
    graph.connect(a, b).unwrap();
    graph.connect(b, c).unwrap();
    graph.connect(c, a).unwrap();
    [a, b, c]
}

#[test]
fn line_of_four_routes_end_to_end() {
    let mut graph = WaypointGraph::new();
    let ids: Vec<_> = (0..4)
        .map(|i| graph.add_waypoint(Vec3::new(i as f32, 0.0, 0.0)))
        .collect();
    for pair in ids.windows(2) {
        graph.connect(pair[0], pair[1]).unwrap();
    }
    let mut router = router(graph);

    let index = router.index();
    assert_eq!(index.path_between(0, 3), vec![0, 1, 2, 3]);
    assert_eq!(index.distance(0, 3), 3.0);

    let route = router
        .route_and_render(Vec3::new(-0.2, 0.0, 0.0), Vec3::new(3.1, 0.0, 0.0))
        .unwrap();
    assert_eq!(route.kind, RouteKind::Graph);
    assert_eq!(route.waypoints, ids);
    assert_eq!(route.points.len(), 6);
}

#[test]
fn disjoint_triangles_fall_back_to_direct_line() {
    let mut graph = WaypointGraph::new();
    triangle(&mut graph, Vec3::ZERO);
    triangle(&mut graph, Vec3::new(10.0, 0.0, 0.0));
    let mut router = router(graph);

    for i in 0..3 {
        for j in 3..6 {
            assert!(router.index().path_between(i, j).is_empty());
            assert_eq!(router.index().distance(j, i), f32::INFINITY);
        }
    }

    // Render a real path first, then make sure the fallback replaces it.
    router
        .route_and_render(Vec3::new(0.1, 0.0, 0.0), Vec3::new(0.9, 0.0, 0.1))
        .unwrap();
    let start = Vec3::new(0.1, 0.0, 0.1);
    let end = Vec3::new(10.9, 0.0, 0.1);
    let route = router.route_and_render(start, end).unwrap().clone();
    assert_eq!(route.kind, RouteKind::Unreachable);
    assert_eq!(route.points, vec![start, end]);
    assert_eq!(router.presenter().current(), Some(&[start, end][..]));
    assert_eq!(
        router.path_distance(start, end).unwrap(),
        f32::INFINITY
    );
}

#[test]
fn shared_nearest_waypoint_gives_two_point_path() {
    let mut graph = WaypointGraph::new();
    graph.add_waypoint(Vec3::new(0.0, 0.0, 0.0));
    graph.add_waypoint(Vec3::new(6.0, 0.0, 0.0));
    let mut router = router(graph);

    let start = Vec3::new(0.5, 0.0, 1.0);
    let end = Vec3::new(-1.0, 0.0, -0.5);
    let route = router.route_and_render(start, end).unwrap();
    assert_eq!(route.kind, RouteKind::SameWaypoint);
    assert_eq!(route.points, vec![start, end]);
    assert_eq!(route.next_point, end);
}

#[test]
fn sharp_turn_back_advances_next_point() {
    // Node 1 in list order is the look-ahead reference.
    let mut graph = WaypointGraph::new();
    let near = graph.add_waypoint(Vec3::new(0.0, 0.0, 0.0));
    let onward = graph.add_waypoint(Vec3::new(0.0, 0.0, 3.0));
    let goal = graph.add_waypoint(Vec3::new(0.0, 0.0, 6.0));
    graph.connect(near, onward).unwrap();
    graph.connect(onward, goal).unwrap();
    let mut router = router(graph);

    // Slightly past `near`, off to the side: approach direction points back
    // and away (about 153 degrees from the onward direction).
    let start = Vec3::new(0.5, 0.0, 1.0);
    let route = router
        .route_and_render(start, Vec3::new(0.0, 0.0, 6.2))
        .unwrap();
    assert_eq!(route.next_point, Vec3::new(0.0, 0.0, 3.0));

    // Well behind `near`: approaching forward, so keep it.
    let start = Vec3::new(0.2, 0.0, -1.0);
    let route = router
        .route_and_render(start, Vec3::new(0.0, 0.0, 6.2))
        .unwrap();
    assert_eq!(route.next_point, Vec3::new(0.0, 0.0, 0.0));
}

#[test]
fn empty_graph_cannot_be_indexed() {
    let graph = WaypointGraph::new();
    assert!(graph.nearest_waypoint(Vec3::ZERO).is_none());
    assert!(ShortestPathIndex::build(&graph, &NavConfig::default()).is_err());
}

#[test]
fn warehouse_demo_routes_around_racks() {
    let graph = WaypointGraph::from_json(WAREHOUSE).unwrap();
    assert_eq!(graph.len(), 10);
    let mut router = router(graph);

    let start = Vec3::new(0.2, 0.0, -0.3);
    let end = Vec3::new(8.0, 0.0, 9.2);
    let route = router.route_and_render(start, end).unwrap().clone();
    assert_eq!(route.kind, RouteKind::Graph);
    let ids: Vec<u32> = route.waypoints.iter().map(|id| id.0).collect();
    assert_eq!(ids, vec![0, 1, 2, 6, 7]);
    assert_eq!(route.next_point, Vec3::new(0.0, 0.0, 0.0));

    let expected = 12.0 + 17.0_f32.sqrt() + start.length() + 0.2;
    let distance = router.path_distance(start, end).unwrap();
    assert!((distance - expected).abs() < 1e-4);

    // The mezzanine is not linked to the floor.
    let route = router
        .route_and_render(start, Vec3::new(20.0, 3.0, 4.1))
        .unwrap();
    assert_eq!(route.kind, RouteKind::Unreachable);
    // Drawn as a straight line, but steering stays on the floor graph.
    assert_eq!(route.points.len(), 2);
    assert_eq!(route.next_point, Vec3::new(0.0, 0.0, 0.0));
}

#[test]
fn authoring_edit_then_rebuild_changes_route() {
    let mut router = router(WaypointGraph::from_json(WAREHOUSE).unwrap());
    let start = Vec3::new(0.0, 0.0, 0.1);
    let end = Vec3::new(8.0, 0.0, 4.0);

    let before: Vec<u32> = router
        .route_and_render(start, end)
        .unwrap()
        .waypoints
        .iter()
        .map(|id| id.0)
        .collect();
    assert_eq!(before, vec![0, 1, 2, 3]);

    // Close the aisle between 1 and 2.
    router
        .graph_mut()
        .disconnect(WaypointId(1), WaypointId(2))
        .unwrap();
    assert!(router.route_and_render(start, end).is_err());
    assert_eq!(router.presenter().current(), None);

    router.rebuild().unwrap();
    let after: Vec<u32> = router
        .route_and_render(start, end)
        .unwrap()
        .waypoints
        .iter()
        .map(|id| id.0)
        .collect();
    assert_eq!(after, vec![0, 5, 4, 3]);
}
