// CLI entry point for one-off route queries.
//
// Loads an authoring-store snapshot, builds the shortest-path index, routes
// between two points, and prints what a presenter would have drawn. Useful
// for checking hand-edited graphs without a headset.
//
// Usage:
//   pickar_route --graph <FILE> --start <X,Y,Z> --end <X,Y,Z> [OPTIONS]
//     --config <FILE>   NavConfig JSON (default: built-in defaults)
//     --verbose, -v     Debug-level logging (overridden by RUST_LOG)

use std::path::{Path, PathBuf};

use pickar_nav::{NavConfig, RecordingPresenter, Router, Vec3, WaypointGraph};
use tracing_subscriber::EnvFilter;

struct Args {
    graph: PathBuf,
    config: Option<PathBuf>,
    start: Vec3,
    end: Vec3,
    verbose: bool,
}

fn main() {
    let args = parse_args();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("pickar_route: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => NavConfig::from_json(&read_file(path)?)?,
        None => NavConfig::default(),
    };
    let graph = WaypointGraph::from_json(&read_file(&args.graph)?)?;
    tracing::info!(waypoints = graph.len(), "loaded graph snapshot");

    let mut router = Router::new(graph, RecordingPresenter::new(), config)?;
    let distance = router.path_distance(args.start, args.end)?;
    let route = router.route_and_render(args.start, args.end)?;

    println!("kind:       {:?}", route.kind);
    println!("next point: {}", route.next_point);
    println!("distance:   {distance:.3}");
    println!("waypoints:  {}", route.waypoints.len());
    for (i, point) in route.points.iter().enumerate() {
        println!("  {i:>3}  {point}");
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}

/// Parse `x,y,z` into a point.
fn parse_vec3(s: &str) -> Option<Vec3> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|p| p.trim().parse().ok())
        .collect::<Option<_>>()?;
    match parts[..] {
        [x, y, z] => Some(Vec3::new(x, y, z)),
        _ => None,
    }
}

/// Parse command-line arguments. Uses simple `std::env::args()` matching.
fn parse_args() -> Args {
    let mut graph = None;
    let mut config = None;
    let mut start = None;
    let mut end = None;
    let mut verbose = false;
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--graph" => {
                i += 1;
                graph = Some(args.get(i).map(PathBuf::from).unwrap_or_else(|| {
                    eprintln!("--graph requires a file path");
                    std::process::exit(1);
                }));
            }
            "--config" => {
                i += 1;
                config = Some(args.get(i).map(PathBuf::from).unwrap_or_else(|| {
                    eprintln!("--config requires a file path");
                    std::process::exit(1);
                }));
            }
            "--start" => {
                i += 1;
                start = Some(args.get(i).and_then(|s| parse_vec3(s)).unwrap_or_else(|| {
                    eprintln!("--start requires a point as X,Y,Z");
                    std::process::exit(1);
                }));
            }
            "--end" => {
                i += 1;
                end = Some(args.get(i).and_then(|s| parse_vec3(s)).unwrap_or_else(|| {
                    eprintln!("--end requires a point as X,Y,Z");
                    std::process::exit(1);
                }));
            }
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    match (graph, start, end) {
        (Some(graph), Some(start), Some(end)) => Args {
            graph,
            config,
            start,
            end,
            verbose,
        },
        _ => {
            eprintln!("--graph, --start and --end are required");
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Usage: pickar_route --graph <FILE> --start <X,Y,Z> --end <X,Y,Z> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --graph <FILE>     Graph snapshot JSON (required)");
    println!("  --start <X,Y,Z>    Query start point (required)");
    println!("  --end <X,Y,Z>      Query end point (required)");
    println!("  --config <FILE>    NavConfig JSON (default: built-in defaults)");
    println!("  --verbose, -v      Debug-level logging");
    println!("  --help, -h         Show this help");
}
