#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use thermogo::path::find_route;
use thermogo::{Coord, Graph, Heuristic};

/// Structured input for route fuzzing.
#[derive(Arbitrary, Debug)]
struct RouteInput {
    /// Half the grid width.
    half: u8,
    start: (u8, u8),
    goal: (u8, u8),
    /// Tiles to cut out of the grid.
    walls: Vec<(u8, u8)>,
}

fuzz_target!(|input: RouteInput| {
    let half = u16::from(input.half.clamp(1, 32));
    let width = half * 2;
    let Ok(mut graph) = Graph::sphere(width, half) else {
        return;
    };
    for &(x, y) in input.walls.iter().take(512) {
        if let Some(id) = graph.id(Coord::new(u16::from(x), u16::from(y))) {
            graph.isolate(id);
        }
    }

    let start = Coord::new(u16::from(input.start.0), u16::from(input.start.1));
    let goal = Coord::new(u16::from(input.goal.0), u16::from(input.goal.1));
    let fast = find_route(&graph, start, goal, Heuristic::Spherical);
    let exact = find_route(&graph, start, goal, Heuristic::Zero);

    match (fast, exact) {
        (Ok(Some(fast)), Ok(Some(exact))) => {
            assert!((fast.cost - exact.cost).abs() < 1e-9, "{fast:?} vs {exact:?}");
            assert_eq!(fast.steps.first(), Some(&start));
            assert_eq!(fast.steps.last(), Some(&goal));
        }
        (Ok(None), Ok(None)) | (Err(_), Err(_)) => {}
        (fast, exact) => panic!("heuristics disagree: {fast:?} vs {exact:?}"),
    }
});
