//! Path command implementation.

use super::output::{JsonRoute, format_route_text};
use super::{CliError, HeuristicArg, Movement, OutputFormat, WorldArgs};
use std::path::Path;
use std::sync::Arc;
use thermogo::path::find_route;
use thermogo::{Coord, GameMap, Layer, generate_map, load_snapshot};

/// Execute the path command.
///
/// # Errors
///
/// Returns an error if the map cannot be built or loaded, or a coordinate is
/// off the map.
pub(crate) fn execute(
    world: &WorldArgs,
    load: Option<&Path>,
    from: Coord,
    to: Coord,
    movement: Movement,
    heuristic: HeuristicArg,
    format: OutputFormat,
) -> Result<(), CliError> {
    let map = load_map(world, load)?;
    let layer = Layer::from(movement);
    let route = find_route(map.layer_graph(layer), from, to, heuristic.into())?;

    match format {
        OutputFormat::Text => {
            print!("{}", format_route_text(&map, from, to, layer, route.as_ref()));
        }
        OutputFormat::Json => {
            let json = JsonRoute::new(&map, from, to, layer, route.as_ref());
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

/// The map from a snapshot if one is given, otherwise a fresh one.
pub(super) fn load_map(world: &WorldArgs, load: Option<&Path>) -> Result<Arc<GameMap>, CliError> {
    if let Some(path) = load {
        let snapshot = load_snapshot(path)
            .map_err(|e| CliError::new(format!("Failed to load {}: {e}", path.display())))?;
        return Ok(Arc::clone(snapshot.session.map()));
    }
    let config = world.resolve()?;
    let (map, _) = generate_map(&config)?;
    Ok(Arc::new(map))
}
