//! Generate command implementation.

use super::output::{JsonMapSummary, format_map_stats};
use super::{CliError, MapFormat, WorldArgs};
use std::path::Path;
use std::sync::Arc;
use thermogo::view::{Camera, render_ansi, render_plain, session_frame};
use thermogo::{GameSession, generate_map, save_snapshot};

/// Seats in a game saved straight from `generate`.
const NEW_GAME_PLAYERS: usize = 2;

/// Execute the generate command.
///
/// # Errors
///
/// Returns an error if generation or saving fails.
pub(crate) fn execute(
    world: &WorldArgs,
    format: MapFormat,
    save: Option<&Path>,
) -> Result<(), CliError> {
    let config = world.resolve()?;
    let (map, sites) = generate_map(&config)?;
    let session = GameSession::new_game(Arc::new(map), sites, NEW_GAME_PLAYERS)?;
    let map = session.map();

    match format {
        MapFormat::Json => {
            let summary = JsonMapSummary::from_map(map, session.deposits());
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        MapFormat::Text => {
            print!("{}", render_ansi(&session_frame(&session, &Camera::whole(map))));
            print!("{}", format_map_stats(map, session.deposits()));
        }
        MapFormat::Plain => {
            print!("{}", render_plain(&session_frame(&session, &Camera::whole(map))));
            print!("{}", format_map_stats(map, session.deposits()));
        }
    }

    if let Some(path) = save {
        save_session(path, &session)?;
    }
    Ok(())
}

/// Save a session under the file's stem.
pub(super) fn save_session(path: &Path, session: &GameSession) -> Result<(), CliError> {
    let name = path
        .file_stem()
        .map_or_else(|| "world".to_string(), |n| n.to_string_lossy().to_string());
    save_snapshot(path, &name, session)
        .map_err(|e| CliError::new(format!("Failed to save {}: {e}", path.display())))?;
    eprintln!("Saved game to {}", path.display());
    Ok(())
}
