//! View command implementation - Interactive map viewer and game.

// CLI view uses intentional casts for display
#![allow(clippy::cast_possible_truncation)]

use super::generate::save_session;
use super::{CliError, WorldArgs};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thermogo::geo::spherical_to_cartesian;
use thermogo::map::Rgb;
use thermogo::session::UnitId;
use thermogo::view::{Camera, Cursor, session_frame, tile_summary};
use thermogo::{
    Command, Event as GameEvent, GameSession, Layer, WorldConfig, generate_map, load_snapshot,
};

/// Seats in a game started from the viewer.
const PLAYERS: usize = 2;

/// Cursor blink half-period.
const BLINK: Duration = Duration::from_millis(500);

/// Camera step for the pan keys.
const PAN_STEP: i32 = 4;

/// Execute the view command.
///
/// # Errors
///
/// Returns an error if the world cannot be built or the TUI fails.
pub(crate) fn execute(
    world: &WorldArgs,
    load: Option<&Path>,
    save: PathBuf,
) -> Result<(), CliError> {
    let (session, config) = match load {
        Some(path) => {
            let snapshot = load_snapshot(path)
                .map_err(|e| CliError::new(format!("Failed to load {}: {e}", path.display())))?;
            let config = *snapshot.session.map().config();
            (snapshot.session, config)
        }
        None => {
            let config = world.resolve()?;
            (new_session(&config)?, config)
        }
    };
    run_tui(App::new(session, config, save))
}

fn new_session(config: &WorldConfig) -> Result<GameSession, CliError> {
    let (map, sites) = generate_map(config)?;
    Ok(GameSession::new_game(Arc::new(map), sites, PLAYERS)?)
}

/// App state for the TUI.
struct App {
    session: GameSession,
    config: WorldConfig,
    camera: Camera,
    cursor: Cursor,
    show_info: bool,
    loading: bool,
    selected: Option<UnitId>,
    message: String,
    save_path: PathBuf,
    started: Instant,
}

impl App {
    fn new(session: GameSession, config: WorldConfig, save_path: PathBuf) -> Self {
        let camera = Camera::new(80, 24, session.map());
        let cursor = Cursor {
            position: camera.center(),
        };
        Self {
            session,
            config,
            camera,
            cursor,
            show_info: true,
            loading: false,
            selected: None,
            message: String::from("Welcome"),
            save_path,
            started: Instant::now(),
        }
    }

    fn cursor_visible(&self) -> bool {
        (self.started.elapsed().as_millis() / BLINK.as_millis()) % 2 == 0
    }

    fn move_cursor(&mut self, dx: i32, dy: i32) {
        let map = Arc::clone(self.session.map());
        self.cursor.step(dx, dy, &map);
        self.camera.follow(self.cursor.position, &map);
    }

    fn pan(&mut self, dx: i32, dy: i32) {
        let map = Arc::clone(self.session.map());
        self.camera.pan(dx, dy, &map);
    }

    fn regenerate(&mut self) {
        self.config.seed = self.config.seed.wrapping_add(1);
        match new_session(&self.config) {
            Ok(session) => {
                self.session = session;
                self.selected = None;
                let map = Arc::clone(self.session.map());
                self.camera.resize(self.camera.width(), self.camera.height(), &map);
                self.cursor.step(0, 0, &map);
                self.camera.follow(self.cursor.position, &map);
                self.message = format!("Generated world with seed {}", self.config.seed);
            }
            Err(e) => self.message = e.to_string(),
        }
        self.loading = false;
    }

    fn save(&mut self) {
        self.message = match save_session(&self.save_path, &self.session) {
            Ok(()) => format!("Saved to {}", self.save_path.display()),
            Err(e) => e.to_string(),
        };
    }

    fn issue(&mut self, command: Command) {
        match self.session.apply(command) {
            Ok((session, event)) => {
                self.session = session;
                self.message = describe(&event);
            }
            Err(e) => self.message = e.to_string(),
        }
    }

    fn spawn_unit(&mut self) {
        let at = self.cursor.position;
        let layer = if self.session.map().is_layer(at, Layer::Land) {
            Layer::Land
        } else {
            Layer::Sea
        };
        self.issue(Command::SpawnUnit { at, layer });
    }

    /// First press selects the unit under the cursor, second press moves it.
    fn select_or_move(&mut self) {
        let at = self.cursor.position;
        match self.selected.take() {
            Some(unit) => self.issue(Command::MoveUnit { unit, to: at }),
            None => match self.session.unit_at(at).filter(|u| u.is_mobile()) {
                Some(unit) => {
                    self.selected = Some(unit.id);
                    self.message = format!("Selected unit {}", unit.id);
                }
                None => self.message = String::from("No mobile unit here"),
            },
        }
    }
}

fn run_tui(mut app: App) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    loop {
        terminal
            .draw(|f| ui(f, &mut app))
            .map_err(|e| CliError::new(e.to_string()))?;

        if app.loading {
            app.regenerate();
            continue;
        }

        if event::poll(Duration::from_millis(50)).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Up => app.move_cursor(0, -1),
                KeyCode::Down => app.move_cursor(0, 1),
                KeyCode::Left => app.move_cursor(-1, 0),
                KeyCode::Right => app.move_cursor(1, 0),
                KeyCode::Char('[') => app.pan(-PAN_STEP, 0),
                KeyCode::Char(']') => app.pan(PAN_STEP, 0),
                KeyCode::Char('-') => app.pan(0, -PAN_STEP),
                KeyCode::Char('=') => app.pan(0, PAN_STEP),
                KeyCode::Char('i') => app.show_info = !app.show_info,
                KeyCode::Char('g') => app.loading = true,
                KeyCode::Char('s') => app.save(),
                KeyCode::Char('b') => app.issue(Command::SpawnBase {
                    at: app.cursor.position,
                }),
                KeyCode::Char('u') => app.spawn_unit(),
                KeyCode::Char('m') => app.select_or_move(),
                KeyCode::Char('p') | KeyCode::Enter => app.issue(Command::PassTurn),
                KeyCode::Char('x') => app.issue(Command::KillAll),
                KeyCode::Char('c') => app.issue(Command::Cleanup),
                _ => {}
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

fn ui(f: &mut Frame, app: &mut App) {
    let info_height = if app.show_info { 5 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Header
            Constraint::Min(5),              // Map
            Constraint::Length(info_height), // Info bar
            Constraint::Length(3),           // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    render_map(f, chunks[1], app);
    if app.show_info {
        render_info(f, chunks[2], app);
    }
    render_footer(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let player = app.session.active_player();
    let title = Line::from(vec![
        Span::styled(
            format!(" Thermogo | Seed {} | Turn {} | ", app.config.seed, app.session.turn()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} ({} actions)", player.name, player.actions),
            Style::default()
                .fg(to_color(player.color.rgb()))
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let header = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn render_map(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default().borders(Borders::ALL).title(" Map ");
    let inner = block.inner(area);

    if app.loading {
        let loading = Paragraph::new("***LOADING***")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .block(block);
        f.render_widget(loading, area);
        return;
    }

    let map = Arc::clone(app.session.map());
    app.camera.resize(inner.width, inner.height, &map);
    let frame = session_frame(&app.session, &app.camera);
    let cursor = if app.cursor_visible() {
        app.camera.to_screen(app.cursor.position, &map)
    } else {
        None
    };

    let lines: Vec<Line> = (0..frame.height())
        .map(|row| {
            let spans: Vec<Span> = frame
                .row(row)
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let mut style = Style::default().fg(to_color(cell.color));
                    if cursor == Some((col as u16, row)) {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Span::styled(cell.glyph.to_string(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn info_lines(app: &App) -> Vec<String> {
    let at = app.cursor.position;
    let map = app.session.map();
    let mut lines = vec![tile_summary(map, at)];

    if let Some(tile) = map.get(at) {
        let radius = map.world_radius_km();
        let [x, y, z] = spherical_to_cartesian(tile.latitude(), tile.longitude(), radius);
        lines.push(format!("Cartesian: ({x:.0}, {y:.0}, {z:.0}) km"));
    }
    if let Some(unit) = app.session.unit_at(at) {
        lines.push(format!("Unit {} of player {}", unit.id, unit.owner));
    }
    lines
}

fn render_info(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = info_lines(app).into_iter().map(Line::from).collect();
    let info = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Info "));
    f.render_widget(info, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = format!(
        " {} | [arrows] Cursor  [[ ] - =] Pan  [b]ase [u]nit [m]ove [p]ass  [x] Kill [c]lean  [i]nfo [g]en [s]ave [q]uit ",
        app.message
    );

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::TurnPassed { player, turn, cleaned } => {
            let mut text = format!("Turn {turn}: player {player} to move");
            if *cleaned > 0 {
                text.push_str(&format!(", {cleaned} dead units removed"));
            }
            text
        }
        GameEvent::Spawned(unit) => format!("Spawned {} at {}", unit.id, unit.position),
        GameEvent::Moved { unit, route } => {
            format!("Moved {unit} {} tiles (cost {:.2})", route.moves(), route.cost)
        }
        GameEvent::Killed(n) => format!("Killed {n} units"),
        GameEvent::CleanedUp(n) => format!("Removed {n} dead units"),
    }
}

const fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermogo::Coord;

    fn app() -> App {
        let config = WorldConfig::new(24, 4);
        App::new(new_session(&config).unwrap(), config, PathBuf::from("unused.json"))
    }

    #[test]
    fn test_cursor_wraps_and_camera_follows() {
        let mut app = app();
        app.cursor.position = Coord::new(0, 6);
        app.move_cursor(-1, 0);
        assert_eq!(app.cursor.position, Coord::new(23, 6));
        let map = Arc::clone(app.session.map());
        assert!(app.camera.to_screen(app.cursor.position, &map).is_some());
    }

    #[test]
    fn test_regenerate_bumps_seed() {
        let mut app = app();
        app.loading = true;
        app.regenerate();
        assert_eq!(app.config.seed, 5);
        assert!(!app.loading);
        assert_eq!(app.session.map().config().seed, 5);
    }

    #[test]
    fn test_info_bar_starts_with_tile_summary() {
        let mut app = app();
        app.cursor.position = Coord::new(3, 2);
        let lines = info_lines(&app);
        assert_eq!(lines[0], tile_summary(app.session.map(), Coord::new(3, 2)));
        assert!(lines[1].starts_with("Cartesian: ("));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_select_requires_mobile_unit() {
        let mut app = app();
        app.cursor.position = Coord::new(0, 0);
        app.select_or_move();
        assert!(app.selected.is_none());
    }

    #[test]
    fn test_pass_turn_key() {
        let mut app = app();
        app.issue(Command::PassTurn);
        assert_eq!(app.session.active_player().number, 2);
    }
}
