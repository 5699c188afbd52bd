//! Camera and viewport: turning a session into a grid of coloured glyphs.
//!
//! Nothing here draws. A [`Frame`] is plain data that a terminal front end
//! (or [`render_ansi`]) turns into output.

use crate::map::{Coord, GameMap, Rgb};
use crate::session::GameSession;
use std::fmt::Write as _;

/// Glyph used for resource deposits.
pub const DEPOSIT_GLYPH: char = '$';

/// Colour used for resource deposits.
pub const DEPOSIT_COLOR: Rgb = Rgb::new(255, 215, 0);

/// One character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Character to draw.
    pub glyph: char,
    /// Foreground colour.
    pub color: Rgb,
}

impl Cell {
    /// An empty cell.
    pub const BLANK: Self = Self {
        glyph: ' ',
        color: Rgb::new(0, 0, 0),
    };
}

/// A rectangular view onto the world, centred on `(x, y)`.
///
/// The world is endless horizontally, so `x` wraps; vertically the camera
/// stops where its edge meets a pole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    x: u16,
    y: u16,
    width: u16,
    height: u16,
}

impl Camera {
    /// A `width` x `height` camera looking at the map's leftmost column.
    #[must_use]
    pub fn new(width: u16, height: u16, map: &GameMap) -> Self {
        let mut camera = Self {
            x: 0,
            y: 0,
            width,
            height,
        };
        camera.y = camera.clamp_y(map.height() / 2, map.height());
        camera
    }

    /// A camera showing the whole map, row 0 at the top.
    #[must_use]
    pub fn whole(map: &GameMap) -> Self {
        Self {
            x: map.width() / 2,
            y: map.height() / 2,
            width: map.width(),
            height: map.height(),
        }
    }

    /// Centre of the view.
    #[must_use]
    pub const fn center(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    /// View width in cells.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// View height in cells.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Change the view size, keeping the centre inside the map.
    pub fn resize(&mut self, width: u16, height: u16, map: &GameMap) {
        self.width = width;
        self.height = height;
        self.y = self.clamp_y(self.y, map.height());
    }

    fn clamp_y(&self, y: u16, world_height: u16) -> u16 {
        let half = self.height / 2;
        let low = half;
        let high = world_height.saturating_sub(self.height - half);
        if low > high {
            world_height / 2
        } else {
            y.clamp(low, high)
        }
    }

    /// Pan by `(dx, dy)` cells.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pan(&mut self, dx: i32, dy: i32, map: &GameMap) {
        let x = (i32::from(self.x) + dx).rem_euclid(i32::from(map.width()));
        let y = (i32::from(self.y) + dy).clamp(0, i32::from(u16::MAX));
        self.x = x as u16;
        self.y = self.clamp_y(y as u16, map.height());
    }

    /// Pan just enough to bring `coord` into view.
    pub fn follow(&mut self, coord: Coord, map: &GameMap) {
        if self.to_screen(coord, map).is_some() {
            return;
        }
        self.x = coord.x;
        self.y = self.clamp_y(coord.y, map.height());
    }

    /// World tile under a screen cell, or `None` past a pole.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_world(&self, col: u16, row: u16, map: &GameMap) -> Option<Coord> {
        let w = i32::from(map.width());
        let x = (i32::from(self.x) - i32::from(self.width / 2) + i32::from(col)).rem_euclid(w);
        let y = i32::from(self.y) - i32::from(self.height / 2) + i32::from(row);
        (0..i32::from(map.height()))
            .contains(&y)
            .then(|| Coord::new(x as u16, y as u16))
    }

    /// Screen cell showing a world tile, or `None` if it is out of view.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_screen(&self, coord: Coord, map: &GameMap) -> Option<(u16, u16)> {
        let w = i32::from(map.width());
        let left = i32::from(self.x) - i32::from(self.width / 2);
        let top = i32::from(self.y) - i32::from(self.height / 2);
        let col = (i32::from(coord.x) - left).rem_euclid(w);
        let row = i32::from(coord.y) - top;
        let visible = col < i32::from(self.width) && (0..i32::from(self.height)).contains(&row);
        visible.then(|| (col as u16, row as u16))
    }
}

/// A cursor on the world grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Tile under the cursor.
    pub position: Coord,
}

impl Cursor {
    /// Move by `(dx, dy)`: columns wrap, rows stop at the poles.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn step(&mut self, dx: i32, dy: i32, map: &GameMap) {
        let x = (i32::from(self.position.x) + dx).rem_euclid(i32::from(map.width()));
        let y = (i32::from(self.position.y) + dy).clamp(0, i32::from(map.height()) - 1);
        self.position = Coord::new(x as u16, y as u16);
    }
}

/// A rendered grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    fn blank(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; usize::from(width) * usize::from(height)],
        }
    }

    /// Width in cells.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Cell at a screen position.
    #[must_use]
    pub fn get(&self, col: u16, row: u16) -> Option<Cell> {
        (col < self.width && row < self.height)
            .then(|| self.cells[usize::from(row) * usize::from(self.width) + usize::from(col)])
    }

    fn set(&mut self, col: u16, row: u16, cell: Cell) {
        if col < self.width && row < self.height {
            self.cells[usize::from(row) * usize::from(self.width) + usize::from(col)] = cell;
        }
    }

    /// Cells of one row.
    #[must_use]
    pub fn row(&self, row: u16) -> &[Cell] {
        if row >= self.height {
            return &[];
        }
        let start = usize::from(row) * usize::from(self.width);
        &self.cells[start..start + usize::from(self.width)]
    }
}

/// Terrain seen through a camera.
#[must_use]
pub fn terrain_frame(map: &GameMap, camera: &Camera) -> Frame {
    let mut frame = Frame::blank(camera.width, camera.height);
    for row in 0..camera.height {
        for col in 0..camera.width {
            if let Some(tile) = camera.to_world(col, row, map).and_then(|c| map.get(c)) {
                frame.set(
                    col,
                    row,
                    Cell {
                        glyph: tile.glyph(),
                        color: tile.color(),
                    },
                );
            }
        }
    }
    frame
}

/// Terrain, deposits and living units seen through a camera.
#[must_use]
pub fn session_frame(session: &GameSession, camera: &Camera) -> Frame {
    let map = session.map();
    let mut frame = terrain_frame(map, camera);
    for deposit in session.deposits() {
        if let Some((col, row)) = camera.to_screen(deposit.coord, map) {
            frame.set(
                col,
                row,
                Cell {
                    glyph: DEPOSIT_GLYPH,
                    color: DEPOSIT_COLOR,
                },
            );
        }
    }
    for unit in session.living_units() {
        if let Some((col, row)) = camera.to_screen(unit.position, map) {
            frame.set(
                col,
                row,
                Cell {
                    glyph: unit.kind.glyph(),
                    color: session.unit_color(unit),
                },
            );
        }
    }
    frame
}

/// One-line description of a tile for an info bar.
#[must_use]
pub fn tile_summary(map: &GameMap, coord: Coord) -> String {
    let Some(tile) = map.get(coord) else {
        return format!("Grid: {coord} | off the map");
    };
    let altitude = tile
        .altitude_m()
        .map_or_else(|| "sea level".to_string(), |m| format!("{m:.0} m"));
    format!(
        "Grid: {coord} | Lat: {:.2} | Long: {:.2} | Elevation: {altitude} | {}",
        tile.latitude(),
        tile.longitude(),
        tile.band().name()
    )
}

/// Render a frame as text with 24-bit ANSI colour codes.
#[must_use]
pub fn render_ansi(frame: &Frame) -> String {
    let mut out = String::with_capacity(frame.cells.len() * 20);
    for row in 0..frame.height {
        let mut current: Option<Rgb> = None;
        for cell in frame.row(row) {
            if cell.glyph != ' ' && current != Some(cell.color) {
                let Rgb { r, g, b } = cell.color;
                let _ = write!(out, "\x1b[38;2;{r};{g};{b}m");
                current = Some(cell.color);
            }
            out.push(cell.glyph);
        }
        out.push_str("\x1b[0m\n");
    }
    out
}

/// Render a frame as plain text.
#[must_use]
pub fn render_plain(frame: &Frame) -> String {
    let mut out = String::with_capacity(frame.cells.len() + usize::from(frame.height));
    for row in 0..frame.height {
        out.extend(frame.row(row).iter().map(|c| c.glyph));
        out.push('\n');
    }
    out
}
