//! Rasterises a map and an optional path into a `0RGB` pixel buffer.

use robonav_core::{MapSpec, Point, Result};
use robonav_search::Step;

/// What occupies one grid cell on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Free,
    Agent,
    Goal,
    Wall,
    Path,
}

impl Tile {
    /// Pixel colour, as `0x00RRGGBB`.
    pub const fn color(self) -> u32 {
        match self {
            Tile::Free => 0xFF_FF_FF,  // white
            Tile::Agent => 0xFF_00_00, // red
            Tile::Goal => 0x32_CD_32,  // lime green
            Tile::Wall => 0x80_80_80,  // gray
            Tile::Path => 0x1E_90_FF,  // dodger blue
        }
    }
}

/// Colour between and around tiles.
pub const BACKGROUND: u32 = 0x00_00_80; // navy

/// A map laid out as tiles, ready to draw at any scale.
#[derive(Debug, Clone)]
pub struct MapCanvas {
    cols: usize,
    rows: usize,
    tiles: Vec<Tile>,
}

impl MapCanvas {
    /// Lay out `spec`. Fails if the map dimensions are invalid.
    pub fn new(spec: &MapSpec) -> Result<Self> {
        let grid = spec.grid()?;
        let mut canvas = Self {
            cols: grid.width() as usize,
            rows: grid.height() as usize,
            tiles: grid
                .bounds()
                .iter()
                .map(|p| if grid.is_blocked(p) { Tile::Wall } else { Tile::Free })
                .collect(),
        };
        for &g in &spec.goals {
            canvas.set(g, Tile::Goal);
        }
        canvas.set(spec.start, Tile::Agent);
        Ok(canvas)
    }

    /// Highlight `cells` as path. Walls, goals and the agent keep their
    /// colour.
    pub fn with_path(mut self, cells: &[Point]) -> Self {
        for &p in cells {
            if self.tile(p) == Some(Tile::Free) {
                self.set(p, Tile::Path);
            }
        }
        self
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn tile(&self, p: Point) -> Option<Tile> {
        self.index(p).map(|i| self.tiles[i])
    }

    /// Largest square cell that fits `width` x `height` pixels, at least 1.
    pub fn fit_cell_size(&self, width: usize, height: usize) -> usize {
        (width / self.cols.max(1)).min(height / self.rows.max(1)).max(1)
    }

    /// Paint the canvas into `buf`, a row-major `width` x `height` pixel
    /// buffer, scaled to fit. Tiles of four pixels or more get a one pixel
    /// gap so the grid lines show.
    pub fn draw(&self, buf: &mut [u32], width: usize, height: usize) {
        buf.fill(BACKGROUND);
        let cell = self.fit_cell_size(width, height);
        let gap = usize::from(cell >= 4);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let color = self.tiles[row * self.cols + col].color();
                let (x0, y0) = (col * cell, row * cell);
                for y in y0..(y0 + cell - gap).min(height) {
                    let line = y * width;
                    let x1 = (x0 + cell - gap).min(width);
                    if x0 < x1 && line + x1 <= buf.len() {
                        buf[line + x0..line + x1].fill(color);
                    }
                }
            }
        }
    }

    fn index(&self, p: Point) -> Option<usize> {
        let (x, y) = (usize::try_from(p.x).ok()?, usize::try_from(p.y).ok()?);
        (x < self.cols && y < self.rows).then_some(y * self.cols + x)
    }

    fn set(&mut self, p: Point, tile: Tile) {
        if let Some(i) = self.index(p) {
            self.tiles[i] = tile;
        }
    }
}

/// Every cell a path covers, starting with `start`. A jump covers the cells
/// it passes over as well as the one it lands on.
pub fn trace_cells(start: Point, steps: &[Step]) -> Vec<Point> {
    let mut cells = vec![start];
    let mut at = start;
    for step in steps {
        for _ in 0..step.cells() {
            at = at.step(step.direction, 1);
            cells.push(at);
        }
    }
    cells
}
