use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cell::Cell;
use crate::config::LifeConfig;
use crate::patterns::Pattern;
use crate::stamp::resolve_stamp_coordinates;
use crate::topology::{neighbor_coords, Coord, Wrap};

/// The simulation grid: a fixed `rows × cols` block of cells in row-major order.
///
/// All mutation of cell state goes through methods on this type. Neighbor
/// links are resolved once and cached on each cell; changing the wrap policy
/// rebuilds them for the whole grid.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    wrap: Wrap,
}

impl Grid {
    /// Create a grid with every cell dead.
    pub fn new(rows: usize, cols: usize, wrap: Wrap) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be non-zero");

        let cells = (0..rows)
            .flat_map(|i| (0..cols).map(move |j| Cell::new(i, j, false)))
            .collect();
        let mut grid = Self {
            rows,
            cols,
            cells,
            wrap,
        };
        grid.link_neighbors();
        grid
    }

    /// Create a grid where each cell is alive with probability `density`.
    pub fn random<R: Rng>(
        rows: usize,
        cols: usize,
        wrap: Wrap,
        density: f64,
        rng: &mut R,
    ) -> Self {
        let mut grid = Self::new(rows, cols, wrap);
        grid.randomize(rng, density);
        grid
    }

    /// Build the initial grid described by `config`, seeding the draw when a
    /// seed is configured.
    pub fn from_config(config: &LifeConfig) -> Self {
        match config.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                Self::random(config.rows, config.cols, config.wrap, config.density, &mut rng)
            }
            None => Self::random(
                config.rows,
                config.cols,
                config.wrap,
                config.density,
                &mut rand::thread_rng(),
            ),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn wrap(&self) -> Wrap {
        self.wrap
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, i: usize, j: usize) -> Option<usize> {
        (i < self.rows && j < self.cols).then(|| i * self.cols + j)
    }

    pub fn cell(&self, i: usize, j: usize) -> Option<&Cell> {
        self.index(i, j).map(|idx| &self.cells[idx])
    }

    /// Whether `(i, j)` is alive. Out-of-range coordinates are dead.
    pub fn is_alive(&self, i: usize, j: usize) -> bool {
        self.cell(i, j).is_some_and(Cell::is_alive)
    }

    /// Cached neighbor coordinates of `(i, j)`, empty when out of range.
    pub fn neighbors(&self, i: usize, j: usize) -> Vec<Coord> {
        self.cell(i, j)
            .map(|cell| {
                cell.neighbor_indices()
                    .iter()
                    .map(|&n| self.cells[n].coord())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Iterate over the coordinates of every alive cell in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().filter(|c| c.is_alive()).map(Cell::coord)
    }

    /// Count live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Set a single cell. Out-of-range coordinates are ignored.
    pub fn toggle_cell(&mut self, i: usize, j: usize, alive: bool) {
        if let Some(idx) = self.index(i, j) {
            self.cells[idx].alive = alive;
        }
    }

    /// Kill every cell. Topology is left as is.
    pub fn clear_all(&mut self) {
        for cell in &mut self.cells {
            cell.alive = false;
        }
    }

    /// Redraw every cell alive with probability `density` (0.0 = empty, 1.0 = full).
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, density: f64) {
        assert!((0.0..=1.0).contains(&density), "density must be within 0..=1");
        for cell in &mut self.cells {
            cell.alive = rng.gen_bool(density);
        }
    }

    /// Switch the wrap policy and rebuild every neighbor link.
    pub fn set_wrap(&mut self, wrap: Wrap) {
        self.wrap = wrap;
        self.link_neighbors();
    }

    /// Stamp `pattern` centred on `anchor` under the grid's wrap policy.
    /// Returns the number of cells set alive.
    pub fn stamp(&mut self, pattern: &Pattern, anchor: Coord, mirror: bool) -> usize {
        let targets =
            resolve_stamp_coordinates(pattern, anchor, mirror, self.wrap, self.rows, self.cols);
        for target in &targets {
            self.toggle_cell(target.i, target.j, true);
        }
        log::debug!(
            "Stamped {} ({} cells) at ({}, {}){}",
            pattern.name(),
            targets.len(),
            anchor.i,
            anchor.j,
            if mirror { " mirrored" } else { "" }
        );
        targets.len()
    }

    /// Commit a full next-generation buffer. `next` must hold one entry per cell.
    pub(crate) fn commit(&mut self, next: &[bool]) {
        debug_assert_eq!(next.len(), self.cells.len());
        for (cell, &alive) in self.cells.iter_mut().zip(next) {
            cell.alive = alive;
        }
    }

    /// Resolve neighbor links for every cell. Runs after all cells exist.
    fn link_neighbors(&mut self) {
        let (rows, cols, wrap) = (self.rows, self.cols, self.wrap);
        for cell in &mut self.cells {
            cell.neighbors = neighbor_coords(rows, cols, cell.i(), cell.j(), wrap)
                .into_iter()
                .map(|c| c.i * cols + c.j)
                .collect();
        }
    }
}
