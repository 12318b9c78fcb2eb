use crate::grid::Grid;

/// The standard B3/S23 rule.
///
/// A live cell survives with 2 or 3 live neighbors; a dead cell is born with
/// exactly 3.
pub fn next_state(alive: bool, alive_neighbors: usize) -> bool {
    matches!((alive, alive_neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Advance `grid` by one generation.
///
/// Every next state is computed from the pre-update grid before any is
/// written back.
pub fn advance(grid: &mut Grid) {
    let mut next = Vec::with_capacity(grid.cells().len());
    compute_next(grid, &mut next);
    grid.commit(&next);
}

fn compute_next(grid: &Grid, next: &mut Vec<bool>) {
    let cells = grid.cells();
    next.clear();
    next.extend(
        cells
            .iter()
            .map(|cell| next_state(cell.is_alive(), cell.alive_neighbors(cells))),
    );
}

/// Drives the grid forward, keeping a reusable next-generation buffer and a
/// generation counter.
#[derive(Debug, Default)]
pub struct Simulation {
    scratch: Vec<bool>,
    pub generation: u64,
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the grid by one generation.
    pub fn step(&mut self, grid: &mut Grid) {
        compute_next(grid, &mut self.scratch);
        grid.commit(&self.scratch);
        self.generation += 1;
        log::debug!("Generation {} (population {})", self.generation, grid.population());
    }

    /// Reset the generation counter (e.g. after clearing or randomizing).
    pub fn reset(&mut self) {
        self.generation = 0;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
