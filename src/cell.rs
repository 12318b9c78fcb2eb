use crate::topology::Coord;

/// A single grid unit.
///
/// Neighbors are stored as row-major indices into the owning grid's cell
/// vector rather than as references, so the grid stays the sole owner of
/// every cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    i: usize,
    j: usize,
    pub(crate) alive: bool,
    pub(crate) neighbors: Vec<usize>,
}

impl Cell {
    pub(crate) fn new(i: usize, j: usize, alive: bool) -> Self {
        Self {
            i,
            j,
            alive,
            neighbors: Vec::with_capacity(8),
        }
    }

    pub fn i(&self) -> usize {
        self.i
    }

    pub fn j(&self) -> usize {
        self.j
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.i, self.j)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Flat indices of this cell's neighbors.
    pub fn neighbor_indices(&self) -> &[usize] {
        &self.neighbors
    }

    /// Count alive neighbors by looking up the cached links in `cells`.
    pub fn alive_neighbors(&self, cells: &[Cell]) -> usize {
        self.neighbors.iter().filter(|&&n| cells[n].alive).count()
    }
}
