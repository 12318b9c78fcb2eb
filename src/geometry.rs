use crate::topology::Coord;

/// Lays the grid out in world space: cell `(i, j)` covers
/// `[j * cell_width, (j + 1) * cell_width) × [i * cell_height, (i + 1) * cell_height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub rows: usize,
    pub cols: usize,
    pub cell_width: f32,
    pub cell_height: f32,
}

impl GridGeometry {
    pub fn new(rows: usize, cols: usize, cell_width: f32, cell_height: f32) -> Self {
        assert!(cell_width > 0.0 && cell_height > 0.0, "cell size must be positive");
        Self {
            rows,
            cols,
            cell_width,
            cell_height,
        }
    }

    /// Total width in world units.
    pub fn width(&self) -> f32 {
        self.cols as f32 * self.cell_width
    }

    /// Total height in world units.
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_height
    }

    /// Map a world-space point to the cell under it, or `None` off the grid.
    pub fn cell_at(&self, world_x: f32, world_y: f32) -> Option<Coord> {
        let (w, h) = (self.width(), self.height());
        if !(0.0..w).contains(&world_x) || !(0.0..h).contains(&world_y) {
            return None;
        }
        let i = ((world_y / h) * self.rows as f32).floor() as usize;
        let j = ((world_x / w) * self.cols as f32).floor() as usize;
        // float rounding can land exactly on the far edge
        Some(Coord::new(i.min(self.rows - 1), j.min(self.cols - 1)))
    }

    /// Top-left world position of a cell.
    pub fn cell_origin(&self, coord: Coord) -> (f32, f32) {
        (
            coord.j as f32 * self.cell_width,
            coord.i as f32 * self.cell_height,
        )
    }

    /// World position of the grid centre.
    pub fn center(&self) -> (f32, f32) {
        (self.width() / 2.0, self.height() / 2.0)
    }
}
