/// A grid coordinate: row `i`, column `j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub i: usize,
    pub j: usize,
}

impl Coord {
    pub const fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((i, j): (usize, usize)) -> Self {
        Self { i, j }
    }
}

/// How the grid treats its edges when resolving neighbors and placing patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wrap {
    /// Edges are hard walls: edge cells have fewer than 8 neighbors.
    #[default]
    Bounded,
    /// Edges connect to the opposite edge: every cell has 8 neighbors.
    Toroidal,
}

impl Wrap {
    pub fn from_toroidal(toroidal: bool) -> Self {
        if toroidal {
            Wrap::Toroidal
        } else {
            Wrap::Bounded
        }
    }

    pub fn is_toroidal(self) -> bool {
        self == Wrap::Toroidal
    }

    pub fn toggled(self) -> Self {
        match self {
            Wrap::Bounded => Wrap::Toroidal,
            Wrap::Toroidal => Wrap::Bounded,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Wrap::Bounded => "bounded",
            Wrap::Toroidal => "toroidal",
        }
    }
}

/// Moore neighborhood offsets in scan order (row-major, centre excluded).
const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Wrap a possibly out-of-range index into `0..len`.
///
/// `-1` maps to `len - 1` and `len` maps to `0`; larger excursions wrap as many
/// times as needed.
pub fn wrap_index(value: i64, len: usize) -> usize {
    value.rem_euclid(len as i64) as usize
}

/// Map `value` into `0..len` under the given policy, or `None` if a bounded
/// grid has no such index.
pub fn resolve_index(value: i64, len: usize, wrap: Wrap) -> Option<usize> {
    match wrap {
        Wrap::Toroidal => Some(wrap_index(value, len)),
        Wrap::Bounded => (0..len as i64).contains(&value).then_some(value as usize),
    }
}

/// Resolve the Moore neighbors of `(i, j)` on a `rows × cols` grid.
///
/// Bounded grids omit offsets that fall outside the grid; toroidal grids wrap
/// every offset, so the result always holds 8 entries.
pub fn neighbor_coords(rows: usize, cols: usize, i: usize, j: usize, wrap: Wrap) -> Vec<Coord> {
    MOORE_OFFSETS
        .iter()
        .filter_map(|&(di, dj)| {
            let ci = resolve_index(i as i64 + di, rows, wrap)?;
            let cj = resolve_index(j as i64 + dj, cols, wrap)?;
            Some(Coord::new(ci, cj))
        })
        .collect()
}
