use crate::patterns::Pattern;
use crate::topology::{resolve_index, Coord, Wrap};

/// Horizontally mirrored copy of a pattern matrix (each row reversed).
pub fn mirrored(matrix: &[Vec<u8>]) -> Vec<Vec<u8>> {
    matrix
        .iter()
        .map(|row| row.iter().rev().copied().collect())
        .collect()
}

/// Compute where `pattern` lands when its centre is placed on `anchor`.
///
/// The centre is `(rows / 2, cols / 2)` of the (optionally mirrored) matrix.
/// Only `1` entries produce coordinates. Targets off a bounded grid are
/// dropped; on a toroidal grid they wrap to the opposite edge. Results are in
/// row-major order over the matrix.
///
/// Used both for committing a stamp and for the non-destructive preview.
pub fn resolve_stamp_coordinates(
    pattern: &Pattern,
    anchor: Coord,
    mirror: bool,
    wrap: Wrap,
    rows: usize,
    cols: usize,
) -> Vec<Coord> {
    let flipped;
    let matrix: &[Vec<u8>] = if mirror {
        flipped = mirrored(pattern.matrix());
        &flipped
    } else {
        pattern.matrix()
    };

    let center_row = (pattern.rows() / 2) as i64;
    let center_col = (pattern.cols() / 2) as i64;
    let (ai, aj) = (anchor.i as i64, anchor.j as i64);

    let mut targets = Vec::with_capacity(pattern.population());
    for (r, row) in matrix.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            if value == 0 {
                continue;
            }
            let ti = resolve_index(ai + r as i64 - center_row, rows, wrap);
            let tj = resolve_index(aj + c as i64 - center_col, cols, wrap);
            if let (Some(i), Some(j)) = (ti, tj) {
                targets.push(Coord::new(i, j));
            }
        }
    }
    targets
}
