//! Helpers for row-major tile grids.

/// Split a row-major sequence into rows of `width` cells.
///
/// The last row is short if `flat` is not a whole number of rows; callers
/// check the shape. A zero width yields no rows.
pub fn rows<T>(flat: &[T], width: usize) -> Vec<&[T]> {
    if width == 0 {
        return Vec::new();
    }
    flat.chunks(width).collect()
}

/// Apply `f` to every cell, keeping the row/column shape. Stops at the
/// first error.
pub fn map_grid<T, R, E, Row>(
    grid: &[Row],
    mut f: impl FnMut(&T) -> Result<R, E>,
) -> Result<Vec<Vec<R>>, E>
where
    Row: AsRef<[T]>,
{
    grid.iter()
        .map(|row| row.as_ref().iter().map(&mut f).collect::<Result<Vec<R>, E>>())
        .collect()
}
