//! Curated surface for callers that shape boundary conditions and read fields.
//!
//! Plotting and scenario runners sit on top of this; they only need to build a
//! grid, fix potentials, solve, and read back the field and solver state.

pub use crate::grid::{Grid, GridError, Orientation, SolveCfg, SolveReport, Wall};
pub use crate::poly::Poly;

use nalgebra::DMatrix;

/// Build a grid, apply `setup`, solve with `cfg`, and hand back the grid.
///
/// Convenience for one-shot callers; errors from `setup` are propagated untouched.
pub fn solve_scenario<F>(
    nx: usize,
    ny: usize,
    orientation: Orientation,
    cfg: SolveCfg,
    setup: F,
) -> Result<(Grid, SolveReport), GridError>
where
    F: FnOnce(&mut Grid) -> Result<(), GridError>,
{
    let mut grid = Grid::with_orientation(nx, ny, orientation)?;
    setup(&mut grid)?;
    let report = grid.solve(cfg);
    Ok((grid, report))
}

/// Flatten a field into `(x, y, v)` triples in column-major order (x fastest).
pub fn field_triples(v: &DMatrix<f64>) -> Vec<(usize, usize, f64)> {
    let mut out = Vec::with_capacity(v.len());
    for y in 0..v.ncols() {
        for x in 0..v.nrows() {
            out.push((x, y, v[(x, y)]));
        }
    }
    out
}
