//! Potential field on a rectangular grid with Dirichlet boundary conditions.
//!
//! Layout
//! - `v`: potentials, `nx × ny`, indexed `(east, north)`.
//! - `do_update`: `true` where relaxation may overwrite the cell, `false` where
//!   the potential is fixed by a boundary condition.
//!
//! Walls default to a fixed 0 V. Corners are never fixed directly: the
//! five-point stamp has no diagonal neighbours, so a corner value would never
//! reach the solution. Instead each corner is kept at the mean of its two
//! wall-adjacent neighbours and recomputed whenever a wall changes.
//!
//! Example `do_update` for a 3×5 region with every boundary fixed:
//! ```text
//! FFFFF
//! FTTTF
//! FFFFF
//! ```

mod compass;
mod solve;
mod types;

pub use types::{GridError, Orientation, SolveCfg, SolveReport, Wall};

use nalgebra::DMatrix;

use crate::poly::Poly;
use compass::Compass;

/// Relaxation grid: field, update mask, orientation, and last-solve state.
#[derive(Clone, Debug)]
pub struct Grid {
    nx: usize,
    ny: usize,
    orientation: Orientation,
    compass: Compass,
    v: DMatrix<f64>,
    do_update: DMatrix<bool>,
    max_delta_v: f64,
    iteration_count: usize,
    err_not_converged: bool,
}

impl Grid {
    /// `nx × ny` grid with the south wall at index 0.
    pub fn new(nx: usize, ny: usize) -> Result<Self, GridError> {
        Self::with_orientation(nx, ny, Orientation::SouthIsZero)
    }

    /// `nx × ny` grid with all four walls fixed at 0 V.
    pub fn with_orientation(
        nx: usize,
        ny: usize,
        orientation: Orientation,
    ) -> Result<Self, GridError> {
        if nx.min(ny) < 3 {
            return Err(GridError::TooSmall { nx, ny });
        }
        let mut grid = Self {
            nx,
            ny,
            orientation,
            compass: Compass::new(nx, ny, orientation),
            v: DMatrix::zeros(nx, ny),
            do_update: DMatrix::from_element(nx, ny, true),
            max_delta_v: 0.0,
            iteration_count: 0,
            err_not_converged: false,
        };
        for wall in Wall::ALL {
            grid.fix_wall_side(wall, 0.0);
        }
        Ok(grid)
    }

    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Full potential field, `(east, north)` indexed.
    #[inline]
    pub fn v(&self) -> &DMatrix<f64> {
        &self.v
    }

    /// Update mask; `true` = free to relax.
    #[inline]
    pub fn do_update(&self) -> &DMatrix<bool> {
        &self.do_update
    }

    /// Panics if `(x, y)` is out of range, like indexing the field directly.
    #[inline]
    pub fn potential(&self, x: usize, y: usize) -> f64 {
        self.v[(x, y)]
    }

    #[inline]
    pub fn is_updatable(&self, x: usize, y: usize) -> bool {
        self.do_update[(x, y)]
    }

    /// True if `(x, y)` is one of the four grid corners.
    #[inline]
    pub fn is_corner(&self, x: usize, y: usize) -> bool {
        self.compass.is_corner(x, y)
    }

    /// Largest change seen in the most recent sweep.
    #[inline]
    pub fn max_delta_v(&self) -> f64 {
        self.max_delta_v
    }

    /// Sweeps run by the last `solve`.
    #[inline]
    pub fn iteration_count(&self) -> usize {
        self.iteration_count
    }

    /// Set by `solve` when the cap was hit before reaching the accuracy.
    #[inline]
    pub fn err_not_converged(&self) -> bool {
        self.err_not_converged
    }

    /// Fix a whole wall by name: (n/N)orth, (s/S)outh, (e/E)ast, (w/W)est.
    ///
    /// Corners are recomputed on every call, including a call with an unknown
    /// name; the error is returned afterwards and no wall cell is touched.
    pub fn fix_wall(&mut self, wall: &str, v: f64) -> Result<(), GridError> {
        match wall.parse::<Wall>() {
            Ok(side) => {
                self.fix_wall_side(side, v);
                Ok(())
            }
            Err(err) => {
                self.update_corners();
                Err(err)
            }
        }
    }

    /// Fix every non-corner cell of `wall` at `v`, then recompute the corners.
    pub fn fix_wall_side(&mut self, wall: Wall, v: f64) {
        let c = self.compass;
        match wall {
            Wall::North | Wall::South => {
                let y = if wall == Wall::North { c.north } else { c.south };
                for x in c.east_interior() {
                    self.v[(x, y)] = v;
                    self.do_update[(x, y)] = false;
                }
            }
            Wall::East | Wall::West => {
                let x = if wall == Wall::East { c.east } else { c.west };
                for y in c.north_interior() {
                    self.v[(x, y)] = v;
                    self.do_update[(x, y)] = false;
                }
            }
        }
        tracing::debug!(%wall, v, "fix_wall");
        self.update_corners();
    }

    /// Set each corner to the mean of its two wall-adjacent neighbours.
    ///
    /// Corners are marked not-updatable; the stamp never visits them anyway.
    pub fn update_corners(&mut self) {
        let c = self.compass;
        for (x, y) in c.corners() {
            let along_ew = if x == c.west { c.next_to_west } else { c.next_to_east };
            let along_ns = if y == c.north { c.next_to_north } else { c.next_to_south };
            self.v[(x, y)] = 0.5 * (self.v[(along_ew, y)] + self.v[(x, along_ns)]);
            self.do_update[(x, y)] = false;
        }
    }

    /// Fix the potential of a single cell. Corners are rejected.
    pub fn fix_v(&mut self, x: usize, y: usize, v: f64) -> Result<(), GridError> {
        self.check_bounds(x, y)?;
        if self.is_corner(x, y) {
            return Err(GridError::CornerFix { x, y });
        }
        self.do_update[(x, y)] = false;
        self.v[(x, y)] = v;
        Ok(())
    }

    /// Let a previously fixed cell float again. Its value stays until the next sweep.
    pub fn float_v(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        self.check_bounds(x, y)?;
        self.do_update[(x, y)] = true;
        Ok(())
    }

    /// Fix every cell inside `poly` (walls and corners included) at `v`.
    ///
    /// Returns the number of cells fixed.
    pub fn fix_poly(&mut self, poly: &Poly, v: f64) -> usize {
        let c = self.compass;
        let mut count = 0usize;
        for x in c.east_closed() {
            for y in c.north_closed() {
                if poly.inside(x as f64, y as f64) {
                    self.v[(x, y)] = v;
                    self.do_update[(x, y)] = false;
                    count += 1;
                }
            }
        }
        tracing::debug!(vertices = poly.len(), v, cells = count, "fix_poly");
        count
    }

    /// Let every interior cell inside `poly` float again. Values are left as they are.
    ///
    /// Returns the number of cells released.
    pub fn float_poly(&mut self, poly: &Poly) -> usize {
        let c = self.compass;
        let mut count = 0usize;
        for x in c.east_interior() {
            for y in c.north_interior() {
                if poly.inside(x as f64, y as f64) {
                    self.do_update[(x, y)] = true;
                    count += 1;
                }
            }
        }
        tracing::debug!(vertices = poly.len(), cells = count, "float_poly");
        count
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), GridError> {
        if x >= self.nx || y >= self.ny {
            return Err(GridError::OutOfBounds {
                x,
                y,
                nx: self.nx,
                ny: self.ny,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
