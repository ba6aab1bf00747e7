//! Finite-difference relaxation of Laplace's equation on a rectangular grid.
//!
//! Two pieces do all the work:
//! - `poly::Poly`: closed polygon with an odd-nodes containment test, used to
//!   carve fixed-potential regions into a grid.
//! - `grid::Grid`: potential field plus update mask, wall/point/polygon
//!   boundary conditions, the five-point stamp and the convergence loop.
//!
//! Written for readability, not speed: one full in-place sweep per iteration,
//! no acceleration.

pub mod api;
pub mod grid;
pub mod poly;

pub use grid::{Grid, GridError, Orientation, SolveCfg, SolveReport, Wall};
pub use poly::Poly;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::grid::{Grid, GridError, Orientation, SolveCfg, SolveReport, Wall};
    pub use crate::poly::Poly;
    pub use nalgebra::{DMatrix, Vector2 as Vec2};
}
