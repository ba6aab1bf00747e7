//! Closed polygon with an odd-nodes (ray casting) containment test.
//!
//! The vertex list is implicitly closed: the edge from the last vertex back to
//! the first is part of the boundary. Nothing is validated; degenerate inputs
//! give whatever the crossing formula produces.

use nalgebra::Vector2;

/// Immutable polygon boundary used to carve regions into a `Grid`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Poly {
    points: Vec<Vector2<f64>>,
}

impl Poly {
    pub fn new(points: Vec<Vector2<f64>>) -> Self {
        Self { points }
    }

    /// Build from `[east, north]` pairs, integer or real.
    pub fn from_pairs<T>(pairs: &[[T; 2]]) -> Self
    where
        T: Copy + Into<f64>,
    {
        let points = pairs
            .iter()
            .map(|&[x, y]| Vector2::new(x.into(), y.into()))
            .collect();
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Vector2<f64>] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True if `(x, y)` lies inside (odd number of crossings west of the point).
    ///
    /// An edge crosses the scanline when one endpoint is strictly below `y` and
    /// the other is at or above it. Points exactly on an edge fall wherever this
    /// half-open rule puts them.
    pub fn inside(&self, x: f64, y: f64) -> bool {
        let Some(&last) = self.points.last() else {
            return false;
        };
        let mut odd_nodes = false;
        let mut pj = last;
        for &pi in &self.points {
            if (pi.y < y && pj.y >= y) || (pj.y < y && pi.y >= y) {
                // pi.y != pj.y here, so the division is safe.
                let x_cross = pi.x + (y - pi.y) / (pj.y - pi.y) * (pj.x - pi.x);
                if x_cross < x {
                    odd_nodes = !odd_nodes;
                }
            }
            pj = pi;
        }
        odd_nodes
    }
}
