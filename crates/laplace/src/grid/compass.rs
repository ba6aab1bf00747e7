//! Directional convention: wall indices, signed steps and the
//! "next to wall" indices, all derived once from the grid size and orientation.
//!
//! Arrays are indexed `(east, north)`, i.e. the first index runs along the
//! east/west axis even though we speak of north first.

use super::types::Orientation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Compass {
    pub north: usize,
    pub south: usize,
    pub east: usize,
    pub west: usize,
    /// Add to a north-axis index to move one cell north.
    pub go_north: isize,
    pub go_south: isize,
    /// Add to an east-axis index to move one cell east.
    pub go_east: isize,
    pub go_west: isize,
    pub next_to_north: usize,
    pub next_to_south: usize,
    pub next_to_east: usize,
    pub next_to_west: usize,
}

impl Compass {
    /// Requires `nx >= 3` and `ny >= 3` (checked by `Grid`).
    pub fn new(nx: usize, ny: usize, orientation: Orientation) -> Self {
        let (go_north, north, south) = match orientation {
            Orientation::SouthIsZero => (1, ny - 1, 0),
            Orientation::NorthIsZero => (-1, 0, ny - 1),
        };
        let go_east = 1;
        let (east, west) = (nx - 1, 0);
        let go_south = -go_north;
        let go_west = -go_east;
        Self {
            north,
            south,
            east,
            west,
            go_north,
            go_south,
            go_east,
            go_west,
            next_to_north: step(north, go_south),
            next_to_south: step(south, go_north),
            next_to_east: step(east, go_west),
            next_to_west: step(west, go_east),
        }
    }

    /// The four corners as `(east, north)` index pairs: NW, SW, NE, SE.
    pub fn corners(&self) -> [(usize, usize); 4] {
        [
            (self.west, self.north),
            (self.west, self.south),
            (self.east, self.north),
            (self.east, self.south),
        ]
    }

    #[inline]
    pub fn is_corner(&self, x: usize, y: usize) -> bool {
        (x == self.west || x == self.east) && (y == self.south || y == self.north)
    }

    /// East-axis indices strictly between the west and east walls, walking east.
    pub fn east_interior(&self) -> impl Iterator<Item = usize> {
        walk(self.next_to_west, self.next_to_east, self.go_east)
    }

    /// North-axis indices strictly between the south and north walls, walking north.
    pub fn north_interior(&self) -> impl Iterator<Item = usize> {
        walk(self.next_to_south, self.next_to_north, self.go_north)
    }

    /// Every east-axis index, west wall to east wall inclusive.
    pub fn east_closed(&self) -> impl Iterator<Item = usize> {
        walk(self.west, self.east, self.go_east)
    }

    /// Every north-axis index, south wall to north wall inclusive.
    pub fn north_closed(&self) -> impl Iterator<Item = usize> {
        walk(self.south, self.north, self.go_north)
    }
}

#[inline]
pub(crate) fn step(i: usize, d: isize) -> usize {
    i.wrapping_add_signed(d)
}

/// Inclusive walk from `from` to `to` in unit steps of sign `d`.
fn walk(from: usize, to: usize, d: isize) -> impl Iterator<Item = usize> {
    let n = from.abs_diff(to) + 1;
    (0..n).map(move |k| step(from, d * k as isize))
}
