//! Small value types shared by the grid: orientation, wall names, solver
//! settings/report and the error enum.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Which end of the north axis holds index 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// South wall at index 0, north wall at `ny - 1`.
    #[default]
    SouthIsZero,
    /// North wall at index 0, south wall at `ny - 1`.
    NorthIsZero,
}

impl Orientation {
    pub fn from_south_is_zero(south_is_zero: bool) -> Self {
        if south_is_zero {
            Orientation::SouthIsZero
        } else {
            Orientation::NorthIsZero
        }
    }
}

/// One of the four boundary edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wall {
    North,
    South,
    East,
    West,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::North, Wall::South, Wall::East, Wall::West];
}

impl FromStr for Wall {
    type Err = GridError;

    /// Case-insensitive match on the first character only ("n", "North", "nope" all mean north).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('n') => Ok(Wall::North),
            Some('s') => Ok(Wall::South),
            Some('e') => Ok(Wall::East),
            Some('w') => Ok(Wall::West),
            _ => Err(GridError::UnknownWall(s.to_string())),
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Wall::North => "north",
            Wall::South => "south",
            Wall::East => "east",
            Wall::West => "west",
        };
        f.write_str(name)
    }
}

/// Convergence settings for `Grid::solve`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolveCfg {
    /// Stop once a sweep changes no cell by more than this.
    pub accuracy_v: f64,
    /// Hard cap on sweeps. At least one sweep always runs.
    pub max_iterations: usize,
}

impl Default for SolveCfg {
    fn default() -> Self {
        Self {
            accuracy_v: 0.1,
            max_iterations: 9,
        }
    }
}

impl SolveCfg {
    pub fn new(accuracy_v: f64, max_iterations: usize) -> Self {
        Self {
            accuracy_v,
            max_iterations,
        }
    }
}

/// Outcome of one `Grid::solve` call. Mirrors the state left on the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolveReport {
    pub iterations: usize,
    pub max_delta_v: f64,
    pub converged: bool,
}

/// Caller errors. Non-convergence is not one of them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error("grid must be 3x3 or larger (got {nx}x{ny})")]
    TooSmall { nx: usize, ny: usize },

    #[error("can't fix potential in the corner ({x}, {y})")]
    CornerFix { x: usize, y: usize },

    #[error("wall {0:?} not found, valid wall names are N,S,E,W (not case sensitive)")]
    UnknownWall(String),

    #[error("cell ({x}, {y}) is outside the {nx}x{ny} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        nx: usize,
        ny: usize,
    },
}
