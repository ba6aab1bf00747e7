//! JSON scenario files: grid size, orientation, boundary conditions and solve settings.
//!
//! Boundary conditions are applied in this order: walls, polygons, points.
//! Within each list, entries apply in file order, so later entries win.
//! A polygon or point without `v` is floated instead of fixed.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use laplace::{Grid, GridError, Orientation, Poly, SolveCfg};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub nx: usize,
    pub ny: usize,
    #[serde(default = "default_south_is_zero")]
    pub south_is_zero: bool,
    #[serde(default)]
    pub walls: Vec<WallSpec>,
    #[serde(default)]
    pub polygons: Vec<PolySpec>,
    #[serde(default)]
    pub points: Vec<PointSpec>,
    #[serde(default)]
    pub solve: SolveSpec,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WallSpec {
    pub wall: String,
    pub v: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PolySpec {
    pub points: Vec<[f64; 2]>,
    #[serde(default)]
    pub v: Option<f64>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PointSpec {
    pub x: usize,
    pub y: usize,
    #[serde(default)]
    pub v: Option<f64>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SolveSpec {
    #[serde(default = "default_accuracy_v")]
    pub accuracy_v: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for SolveSpec {
    fn default() -> Self {
        let cfg = SolveCfg::default();
        Self {
            accuracy_v: cfg.accuracy_v,
            max_iterations: cfg.max_iterations,
        }
    }
}

fn default_south_is_zero() -> bool {
    true
}

fn default_accuracy_v() -> f64 {
    SolveCfg::default().accuracy_v
}

fn default_max_iterations() -> usize {
    SolveCfg::default().max_iterations
}

impl Scenario {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        let scenario: Scenario = serde_json::from_str(&text)
            .with_context(|| format!("parsing scenario {}", path.display()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Checks the grid cannot enforce itself (solve settings, polygon sizes).
    pub fn validate(&self) -> Result<()> {
        if !(self.solve.accuracy_v.is_finite() && self.solve.accuracy_v >= 0.0) {
            bail!("accuracy_v must be a finite, non-negative number");
        }
        if self.solve.max_iterations == 0 {
            bail!("max_iterations must be at least 1");
        }
        for (i, p) in self.polygons.iter().enumerate() {
            if p.points.len() < 3 {
                bail!("polygon {i} has {} vertices, needs at least 3", p.points.len());
            }
        }
        Ok(())
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_south_is_zero(self.south_is_zero)
    }

    pub fn cfg(&self) -> SolveCfg {
        SolveCfg::new(self.solve.accuracy_v, self.solve.max_iterations)
    }

    /// Build a fresh grid with every boundary condition applied.
    pub fn build(&self) -> Result<Grid, GridError> {
        let mut grid = Grid::with_orientation(self.nx, self.ny, self.orientation())?;
        for w in &self.walls {
            grid.fix_wall(&w.wall, w.v)?;
        }
        for p in &self.polygons {
            let poly = Poly::from_pairs(&p.points);
            match p.v {
                Some(v) => grid.fix_poly(&poly, v),
                None => grid.float_poly(&poly),
            };
        }
        for p in &self.points {
            match p.v {
                Some(v) => grid.fix_v(p.x, p.y, v)?,
                None => grid.float_v(p.x, p.y)?,
            }
        }
        Ok(grid)
    }
}
