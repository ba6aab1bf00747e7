//! Field export in long form: one row per cell with `x, y, v, fixed`.
//!
//! `.parquet` paths are written as Parquet, anything else as CSV.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use laplace::Grid;
use polars::prelude::*;

/// Long-form frame of the grid, x fastest.
pub fn field_frame(grid: &Grid) -> Result<DataFrame> {
    let n = grid.nx() * grid.ny();
    let mut xs: Vec<u32> = Vec::with_capacity(n);
    let mut ys: Vec<u32> = Vec::with_capacity(n);
    let mut vs: Vec<f64> = Vec::with_capacity(n);
    let mut fixed: Vec<bool> = Vec::with_capacity(n);
    for y in 0..grid.ny() {
        for x in 0..grid.nx() {
            xs.push(x as u32);
            ys.push(y as u32);
            vs.push(grid.potential(x, y));
            fixed.push(!grid.is_updatable(x, y));
        }
    }
    let df = df!(
        "x" => xs,
        "y" => ys,
        "v" => vs,
        "fixed" => fixed
    )?;
    Ok(df)
}

pub fn write_field<P: AsRef<Path>>(grid: &Grid, out: P) -> Result<()> {
    let out = out.as_ref();
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let mut df = field_frame(grid)?;
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    let is_parquet = out.extension().is_some_and(|e| e == "parquet");
    if is_parquet {
        ParquetWriter::new(&mut file)
            .finish(&mut df)
            .with_context(|| format!("writing {}", out.display()))?;
    } else {
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .with_context(|| format!("writing {}", out.display()))?;
    }
    tracing::info!(out = %out.display(), rows = df.height(), "field_written");
    Ok(())
}
