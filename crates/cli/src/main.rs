use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod export;
mod provenance;
mod scenario;

use provenance::{report_json, write_sidecar, Payload};
use scenario::Scenario;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Run Laplace relaxation scenarios and export the fields")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve a scenario and write the field (CSV, or Parquet by extension)
    Solve {
        #[arg(long)]
        scenario: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Solve the same scenario with caps 1..=max and write one field per cap
    Evolve {
        #[arg(long)]
        scenario: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
        #[arg(long, default_value_t = 51)]
        max: usize,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Solve { scenario, out } => solve(&scenario, &out),
        Action::Evolve {
            scenario,
            out_dir,
            max,
        } => evolve(&scenario, &out_dir, max),
        Action::Report => report(),
    }
}

fn solve(scenario_path: &Path, out: &Path) -> Result<()> {
    tracing::info!(scenario = %scenario_path.display(), out = %out.display(), "solve");
    let scenario = Scenario::from_path(scenario_path)?;
    let mut grid = scenario
        .build()
        .with_context(|| format!("building grid from {}", scenario_path.display()))?;
    let report = grid.solve(scenario.cfg());
    if !report.converged {
        tracing::warn!(
            iterations = report.iterations,
            max_delta_v = report.max_delta_v,
            "not_converged"
        );
    }
    export::write_field(&grid, out)?;
    let params = serde_json::json!({
        "scenario": scenario_path.to_string_lossy(),
        "grid": &scenario,
    });
    write_sidecar(out, Payload::new(params).with_solve(report))?;
    Ok(())
}

fn evolve(scenario_path: &Path, out_dir: &Path, max: usize) -> Result<()> {
    tracing::info!(scenario = %scenario_path.display(), out_dir = %out_dir.display(), max, "evolve");
    let scenario = Scenario::from_path(scenario_path)?;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output dir {}", out_dir.display()))?;
    let mut steps = Vec::with_capacity(max);
    for cap in 1..=max {
        let mut grid = scenario
            .build()
            .with_context(|| format!("building grid from {}", scenario_path.display()))?;
        let mut cfg = scenario.cfg();
        cfg.max_iterations = cap;
        let report = grid.solve(cfg);
        let out = out_dir.join(format!("evo_cap_{cap:03}.csv"));
        export::write_field(&grid, &out)?;
        tracing::info!(cap, iterations = report.iterations, "evolve_step");
        let mut step = report_json(&report);
        step["cap"] = cap.into();
        step["out"] = out.to_string_lossy().into();
        steps.push(step);
    }
    let summary = serde_json::json!({
        "scenario": scenario_path.to_string_lossy(),
        "steps": steps,
    });
    let summary_path = out_dir.join("evolution.json");
    fs::write(&summary_path, serde_json::to_vec_pretty(&summary)?)
        .with_context(|| format!("writing {}", summary_path.display()))?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "laplace_version": laplace::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
