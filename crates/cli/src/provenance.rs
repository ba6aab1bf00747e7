use anyhow::{Context, Result};
use laplace::SolveReport;
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an exported field: the scenario parameters and the solve outcome.
pub struct Payload {
    pub params: Value,
    pub solve: Option<SolveReport>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            solve: None,
        }
    }

    pub fn with_solve(mut self, report: SolveReport) -> Self {
        self.solve = Some(report);
        self
    }
}

pub fn report_json(report: &SolveReport) -> Value {
    json!({
        "iterations": report.iterations,
        "max_delta_v": report.max_delta_v,
        "converged": report.converged,
    })
}

/// Write `<artifact>.provenance.json` with the code revision, params, solve report and outputs.
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let doc = json!({
        "code_rev": current_git_rev(),
        "laplace_version": laplace::VERSION,
        "params": payload.params,
        "solve": payload.solve.as_ref().map(report_json),
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    let mut name = stem;
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_rewrites_extension() {
        let base = Path::new("/tmp/output/field.csv");
        let derived = provenance_path(base);
        assert_eq!(derived, Path::new("/tmp/output/field.provenance.json"));
    }

    #[test]
    fn sidecar_records_solve_report() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("field.csv");
        fs::write(&artifact, "x,y,v,fixed\n").unwrap();
        let report = SolveReport {
            iterations: 4,
            max_delta_v: 0.05,
            converged: true,
        };
        let payload = Payload::new(json!({"nx": 5})).with_solve(report);
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["solve"]["iterations"], 4);
        assert_eq!(parsed["solve"]["converged"], true);
        assert_eq!(parsed["params"]["nx"], 5);
    }
}
