//! Provenance sidecars: `plan.json` gets a `plan.provenance.json` next to it.

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct Callsite {
    pub file: &'static str,
    pub line: u32,
}

/// Provenance record for one CLI artifact (or none, for `pinplan provenance`).
#[derive(Serialize)]
pub struct Sidecar {
    pub code_rev: String,
    pub pinplan_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callsite: Option<Callsite>,
    /// Free-form case tag from `--tag`.
    pub tag: Option<String>,
    pub params: Value,
    pub outputs: Vec<String>,
}

impl Sidecar {
    pub fn new(params: Value, tag: Option<String>) -> Self {
        Self {
            code_rev: current_git_rev(),
            pinplan_version: pinplan::VERSION,
            callsite: None,
            tag,
            params,
            outputs: Vec::new(),
        }
    }

    /// Record the caller's location, then write the sidecar for `artifact`.
    #[track_caller]
    pub fn write_for(mut self, artifact: &Path) -> Result<PathBuf> {
        let here = Location::caller();
        self.callsite = Some(Callsite {
            file: here.file(),
            line: here.line(),
        });
        self.outputs = vec![artifact.display().to_string()];

        let path = sidecar_path(artifact);
        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(dir) = parent {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating provenance dir {}", dir.display()))?;
        }
        std::fs::write(&path, serde_json::to_vec_pretty(&self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), "provenance sidecar");
        Ok(path)
    }
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("artifact");
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// Build-time `GIT_COMMIT`, then runtime `GIT_COMMIT`, then `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn sidecar_path_replaces_extension() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/output/report.csv")),
            Path::new("/tmp/output/report.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("plan")),
            Path::new("plan.provenance.json")
        );
    }

    #[test]
    fn write_for_records_params_tag_and_callsite() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("plan.json");
        std::fs::write(&artifact, "{}").unwrap();
        let written = Sidecar::new(json!({"formation": "cross", "pins": 2}), Some("case-7".into()))
            .write_for(&artifact)
            .unwrap();
        assert_eq!(written, dir.path().join("plan.provenance.json"));

        let parsed: Value = serde_json::from_slice(&std::fs::read(written).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.display().to_string());
        assert_eq!(parsed["tag"], "case-7");
        assert_eq!(parsed["params"]["pins"], 2);
        assert_eq!(parsed["pinplan_version"], pinplan::VERSION);
        assert!(parsed["callsite"]["file"].as_str().unwrap().ends_with("provenance.rs"));
    }

    #[test]
    fn bare_block_has_no_outputs_or_callsite() {
        let v = serde_json::to_value(Sidecar::new(json!({}), None)).unwrap();
        assert!(v["outputs"].as_array().unwrap().is_empty());
        assert!(v.get("callsite").is_none());
        assert!(v["tag"].is_null());
        assert!(!v["code_rev"].as_str().unwrap().is_empty());
    }
}
