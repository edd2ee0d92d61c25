//! `<stem>.provenance.json` sidecars: which run produced an artifact and what
//! the artifact holds.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Kind of file an export writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// Full serde dump of the export tables.
    Json,
    /// C++ declarations for the renderer.
    Header,
    VertexTable,
    TriangleTable,
}

/// One written file.
#[derive(Clone, Debug, PartialEq)]
pub struct Artifact {
    pub path: PathBuf,
    pub kind: ArtifactKind,
    /// Row count for tables.
    pub rows: Option<usize>,
}

impl Artifact {
    pub fn file(path: impl Into<PathBuf>, kind: ArtifactKind) -> Self {
        Self {
            path: path.into(),
            kind,
            rows: None,
        }
    }

    pub fn table(path: impl Into<PathBuf>, kind: ArtifactKind, rows: usize) -> Self {
        Self {
            path: path.into(),
            kind,
            rows: Some(rows),
        }
    }
}

/// Write the sidecar for `artifact`: code revision, library version, the
/// export callsite, the artifact's kind, size and rows, and the run `params`.
#[track_caller]
pub fn write_sidecar(artifact: &Artifact, params: Value) -> Result<PathBuf> {
    let sidecar = provenance_path(&artifact.path);
    let bytes = fs::metadata(&artifact.path)
        .with_context(|| format!("reading size of {}", artifact.path.display()))?
        .len();
    let callsite = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "dodecaplex_version": dodecaplex::VERSION,
        "callsite": format!("{}:{}", callsite.file(), callsite.line()),
        "artifact": {
            "path": artifact.path.to_string_lossy(),
            "kind": artifact.kind,
            "bytes": bytes,
            "rows": artifact.rows,
        },
        "params": params,
    });
    fs::write(&sidecar, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    Ok(sidecar)
}

/// `run.vertices.csv` → `run.vertices.provenance.json`.
fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map_or_else(|| "artifact".into(), |s| s.to_string_lossy().into_owned());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`, else
/// `"unknown"`.
pub fn current_git_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .or_else(|| {
            Command::new("git")
                .args(["rev-parse", "HEAD"])
                .output()
                .ok()
                .filter(|output| output.status.success())
                .and_then(|output| String::from_utf8(output.stdout).ok())
                .map(|s| s.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
