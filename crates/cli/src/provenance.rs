//! `<log>.provenance.json` sidecars: code revision, run tag, the typed run
//! parameters and every file the run wrote.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Serialize)]
pub struct Provenance<'a, P> {
    pub code_rev: String,
    pub homology_version: &'static str,
    pub tag: Option<&'a str>,
    pub params: P,
    pub outputs: Vec<&'a Path>,
}

impl<'a, P: Serialize> Provenance<'a, P> {
    pub fn new(tag: Option<&'a str>, params: P) -> Self {
        Self {
            code_rev: code_rev(),
            homology_version: homology::VERSION,
            tag,
            params,
            outputs: Vec::new(),
        }
    }

    pub fn output(mut self, path: &'a Path) -> Self {
        self.outputs.push(path);
        self
    }

    /// Serialise next to `anchor`; returns the sidecar path.
    pub fn write_next_to(&self, anchor: &Path) -> Result<PathBuf> {
        let path = sidecar_path(anchor);
        let body = serde_json::to_vec_pretty(self)?;
        fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// `runs/betti.txt` → `runs/betti.provenance.json`.
pub fn sidecar_path(anchor: &Path) -> PathBuf {
    anchor.with_extension("provenance.json")
}

/// `GIT_COMMIT` if set, else `git rev-parse HEAD`, else `"unknown"`.
pub fn code_rev() -> String {
    std::env::var("GIT_COMMIT")
        .ok()
        .filter(|rev| !rev.is_empty())
        .or_else(|| {
            let out = Command::new("git")
                .args(["rev-parse", "HEAD"])
                .output()
                .ok()?;
            out.status
                .success()
                .then(|| String::from_utf8_lossy(&out.stdout).trim().to_owned())
        })
        .unwrap_or_else(|| "unknown".to_owned())
}
