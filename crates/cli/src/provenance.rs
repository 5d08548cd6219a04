//! `<stem>.provenance.json` sidecars for files the CLI writes.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an artefact: subcommand, its parameters, and its inputs.
pub struct Payload {
    pub command: &'static str,
    pub params: Value,
    pub inputs: Vec<String>,
    pub tag: Option<String>,
}

impl Payload {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self {
            command,
            params,
            inputs: Vec::new(),
            tag: None,
        }
    }

    pub fn with_input(mut self, input: impl AsRef<Path>) -> Self {
        self.inputs
            .push(input.as_ref().to_string_lossy().into_owned());
        self
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    billiards_version: &'static str,
    command: &'static str,
    tag: Option<&'a str>,
    callsite: Callsite,
    params: &'a Value,
    inputs: &'a [String],
    outputs: Vec<String>,
}

/// Write the sidecar next to `artifact`; returns its path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: &Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let sidecar_path = provenance_path(artifact);
    if let Some(parent) = sidecar_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let doc = Sidecar {
        code_rev: current_git_rev(),
        billiards_version: billiards::VERSION,
        command: payload.command,
        tag: payload.tag.as_deref(),
        callsite: Callsite {
            file: callsite.file(),
            line: callsite.line(),
        },
        params: &payload.params,
        inputs: &payload.inputs,
        outputs: vec![artifact.to_string_lossy().into_owned()],
    };
    fs::write(&sidecar_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar_path.display()))?;
    tracing::info!(sidecar = %sidecar_path.display(), "provenance written");
    Ok(sidecar_path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Commit of the running build: `GIT_COMMIT` at compile time, then at run
/// time, then `git rev-parse HEAD`, else `"unknown"`.
pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return rev.to_string();
    }
    if let Ok(rev) = std::env::var("GIT_COMMIT") {
        if !rev.is_empty() {
            return rev;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
