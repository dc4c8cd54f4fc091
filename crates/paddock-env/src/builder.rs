//! Build the isolated Python environment: venv creation, dependency
//! installation, and the provisioning stamp.
//!
//! The stamp is written only after `pip install` succeeds, so an environment
//! directory without a valid stamp is treated as an incomplete provisioning
//! run and never launched from.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::process::Command;

use crate::error::EnvError;
use crate::layout::ProjectLayout;
use crate::manifest;
use crate::python::{self, InterpreterSource};
use paddock_core::fs_stats::dir_stats;

/// Stamp file name inside the environment directory.
pub const STAMP_FILE: &str = ".paddock-stamp.json";

/// Provisioning stamp: what the environment was built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stamp {
    /// Fingerprint over manifest content and interpreter version.
    pub fingerprint: String,
    /// Full interpreter version used, e.g. "3.11.9".
    pub python_version: String,
    /// Number of manifest entries installed.
    pub packages: usize,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisionOutcome {
    pub python_version: String,
    pub source: InterpreterSource,
    pub packages: usize,
    /// True when the existing environment already matched the manifest and
    /// was left untouched.
    pub reused: bool,
}

/// Freshness of an existing environment against the current manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// No environment, or no stamp (incomplete provisioning).
    Missing,
    /// Stamp fingerprint no longer matches the manifest.
    Stale,
    Fresh,
}

/// Fingerprint over manifest content and interpreter version.
pub fn env_fingerprint(manifest_content: &str, python_version: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(manifest_content.as_bytes());
    hasher.update(b"\0");
    hasher.update(python_version.as_bytes());
    hex::encode(hasher.finalize())
}

/// Read the stamp, if the environment carries one.
pub fn read_stamp(env_dir: &Path) -> Option<Stamp> {
    let content = std::fs::read_to_string(env_dir.join(STAMP_FILE)).ok()?;
    serde_json::from_str(&content).ok()
}

fn write_stamp(env_dir: &Path, stamp: &Stamp) -> Result<()> {
    let path = env_dir.join(STAMP_FILE);
    let content = serde_json::to_string_pretty(stamp).context("Serialize stamp")?;
    std::fs::write(&path, content).with_context(|| format!("Write stamp {}", path.display()))?;
    Ok(())
}

/// Whether the environment exists and completed provisioning.
pub fn is_provisioned(layout: &ProjectLayout) -> bool {
    layout.env_python().exists() && read_stamp(&layout.env_dir).is_some()
}

/// Classify the environment against the current manifest.
pub fn freshness(layout: &ProjectLayout) -> Freshness {
    if !layout.env_python().exists() {
        return Freshness::Missing;
    }
    let Some(stamp) = read_stamp(&layout.env_dir) else {
        return Freshness::Missing;
    };
    // Manifest gone: nothing to compare against, keep the environment usable
    let Ok(content) = std::fs::read_to_string(&layout.requirements) else {
        return Freshness::Fresh;
    };
    if stamp.fingerprint == env_fingerprint(&content, &stamp.python_version) {
        Freshness::Fresh
    } else {
        Freshness::Stale
    }
}

/// Launch precondition: provisioned and not stale.
pub fn ensure_fresh(layout: &ProjectLayout) -> Result<(), EnvError> {
    match freshness(layout) {
        Freshness::Missing => Err(EnvError::NotProvisioned {
            env_dir: layout.env_dir.clone(),
        }),
        Freshness::Stale => Err(EnvError::StaleEnvironment {
            env_dir: layout.env_dir.clone(),
        }),
        Freshness::Fresh => Ok(()),
    }
}

/// Provision the environment: resolve the pinned interpreter, record the
/// pin, build the venv, install the manifest, stamp.
///
/// Steps run sequentially; the first failure propagates and later steps do
/// not run. No rollback of earlier side effects.
pub fn provision(layout: &ProjectLayout, force: bool) -> Result<ProvisionOutcome> {
    let manifest_content = std::fs::read_to_string(&layout.requirements)
        .with_context(|| format!("Read manifest {}", layout.requirements.display()))?;
    let packages = manifest::parse_requirements(&manifest_content).len();

    let resolved = python::resolve_interpreter(&layout.python_version)?;
    let fingerprint = env_fingerprint(&manifest_content, &resolved.version);

    if !force {
        if let Some(stamp) = read_stamp(&layout.env_dir) {
            if layout.env_python().exists() && stamp.fingerprint == fingerprint {
                tracing::info!(
                    env_dir = %layout.env_dir.display(),
                    "Environment up to date, skipping rebuild"
                );
                return Ok(ProvisionOutcome {
                    python_version: resolved.version,
                    source: resolved.source,
                    packages: stamp.packages,
                    reused: true,
                });
            }
        }
    }

    python::write_pin(&layout.pin_file, &layout.python_version)?;

    if force && layout.env_dir.exists() {
        std::fs::remove_dir_all(&layout.env_dir)
            .with_context(|| format!("Remove environment {}", layout.env_dir.display()))?;
    }

    tracing::info!(
        interpreter = %resolved.path.display(),
        version = %resolved.version,
        "Creating virtual environment"
    );
    let out = Command::new(&resolved.path)
        .arg("-m")
        .arg("venv")
        .arg(&layout.env_dir)
        .current_dir(&layout.root)
        .output()
        .context("Create venv")?;
    if !out.status.success() {
        return Err(EnvError::ToolFailed {
            tool: "python -m venv".to_string(),
            code: out.status.code(),
            stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        }
        .into());
    }

    tracing::info!(packages, "Installing dependencies");
    let out = Command::new(layout.env_python())
        .args(["-m", "pip", "install", "-r"])
        .arg(&layout.requirements)
        .current_dir(&layout.root)
        .output()
        .context("pip install")?;
    if !out.status.success() {
        return Err(EnvError::ToolFailed {
            tool: "pip install".to_string(),
            code: out.status.code(),
            stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        }
        .into());
    }

    let stamp = Stamp {
        fingerprint,
        python_version: resolved.version.clone(),
        packages,
        created_at: Utc::now(),
    };
    write_stamp(&layout.env_dir, &stamp)?;

    Ok(ProvisionOutcome {
        python_version: resolved.version,
        source: resolved.source,
        packages,
        reused: false,
    })
}

/// Outcome of a clean run.
#[derive(Debug, Clone, Copy)]
pub struct CleanOutcome {
    pub env_removed: bool,
    pub pin_removed: bool,
    pub bytes_freed: u64,
}

/// Remove the environment directory and the pin file. Idempotent: absent
/// targets are not an error.
pub fn clean(layout: &ProjectLayout) -> Result<CleanOutcome, EnvError> {
    let mut outcome = CleanOutcome {
        env_removed: false,
        pin_removed: false,
        bytes_freed: 0,
    };

    if layout.env_dir.exists() {
        outcome.bytes_freed = dir_stats(&layout.env_dir).bytes;
        std::fs::remove_dir_all(&layout.env_dir)?;
        outcome.env_removed = true;
    }
    outcome.pin_removed = python::remove_pin(&layout.pin_file)?;

    tracing::info!(
        env_removed = outcome.env_removed,
        pin_removed = outcome.pin_removed,
        bytes_freed = outcome.bytes_freed,
        "Clean completed"
    );
    Ok(outcome)
}
