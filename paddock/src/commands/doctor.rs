//! `paddock doctor`: read-only environment diagnosis.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use paddock_env::builder::{self, Freshness};
use paddock_env::{manifest, python, ProjectLayout};

/// One diagnostic check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub ok: bool,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorReport {
    pub ok: bool,
    pub checks: Vec<CheckResult>,
}

/// Run all checks. Exits non-zero (via the returned report) when any fails.
pub fn run_checks(layout: &ProjectLayout) -> DoctorReport {
    let mut checks = Vec::new();

    checks.push(match python::probe_interpreter(&layout.python_version) {
        Ok(resolved) => CheckResult {
            name: "interpreter",
            ok: true,
            detail: format!("Python {} at {}", resolved.version, resolved.path.display()),
        },
        Err(e) => CheckResult {
            name: "interpreter",
            ok: false,
            detail: e.to_string(),
        },
    });

    checks.push(match python::read_pin(&layout.pin_file) {
        Some(pin) if pin == layout.python_version => CheckResult {
            name: "version pin",
            ok: true,
            detail: format!("{} pins {}", layout.pin_file.display(), pin),
        },
        Some(pin) => CheckResult {
            name: "version pin",
            ok: false,
            detail: format!(
                "{} pins {} but configuration expects {}",
                layout.pin_file.display(),
                pin,
                layout.python_version
            ),
        },
        None => CheckResult {
            name: "version pin",
            ok: false,
            detail: format!("{} missing (run `paddock setup-env`)", layout.pin_file.display()),
        },
    });

    checks.push(match builder::freshness(layout) {
        Freshness::Fresh => CheckResult {
            name: "environment",
            ok: true,
            detail: format!("{} provisioned and up to date", layout.env_dir.display()),
        },
        Freshness::Stale => CheckResult {
            name: "environment",
            ok: false,
            detail: format!(
                "{} is stale: manifest changed since provisioning",
                layout.env_dir.display()
            ),
        },
        Freshness::Missing => CheckResult {
            name: "environment",
            ok: false,
            detail: format!(
                "{} not provisioned (run `paddock setup-env`)",
                layout.env_dir.display()
            ),
        },
    });

    checks.push(match manifest::load(&layout.requirements) {
        Ok(reqs) => CheckResult {
            name: "manifest",
            ok: true,
            detail: format!(
                "{} declares {} package(s)",
                layout.requirements.display(),
                reqs.len()
            ),
        },
        Err(e) => CheckResult {
            name: "manifest",
            ok: false,
            detail: e.to_string(),
        },
    });

    checks.push(if layout.entry_point.exists() {
        CheckResult {
            name: "entry point",
            ok: true,
            detail: layout.entry_point.display().to_string(),
        }
    } else {
        CheckResult {
            name: "entry point",
            ok: false,
            detail: format!("{} not found", layout.entry_point.display()),
        }
    });

    checks.push(if layout.server_binary().exists() {
        CheckResult {
            name: "server binary",
            ok: true,
            detail: layout.server_binary().display().to_string(),
        }
    } else {
        CheckResult {
            name: "server binary",
            ok: false,
            detail: format!(
                "{} not found in environment",
                layout.server_binary().display()
            ),
        }
    });

    let ok = checks.iter().all(|c| c.ok);
    DoctorReport { ok, checks }
}

pub fn cmd_doctor(project_dir: &str, json: bool) -> Result<i32> {
    let layout = ProjectLayout::resolve(Path::new(project_dir));
    let report = run_checks(&layout);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for check in &report.checks {
            let mark = if check.ok { "✓" } else { "✗" };
            eprintln!("{} {:<14} {}", mark, check.name, check.detail);
        }
        eprintln!();
        if report.ok {
            eprintln!("All checks passed.");
        } else {
            let failed = report.checks.iter().filter(|c| !c.ok).count();
            eprintln!("{} check(s) failed.", failed);
        }
    }

    Ok(if report.ok { 0 } else { 1 })
}
