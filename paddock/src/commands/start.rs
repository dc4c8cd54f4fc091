//! `paddock start`

use anyhow::Result;
use std::path::Path;
use std::time::Instant;

use paddock_env::{launcher, ProjectLayout};

use crate::observability;

/// Launch the dashboard server in the foreground. Returns the server's
/// exit code so `main` can mirror it.
pub fn cmd_start(project_dir: &str, port: Option<u16>) -> Result<i32> {
    let mut layout = ProjectLayout::resolve(Path::new(project_dir));
    if port.is_some() {
        layout.port = port;
    }

    observability::ops_launch_started(
        layout.entry_point.display().to_string().as_str(),
        layout.port,
    );
    eprintln!("Starting dashboard: {}", layout.entry_point.display());

    let start = Instant::now();
    let exit_code = launcher::run(&layout)?;
    let duration_ms = start.elapsed().as_millis() as u64;

    observability::ops_launch_exited(exit_code, duration_ms);
    if exit_code != 0 {
        tracing::warn!(exit_code, "Dashboard server exited with an error");
    }

    Ok(exit_code)
}
