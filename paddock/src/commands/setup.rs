//! `paddock setup-env`

use anyhow::Result;
use std::path::Path;
use std::time::Instant;

use paddock_env::builder;
use paddock_env::python::InterpreterSource;
use paddock_env::ProjectLayout;

use crate::observability;

pub fn cmd_setup(project_dir: &str, force: bool) -> Result<()> {
    let layout = ProjectLayout::resolve(Path::new(project_dir));

    eprintln!(
        "Provisioning dashboard runtime (Python {}) in {}",
        layout.python_version,
        layout.env_dir.display()
    );

    let start = Instant::now();
    let outcome = builder::provision(&layout, force)?;
    let duration_ms = start.elapsed().as_millis() as u64;

    observability::ops_provision_completed(
        &outcome.python_version,
        outcome.packages,
        outcome.reused,
        duration_ms,
    );

    let source = match outcome.source {
        InterpreterSource::Pyenv => "pyenv",
        InterpreterSource::System => "system",
    };
    if outcome.reused {
        eprintln!(
            "✓ Environment already up to date (Python {} via {}, {} packages)",
            outcome.python_version, source, outcome.packages
        );
    } else {
        eprintln!(
            "✓ Environment ready: Python {} via {}, {} package(s) installed",
            outcome.python_version, source, outcome.packages
        );
        eprintln!("  Pin recorded in {}", layout.pin_file.display());
    }
    eprintln!("  Run `paddock start` to launch the dashboard.");

    Ok(())
}
