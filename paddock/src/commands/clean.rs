//! `paddock clean`
//!
//! Removes the virtual environment and the version-pin file. The FastF1
//! data cache is deliberately left alone; `paddock cache clear` handles it.

use anyhow::Result;
use std::path::Path;

use paddock_core::fs_stats::{dir_stats, format_size};
use paddock_env::{builder, ProjectLayout};

use crate::observability;

pub fn cmd_clean(project_dir: &str, dry_run: bool) -> Result<()> {
    let layout = ProjectLayout::resolve(Path::new(project_dir));

    if dry_run {
        let env_exists = layout.env_dir.exists();
        let pin_exists = layout.pin_file.exists();
        if !env_exists && !pin_exists {
            eprintln!("Nothing to clean.");
            return Ok(());
        }
        if env_exists {
            let stats = dir_stats(&layout.env_dir);
            eprintln!(
                "Would remove {} ({}, {} files)",
                layout.env_dir.display(),
                format_size(stats.bytes),
                stats.files
            );
        }
        if pin_exists {
            eprintln!("Would remove {}", layout.pin_file.display());
        }
        eprintln!("(Dry run, no files removed. Drop --dry-run to delete.)");
        return Ok(());
    }

    let outcome = builder::clean(&layout)?;
    observability::ops_clean_completed(
        outcome.env_removed,
        outcome.pin_removed,
        outcome.bytes_freed,
    );

    if !outcome.env_removed && !outcome.pin_removed {
        eprintln!("Nothing to clean.");
    } else {
        if outcome.env_removed {
            eprintln!(
                "✓ Removed {} (freed {})",
                layout.env_dir.display(),
                format_size(outcome.bytes_freed)
            );
        }
        if outcome.pin_removed {
            eprintln!("✓ Removed {}", layout.pin_file.display());
        }
    }

    Ok(())
}
