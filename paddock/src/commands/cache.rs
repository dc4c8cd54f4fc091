//! `paddock cache status` / `paddock cache clear`
//!
//! The dashboard caches FastF1 API responses locally so revisiting a race
//! does not re-download timing data. These commands mirror the cache panel
//! the dashboard itself shows on its home page.

use anyhow::Result;
use std::path::Path;

use paddock_core::data_cache;
use paddock_core::fs_stats::format_size;
use paddock_env::ProjectLayout;

use crate::observability;

pub fn cmd_status(project_dir: &str, json: bool) -> Result<()> {
    let layout = ProjectLayout::resolve(Path::new(project_dir));
    let report = data_cache::inspect(&layout.data_cache_dir);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        eprintln!("Cache directory: {}", report.path);
        eprintln!("{}", report.summary());
    }
    Ok(())
}

pub fn cmd_clear(project_dir: &str) -> Result<()> {
    let layout = ProjectLayout::resolve(Path::new(project_dir));
    let outcome = data_cache::clear(&layout.data_cache_dir)?;
    observability::ops_cache_cleared(outcome.files_removed, outcome.bytes_freed);

    if !outcome.existed {
        eprintln!("Cache directory does not exist.");
    } else if outcome.files_removed == 0 {
        eprintln!("Cache already empty.");
    } else {
        eprintln!(
            "✓ Cache cleared: {} file(s), freed {}",
            outcome.files_removed,
            format_size(outcome.bytes_freed)
        );
    }
    Ok(())
}
