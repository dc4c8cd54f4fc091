//! Dashboard data cache management.
//!
//! The dashboard keeps FastF1 API responses in a local cache directory
//! (`.fast-f1-cache/` by default) so revisiting a race does not re-download
//! timing data. This module inspects and clears that cache; it never writes
//! into it, only the dashboard process populates it.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::fs_stats::{dir_stats, format_size, DirStats};

/// Snapshot of the data cache state.
#[derive(Debug, Clone, Serialize)]
pub struct CacheReport {
    pub path: String,
    pub exists: bool,
    pub files: usize,
    pub bytes: u64,
}

impl CacheReport {
    /// One-line status in the dashboard's own phrasing.
    pub fn summary(&self) -> String {
        if !self.exists {
            "Cache status: Not yet created".to_string()
        } else if self.bytes == 0 {
            "Cache status: Directory exists but is empty".to_string()
        } else {
            format!(
                "Cache status: Active with {} files ({})",
                self.files,
                format_size(self.bytes)
            )
        }
    }
}

/// Outcome of a cache clear.
#[derive(Debug, Clone, Serialize)]
pub struct ClearOutcome {
    pub existed: bool,
    pub files_removed: usize,
    pub bytes_freed: u64,
}

/// Inspect the cache directory.
pub fn inspect(cache_dir: &Path) -> CacheReport {
    let exists = cache_dir.is_dir();
    let DirStats { files, bytes } = if exists {
        dir_stats(cache_dir)
    } else {
        DirStats::default()
    };
    CacheReport {
        path: cache_dir.display().to_string(),
        exists,
        files,
        bytes,
    }
}

/// Clear the cache directory. A missing directory is a no-op, not an error.
///
/// The directory itself is recreated empty so the dashboard can re-enable
/// its cache without a restart.
pub fn clear(cache_dir: &Path) -> Result<ClearOutcome> {
    if !cache_dir.is_dir() {
        return Ok(ClearOutcome {
            existed: false,
            files_removed: 0,
            bytes_freed: 0,
        });
    }

    let stats = dir_stats(cache_dir);
    fs::remove_dir_all(cache_dir)
        .with_context(|| format!("Remove cache directory {}", cache_dir.display()))?;
    fs::create_dir_all(cache_dir)
        .with_context(|| format!("Recreate cache directory {}", cache_dir.display()))?;

    tracing::info!(
        path = %cache_dir.display(),
        files = stats.files,
        bytes = stats.bytes,
        "Data cache cleared"
    );

    Ok(ClearOutcome {
        existed: true,
        files_removed: stats.files,
        bytes_freed: stats.bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspect_missing_dir_reports_not_created() {
        let tmp = tempfile::tempdir().unwrap();
        let report = inspect(&tmp.path().join("no-cache"));
        assert!(!report.exists);
        assert_eq!(report.files, 0);
        assert_eq!(report.summary(), "Cache status: Not yet created");
    }

    #[test]
    fn inspect_counts_cached_responses() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = tmp.path().join(".fast-f1-cache");
        fs::create_dir_all(cache.join("2024")).unwrap();
        fs::write(cache.join("2024").join("round_01.ff1pkl"), [0u8; 100]).unwrap();

        let report = inspect(&cache);
        assert!(report.exists);
        assert_eq!(report.files, 1);
        assert_eq!(report.bytes, 100);
        assert!(report.summary().contains("Active with 1 files"));
    }

    #[test]
    fn clear_is_idempotent_and_recreates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = tmp.path().join(".fast-f1-cache");
        fs::create_dir_all(&cache).unwrap();
        fs::write(cache.join("resp.json"), b"{}").unwrap();

        let outcome = clear(&cache).unwrap();
        assert!(outcome.existed);
        assert_eq!(outcome.files_removed, 1);
        assert!(cache.is_dir());

        // Second clear: directory exists but empty
        let outcome = clear(&cache).unwrap();
        assert!(outcome.existed);
        assert_eq!(outcome.files_removed, 0);

        // Clear of a never-created cache is a no-op
        let outcome = clear(&tmp.path().join("other")).unwrap();
        assert!(!outcome.existed);
    }
}
