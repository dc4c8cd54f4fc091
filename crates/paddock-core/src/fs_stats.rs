//! Recursive directory statistics and human-readable size formatting.

use std::fs;
use std::path::Path;

/// File count and total byte size of a directory tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirStats {
    pub files: usize,
    pub bytes: u64,
}

/// Walk a directory recursively and sum file count and sizes.
/// Unreadable entries are skipped rather than failing the walk.
pub fn dir_stats(path: &Path) -> DirStats {
    let mut stats = DirStats::default();
    walk(path, &mut stats);
    stats
}

fn walk(path: &Path, stats: &mut DirStats) {
    if let Ok(entries) = fs::read_dir(path) {
        for entry in entries.flatten() {
            let p = entry.path();
            if p.is_dir() {
                walk(&p, stats);
            } else if let Ok(meta) = p.metadata() {
                stats.files += 1;
                stats.bytes += meta.len();
            }
        }
    }
}

/// Format byte size to a human-readable string.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_stats_counts_nested_files() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.bin"), [0u8; 10]).unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub").join("b.bin"), [0u8; 32]).unwrap();

        let stats = dir_stats(tmp.path());
        assert_eq!(stats.files, 2);
        assert_eq!(stats.bytes, 42);
    }

    #[test]
    fn dir_stats_on_missing_path_is_zero() {
        let stats = dir_stats(Path::new("/nonexistent/paddock-test"));
        assert_eq!(stats, DirStats::default());
    }

    #[test]
    fn format_size_picks_unit() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }
}
