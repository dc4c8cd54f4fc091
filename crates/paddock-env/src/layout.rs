//! Resolved project layout: absolute paths for everything the provisioner
//! and launcher touch.

use paddock_core::config::{CacheConfig, ProjectConfig};
use std::path::{Path, PathBuf};

/// Absolute paths derived from [`ProjectConfig`] and a project directory.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    /// Project root directory.
    pub root: PathBuf,
    /// Isolated environment directory (`.venv/`).
    pub env_dir: PathBuf,
    /// Version-pin marker file (`.python-version`).
    pub pin_file: PathBuf,
    /// Dependency manifest (`requirements.txt`).
    pub requirements: PathBuf,
    /// Dashboard entry-point file (`Home.py`).
    pub entry_point: PathBuf,
    /// Dashboard data cache directory (`.fast-f1-cache/`).
    pub data_cache_dir: PathBuf,
    /// Python version pin.
    pub python_version: String,
    /// Optional server port override.
    pub port: Option<u16>,
}

impl ProjectLayout {
    /// Resolve the layout for a project directory from the environment config.
    pub fn resolve(project_dir: &Path) -> Self {
        Self::from_configs(project_dir, &ProjectConfig::from_env(), &CacheConfig::from_env())
    }

    /// Resolve the layout from explicit configs (test seam).
    pub fn from_configs(project_dir: &Path, project: &ProjectConfig, cache: &CacheConfig) -> Self {
        let root = project_dir.to_path_buf();
        let join = |p: &str| {
            let path = Path::new(p);
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                root.join(path)
            }
        };
        Self {
            env_dir: join(&project.env_dir),
            pin_file: join(&project.pin_file),
            requirements: join(&project.requirements),
            entry_point: join(&project.entry_point),
            data_cache_dir: join(&cache.data_cache_dir),
            python_version: project.python_version.clone(),
            port: project.port,
            root,
        }
    }

    /// The environment's executable directory (`bin/` on Unix, `Scripts/` on Windows).
    pub fn env_bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.env_dir.join("Scripts")
        } else {
            self.env_dir.join("bin")
        }
    }

    /// Path of the environment's Python interpreter.
    pub fn env_python(&self) -> PathBuf {
        if cfg!(windows) {
            self.env_bin_dir().join("python.exe")
        } else {
            self.env_bin_dir().join("python")
        }
    }

    /// Path of the dashboard server executable inside the environment.
    pub fn server_binary(&self) -> PathBuf {
        if cfg!(windows) {
            self.env_bin_dir().join("streamlit.exe")
        } else {
            self.env_bin_dir().join("streamlit")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_configs() -> (ProjectConfig, CacheConfig) {
        (
            ProjectConfig {
                python_version: "3.11".to_string(),
                entry_point: "Home.py".to_string(),
                requirements: "requirements.txt".to_string(),
                env_dir: ".venv".to_string(),
                pin_file: ".python-version".to_string(),
                port: None,
            },
            CacheConfig {
                data_cache_dir: ".fast-f1-cache".to_string(),
            },
        )
    }

    #[test]
    fn relative_paths_are_rooted_at_project_dir() {
        let (project, cache) = test_configs();
        let layout = ProjectLayout::from_configs(Path::new("/srv/f1"), &project, &cache);
        assert_eq!(layout.env_dir, Path::new("/srv/f1/.venv"));
        assert_eq!(layout.entry_point, Path::new("/srv/f1/Home.py"));
        assert_eq!(layout.data_cache_dir, Path::new("/srv/f1/.fast-f1-cache"));
    }

    #[test]
    fn absolute_overrides_are_kept() {
        let (mut project, cache) = test_configs();
        project.env_dir = "/var/envs/f1".to_string();
        let layout = ProjectLayout::from_configs(Path::new("/srv/f1"), &project, &cache);
        assert_eq!(layout.env_dir, Path::new("/var/envs/f1"));
    }

    #[cfg(unix)]
    #[test]
    fn env_binaries_live_under_bin() {
        let (project, cache) = test_configs();
        let layout = ProjectLayout::from_configs(Path::new("/srv/f1"), &project, &cache);
        assert_eq!(layout.env_python(), Path::new("/srv/f1/.venv/bin/python"));
        assert_eq!(layout.server_binary(), Path::new("/srv/f1/.venv/bin/streamlit"));
    }
}
