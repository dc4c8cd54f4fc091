//! Config structs grouped by domain, loaded from the environment with
//! unified fallback logic.

use super::env_keys::{cache as cache_keys, observability as obv_keys, project as project_keys};
use super::loader::{env_bool, env_optional, env_or};

/// Default Python version pin for the dashboard runtime.
pub const DEFAULT_PYTHON_VERSION: &str = "3.11";

/// Project layout configuration: which files and directories the
/// provisioner and launcher operate on. All paths are relative to the
/// project directory.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Python version pin, e.g. "3.11" (any 3.11.x) or "3.11.9" (exact).
    pub python_version: String,
    /// Dashboard entry-point file.
    pub entry_point: String,
    /// Dependency manifest.
    pub requirements: String,
    /// Isolated environment directory.
    pub env_dir: String,
    /// Version-pin marker file.
    pub pin_file: String,
    /// Optional server port override.
    pub port: Option<u16>,
}

impl ProjectConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self {
            python_version: env_or(project_keys::PADDOCK_PYTHON_VERSION, &[], || {
                DEFAULT_PYTHON_VERSION.to_string()
            }),
            entry_point: env_or(project_keys::PADDOCK_ENTRY_POINT, &[], || {
                "Home.py".to_string()
            }),
            requirements: env_or(project_keys::PADDOCK_REQUIREMENTS, &[], || {
                "requirements.txt".to_string()
            }),
            env_dir: env_or(project_keys::PADDOCK_ENV_DIR, &[], || ".venv".to_string()),
            pin_file: ".python-version".to_string(),
            port: env_optional(project_keys::PADDOCK_PORT, &[])
                .and_then(|s| s.parse::<u16>().ok()),
        }
    }
}

/// Dashboard data cache configuration (FastF1 API responses).
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Cache directory, relative to the project directory unless absolute.
    pub data_cache_dir: String,
}

impl CacheConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self {
            data_cache_dir: env_or(
                cache_keys::PADDOCK_DATA_CACHE_DIR,
                cache_keys::DATA_CACHE_DIR_ALIASES,
                || ".fast-f1-cache".to_string(),
            ),
        }
    }
}

/// Observability configuration: quiet, log_level, log_json, ops_log.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
    /// JSONL operations log path, if enabled.
    pub ops_log: Option<String>,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| {
            super::loader::load_dotenv();
            let quiet = env_bool(obv_keys::PADDOCK_QUIET, obv_keys::QUIET_ALIASES, false);
            let log_level = env_or(
                obv_keys::PADDOCK_LOG_LEVEL,
                obv_keys::LOG_LEVEL_ALIASES,
                || "paddock=info".to_string(),
            );
            let log_json = env_bool(obv_keys::PADDOCK_LOG_JSON, obv_keys::LOG_JSON_ALIASES, false);
            let ops_log = env_optional(obv_keys::PADDOCK_OPS_LOG, &[]);
            Self {
                quiet,
                log_level,
                log_json,
                ops_log,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_config_defaults_match_dashboard_layout() {
        let cfg = ProjectConfig::from_env();
        assert_eq!(cfg.entry_point, "Home.py");
        assert_eq!(cfg.requirements, "requirements.txt");
        assert_eq!(cfg.env_dir, ".venv");
        assert_eq!(cfg.pin_file, ".python-version");
    }

    #[test]
    fn cache_config_defaults_to_fastf1_dir() {
        let cfg = CacheConfig::from_env();
        assert_eq!(cfg.data_cache_dir, ".fast-f1-cache");
    }
}
