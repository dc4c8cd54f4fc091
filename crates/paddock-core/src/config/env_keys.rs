//! Environment variable key constants.
//!
//! All keys use the `PADDOCK_` prefix. Alias slots exist so downstream
//! wrappers can register compatibility names without touching call sites.

/// Project layout: interpreter pin, entry point, manifest, env directory.
pub mod project {
    /// Python version pin, e.g. "3.11" or "3.11.9".
    pub const PADDOCK_PYTHON_VERSION: &str = "PADDOCK_PYTHON_VERSION";

    /// Dashboard entry-point file handed to the server.
    pub const PADDOCK_ENTRY_POINT: &str = "PADDOCK_ENTRY_POINT";

    /// Dependency manifest path, relative to the project directory.
    pub const PADDOCK_REQUIREMENTS: &str = "PADDOCK_REQUIREMENTS";

    /// Isolated environment directory, relative to the project directory.
    pub const PADDOCK_ENV_DIR: &str = "PADDOCK_ENV_DIR";

    /// Dashboard server port (passed to `streamlit run --server.port`).
    pub const PADDOCK_PORT: &str = "PADDOCK_PORT";
}

/// Dashboard data cache (FastF1 API responses).
pub mod cache {
    pub const PADDOCK_DATA_CACHE_DIR: &str = "PADDOCK_DATA_CACHE_DIR";
    pub const DATA_CACHE_DIR_ALIASES: &[&str] = &[];
}

/// Observability and logging.
pub mod observability {
    pub const PADDOCK_QUIET: &str = "PADDOCK_QUIET";
    pub const QUIET_ALIASES: &[&str] = &[];

    pub const PADDOCK_LOG_LEVEL: &str = "PADDOCK_LOG_LEVEL";
    pub const LOG_LEVEL_ALIASES: &[&str] = &[];

    pub const PADDOCK_LOG_JSON: &str = "PADDOCK_LOG_JSON";
    pub const LOG_JSON_ALIASES: &[&str] = &[];

    /// JSONL operations log (provision / launch / clean events).
    pub const PADDOCK_OPS_LOG: &str = "PADDOCK_OPS_LOG";
}
