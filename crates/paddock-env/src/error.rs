//! Structured errors for provisioning and launch.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("no usable Python interpreter found for pin {required} (install pyenv or a matching system python3)")]
    InterpreterNotFound { required: String },

    #[error("system Python {found} does not satisfy pin {required}")]
    VersionMismatch { required: String, found: String },

    #[error("{tool} exited unsuccessfully (code {}): {stderr}", .code.map_or_else(|| "signal".to_string(), |c| c.to_string()))]
    ToolFailed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("environment {env_dir} has not been provisioned (run `paddock setup-env` first)")]
    NotProvisioned { env_dir: PathBuf },

    #[error("environment {env_dir} is stale: manifest changed since provisioning (run `paddock setup-env` again)")]
    StaleEnvironment { env_dir: PathBuf },

    #[error("entry-point file {path} not found")]
    MissingEntryPoint { path: PathBuf },

    #[error("server executable {path} not found in environment")]
    MissingServerBinary { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
