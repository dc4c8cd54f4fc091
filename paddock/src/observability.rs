//! Observability: tracing init and the JSONL operations log.
//!
//! Uses `ObservabilityConfig` for PADDOCK_QUIET, PADDOCK_LOG_LEVEL,
//! PADDOCK_LOG_JSON, and PADDOCK_OPS_LOG.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use paddock_core::config::ObservabilityConfig;
use serde_json::json;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Initialize tracing. Call at process startup.
/// When PADDOCK_QUIET=1, only WARN and above are logged.
pub fn init_tracing() {
    let cfg = ObservabilityConfig::from_env();
    let level: String = if cfg.quiet {
        "paddock=warn".to_string()
    } else {
        cfg.log_level.clone()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    };
}

fn ops_log_path() -> Option<String> {
    let path = ObservabilityConfig::from_env().ops_log.clone()?;
    if path.is_empty() {
        return None;
    }
    if let Some(parent) = Path::new(&path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    Some(path)
}

fn append_jsonl(path: &str, record: &serde_json::Value) {
    if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(path) {
        if let Ok(line) = serde_json::to_string(record) {
            let _ = writeln!(f, "{}", line);
        }
    }
}

fn ops_event(event: &str, mut fields: serde_json::Value) {
    if let Some(path) = ops_log_path() {
        if let Some(obj) = fields.as_object_mut() {
            obj.insert(
                "ts".to_string(),
                json!(Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
            );
            obj.insert("event".to_string(), json!(event));
        }
        append_jsonl(&path, &fields);
    }
}

/// Ops: provisioning completed (or reused an up-to-date environment).
pub fn ops_provision_completed(
    python_version: &str,
    packages: usize,
    reused: bool,
    duration_ms: u64,
) {
    ops_event(
        "provision_completed",
        json!({
            "python_version": python_version,
            "packages": packages,
            "reused": reused,
            "duration_ms": duration_ms,
        }),
    );
}

/// Ops: dashboard server spawned.
pub fn ops_launch_started(entry_point: &str, port: Option<u16>) {
    ops_event(
        "launch_started",
        json!({
            "entry_point": entry_point,
            "port": port,
        }),
    );
}

/// Ops: dashboard server exited.
pub fn ops_launch_exited(exit_code: i32, duration_ms: u64) {
    ops_event(
        "launch_exited",
        json!({
            "exit_code": exit_code,
            "duration_ms": duration_ms,
        }),
    );
}

/// Ops: clean completed.
pub fn ops_clean_completed(env_removed: bool, pin_removed: bool, bytes_freed: u64) {
    ops_event(
        "clean_completed",
        json!({
            "env_removed": env_removed,
            "pin_removed": pin_removed,
            "bytes_freed": bytes_freed,
        }),
    );
}

/// Ops: data cache cleared.
pub fn ops_cache_cleared(files_removed: usize, bytes_freed: u64) {
    ops_event(
        "cache_cleared",
        json!({
            "files_removed": files_removed,
            "bytes_freed": bytes_freed,
        }),
    );
}
