//! Launch the dashboard server from the isolated environment.
//!
//! `start` is a plain blocking foreground run: no supervision, no restarts.
//! The tool's exit code mirrors the server process's.

use std::path::PathBuf;
use std::process::Command;

use crate::builder;
use crate::error::EnvError;
use crate::layout::ProjectLayout;

/// Everything needed to spawn the server process. Built separately from the
/// spawn so preconditions and environment assembly are testable without a
/// live Python toolchain.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Variables set on the child (PATH with the env bin dir prepended,
    /// VIRTUAL_ENV).
    pub env: Vec<(String, String)>,
    /// Variables removed from the child (PYTHONHOME would shadow the venv).
    pub env_removed: Vec<String>,
    pub cwd: PathBuf,
}

impl LaunchPlan {
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).current_dir(&self.cwd);
        for (k, v) in &self.env {
            cmd.env(k, v);
        }
        for k in &self.env_removed {
            cmd.env_remove(k);
        }
        cmd
    }
}

/// Build the launch plan, verifying the environment is provisioned and
/// fresh, the entry point exists, and the server binary is installed.
pub fn plan(layout: &ProjectLayout) -> Result<LaunchPlan, EnvError> {
    builder::ensure_fresh(layout)?;

    if !layout.entry_point.exists() {
        return Err(EnvError::MissingEntryPoint {
            path: layout.entry_point.clone(),
        });
    }
    let server = layout.server_binary();
    if !server.exists() {
        return Err(EnvError::MissingServerBinary { path: server });
    }

    let mut args = vec!["run".to_string(), layout.entry_point.display().to_string()];
    if let Some(port) = layout.port {
        args.push("--server.port".to_string());
        args.push(port.to_string());
    }

    let bin_dir = layout.env_bin_dir();
    let path_value = match std::env::var_os("PATH") {
        Some(existing) => {
            let mut paths = vec![bin_dir.clone()];
            paths.extend(std::env::split_paths(&existing));
            std::env::join_paths(paths)
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|_| bin_dir.display().to_string())
        }
        None => bin_dir.display().to_string(),
    };

    Ok(LaunchPlan {
        program: server,
        args,
        env: vec![
            ("PATH".to_string(), path_value),
            (
                "VIRTUAL_ENV".to_string(),
                layout.env_dir.display().to_string(),
            ),
        ],
        env_removed: vec!["PYTHONHOME".to_string()],
        cwd: layout.root.clone(),
    })
}

/// Run the server in the foreground and return its exit code
/// (128 + signal number when killed by a signal on Unix).
pub fn run(layout: &ProjectLayout) -> Result<i32, EnvError> {
    let plan = plan(layout)?;
    tracing::info!(
        program = %plan.program.display(),
        args = ?plan.args,
        "Starting dashboard server"
    );

    let status = plan.to_command().status()?;
    Ok(exit_code(status))
}

fn exit_code(status: std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{env_fingerprint, Stamp, STAMP_FILE};
    use paddock_core::config::{CacheConfig, ProjectConfig};
    use std::path::Path;

    fn test_layout(root: &Path, port: Option<u16>) -> ProjectLayout {
        ProjectLayout::from_configs(
            root,
            &ProjectConfig {
                python_version: "3.11".to_string(),
                entry_point: "Home.py".to_string(),
                requirements: "requirements.txt".to_string(),
                env_dir: ".venv".to_string(),
                pin_file: ".python-version".to_string(),
                port,
            },
            &CacheConfig {
                data_cache_dir: ".fast-f1-cache".to_string(),
            },
        )
    }

    fn fake_provisioned(layout: &ProjectLayout, with_server: bool) {
        std::fs::create_dir_all(layout.env_bin_dir()).unwrap();
        std::fs::write(layout.env_python(), "").unwrap();
        if with_server {
            std::fs::write(layout.server_binary(), "").unwrap();
        }
        let manifest = "streamlit==1.35.0\n";
        std::fs::write(&layout.requirements, manifest).unwrap();
        std::fs::write(&layout.entry_point, "").unwrap();
        let stamp = Stamp {
            fingerprint: env_fingerprint(manifest, "3.11.9"),
            python_version: "3.11.9".to_string(),
            packages: 1,
            created_at: chrono::Utc::now(),
        };
        std::fs::write(
            layout.env_dir.join(STAMP_FILE),
            serde_json::to_string(&stamp).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn plan_fails_without_provisioning() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = test_layout(tmp.path(), None);
        assert!(matches!(
            plan(&layout),
            Err(EnvError::NotProvisioned { .. })
        ));
    }

    #[test]
    fn plan_fails_without_entry_point() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = test_layout(tmp.path(), None);
        fake_provisioned(&layout, true);
        std::fs::remove_file(&layout.entry_point).unwrap();
        assert!(matches!(
            plan(&layout),
            Err(EnvError::MissingEntryPoint { .. })
        ));
    }

    #[test]
    fn plan_fails_without_server_binary() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = test_layout(tmp.path(), None);
        fake_provisioned(&layout, false);
        assert!(matches!(
            plan(&layout),
            Err(EnvError::MissingServerBinary { .. })
        ));
    }

    #[test]
    fn plan_assembles_venv_environment() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = test_layout(tmp.path(), Some(8502));
        fake_provisioned(&layout, true);

        let plan = plan(&layout).unwrap();
        assert_eq!(plan.program, layout.server_binary());
        assert_eq!(plan.args[0], "run");
        assert!(plan.args[1].ends_with("Home.py"));
        assert_eq!(plan.args[2], "--server.port");
        assert_eq!(plan.args[3], "8502");
        assert_eq!(plan.cwd, layout.root);

        let path = plan
            .env
            .iter()
            .find(|(k, _)| k == "PATH")
            .map(|(_, v)| v.clone())
            .unwrap();
        assert!(path.starts_with(&layout.env_bin_dir().display().to_string()));
        let virtual_env = plan
            .env
            .iter()
            .find(|(k, _)| k == "VIRTUAL_ENV")
            .map(|(_, v)| v.clone())
            .unwrap();
        assert_eq!(virtual_env, layout.env_dir.display().to_string());
        assert!(plan.env_removed.contains(&"PYTHONHOME".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn run_propagates_child_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = test_layout(tmp.path(), None);
        fake_provisioned(&layout, true);

        // Replace the fake server binary with a script that exits 3
        std::fs::write(layout.server_binary(), "#!/bin/sh\nexit 3\n").unwrap();
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(
            layout.server_binary(),
            std::fs::Permissions::from_mode(0o755),
        )
        .unwrap();

        assert_eq!(run(&layout).unwrap(), 3);
    }
}
