//! Python interpreter discovery and version-pin handling.
//!
//! Resolution order matches the Makefile the tool replaces: a pyenv-managed
//! interpreter for the pinned version (installed on demand), then a system
//! `python3`/`python` whose version satisfies the pin.

use crate::error::EnvError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Where the interpreter came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpreterSource {
    Pyenv,
    System,
}

/// A usable interpreter for the pinned version.
#[derive(Debug, Clone)]
pub struct ResolvedInterpreter {
    pub path: PathBuf,
    /// Full reported version, e.g. "3.11.9".
    pub version: String,
    pub source: InterpreterSource,
}

/// Extract the version from `python --version` output ("Python 3.11.9").
pub fn parse_version(output: &str) -> Option<String> {
    let token = output.trim().strip_prefix("Python")?.trim();
    let version: String = token
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if version.is_empty() {
        None
    } else {
        Some(version)
    }
}

/// Whether a reported version satisfies a pin.
///
/// A pin of "3.11" accepts any 3.11.x; a full "3.11.9" requires the exact
/// version. Components are compared numerically so "3.1" never matches
/// "3.10.x".
pub fn satisfies_pin(found: &str, pin: &str) -> bool {
    let found: Vec<Option<u32>> = found.split('.').map(|c| c.parse().ok()).collect();
    let pin: Vec<Option<u32>> = pin.split('.').map(|c| c.parse().ok()).collect();
    if pin.len() > found.len() {
        return false;
    }
    pin.iter()
        .zip(found.iter())
        .all(|(p, f)| p.is_some() && p == f)
}

/// Resolve an interpreter for the pin. Pyenv wins when present; otherwise a
/// matching system interpreter. No match is a structured error.
pub fn resolve_interpreter(pin: &str) -> Result<ResolvedInterpreter, EnvError> {
    if let Some(resolved) = pyenv_interpreter(pin, true)? {
        tracing::info!(
            version = %resolved.version,
            path = %resolved.path.display(),
            "Using pyenv interpreter"
        );
        return Ok(resolved);
    }
    system_interpreter(pin)
}

/// Read-only resolution for diagnostics: never installs anything. A pyenv
/// pin that is not installed falls through to the system interpreter.
pub fn probe_interpreter(pin: &str) -> Result<ResolvedInterpreter, EnvError> {
    match pyenv_interpreter(pin, false) {
        Ok(Some(resolved)) => return Ok(resolved),
        Ok(None) | Err(_) => {}
    }
    system_interpreter(pin)
}

/// Try to resolve via pyenv: install the pin if absent (when `install` is
/// set), then ask pyenv for the version's prefix. Returns `Ok(None)` when
/// pyenv is not on PATH.
fn pyenv_interpreter(pin: &str, install: bool) -> Result<Option<ResolvedInterpreter>, EnvError> {
    let pyenv = match which::which("pyenv") {
        Ok(p) => p,
        Err(_) => return Ok(None),
    };

    if install {
        let out = Command::new(&pyenv)
            .args(["install", "--skip-existing", pin])
            .output()?;
        if !out.status.success() {
            return Err(EnvError::ToolFailed {
                tool: format!("pyenv install {pin}"),
                code: out.status.code(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
    }

    let prefix = Command::new(&pyenv).args(["prefix", pin]).output()?;
    if !prefix.status.success() {
        return Err(EnvError::ToolFailed {
            tool: format!("pyenv prefix {pin}"),
            code: prefix.status.code(),
            stderr: String::from_utf8_lossy(&prefix.stderr).trim().to_string(),
        });
    }

    let prefix_dir = PathBuf::from(String::from_utf8_lossy(&prefix.stdout).trim());
    let interpreter = if cfg!(windows) {
        prefix_dir.join("python.exe")
    } else {
        prefix_dir.join("bin").join("python")
    };
    let version = interpreter_version(&interpreter)?;

    Ok(Some(ResolvedInterpreter {
        path: interpreter,
        version,
        source: InterpreterSource::Pyenv,
    }))
}

/// Fall back to `python3` / `python` on PATH, requiring the pin to match.
fn system_interpreter(pin: &str) -> Result<ResolvedInterpreter, EnvError> {
    let mut best_found: Option<String> = None;
    for name in ["python3", "python"] {
        let Ok(path) = which::which(name) else {
            continue;
        };
        let Ok(version) = interpreter_version(&path) else {
            continue;
        };
        if satisfies_pin(&version, pin) {
            tracing::info!(version = %version, path = %path.display(), "Using system interpreter");
            return Ok(ResolvedInterpreter {
                path,
                version,
                source: InterpreterSource::System,
            });
        }
        best_found.get_or_insert(version);
    }

    match best_found {
        Some(found) => Err(EnvError::VersionMismatch {
            required: pin.to_string(),
            found,
        }),
        None => Err(EnvError::InterpreterNotFound {
            required: pin.to_string(),
        }),
    }
}

/// Ask an interpreter for its version.
fn interpreter_version(path: &Path) -> Result<String, EnvError> {
    let out = Command::new(path).arg("--version").output()?;
    if !out.status.success() {
        return Err(EnvError::ToolFailed {
            tool: format!("{} --version", path.display()),
            code: out.status.code(),
            stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        });
    }
    // Some Pythons print the version on stderr
    let text = if out.stdout.is_empty() {
        String::from_utf8_lossy(&out.stderr).to_string()
    } else {
        String::from_utf8_lossy(&out.stdout).to_string()
    };
    parse_version(&text).ok_or_else(|| EnvError::ToolFailed {
        tool: format!("{} --version", path.display()),
        code: Some(0),
        stderr: format!("unrecognized version output: {}", text.trim()),
    })
}

/// Write the version-pin marker file.
pub fn write_pin(pin_file: &Path, pin: &str) -> Result<(), EnvError> {
    std::fs::write(pin_file, format!("{pin}\n"))?;
    Ok(())
}

/// Read the pin file, if present.
pub fn read_pin(pin_file: &Path) -> Option<String> {
    std::fs::read_to_string(pin_file)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Remove the pin file. Returns whether it existed.
pub fn remove_pin(pin_file: &Path) -> Result<bool, EnvError> {
    match std::fs::remove_file(pin_file) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_version_extracts_triple() {
        assert_eq!(parse_version("Python 3.11.9"), Some("3.11.9".to_string()));
        assert_eq!(parse_version("Python 3.12.0rc1"), Some("3.12.0".to_string()));
        assert_eq!(parse_version("Python 3.11.9\n"), Some("3.11.9".to_string()));
        assert_eq!(parse_version("pypy 7.3"), None);
    }

    #[test]
    fn minor_pin_accepts_any_patch() {
        assert!(satisfies_pin("3.11.9", "3.11"));
        assert!(satisfies_pin("3.11.0", "3.11"));
        assert!(!satisfies_pin("3.12.1", "3.11"));
    }

    #[test]
    fn full_pin_requires_exact_version() {
        assert!(satisfies_pin("3.11.9", "3.11.9"));
        assert!(!satisfies_pin("3.11.8", "3.11.9"));
        assert!(!satisfies_pin("3.11", "3.11.9"));
    }

    #[test]
    fn numeric_compare_avoids_prefix_confusion() {
        assert!(!satisfies_pin("3.10.2", "3.1"));
        assert!(!satisfies_pin("3.1.2", "3.10"));
    }

    #[test]
    fn pin_file_roundtrip_and_idempotent_removal() {
        let tmp = tempfile::tempdir().unwrap();
        let pin_file = tmp.path().join(".python-version");

        assert_eq!(read_pin(&pin_file), None);
        write_pin(&pin_file, "3.11").unwrap();
        assert_eq!(read_pin(&pin_file), Some("3.11".to_string()));

        assert!(remove_pin(&pin_file).unwrap());
        assert!(!remove_pin(&pin_file).unwrap());
        assert_eq!(read_pin(&pin_file), None);
    }
}
