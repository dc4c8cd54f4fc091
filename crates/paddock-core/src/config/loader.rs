//! Unified environment variable loading.
//!
//! The fallback chains live here so business code never repeats `or_else`
//! calls against `std::env`.

use std::env;

/// Load `.env` from the current directory into the process environment,
/// without overwriting variables that are already set. Runs once.
pub fn load_dotenv() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let path = env::current_dir()
            .map(|d| d.join(".env"))
            .unwrap_or_else(|_| std::path::PathBuf::from(".env"));
        if let Ok(content) = std::fs::read_to_string(&path) {
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some(eq_pos) = line.find('=') {
                    let key = line[..eq_pos].trim();
                    let mut value = line[eq_pos + 1..].trim();
                    // Strip inline comment (# not inside quotes)
                    if let Some(hash_pos) = value.find('#') {
                        let before_hash = value[..hash_pos].trim_end();
                        if !before_hash.contains('"') && !before_hash.contains('\'') {
                            value = before_hash;
                        }
                    }
                    if (value.starts_with('"') && value.ends_with('"') && value.len() >= 2)
                        || (value.starts_with('\'') && value.ends_with('\'') && value.len() >= 2)
                    {
                        value = &value[1..value.len() - 1];
                    }
                    if !key.is_empty() && env::var(key).is_err() {
                        set_env_var(key, value);
                    }
                }
            }
        }
    });
}

/// Read from the primary variable or an alias chain, falling back to a default.
pub fn env_or<F>(primary: &str, aliases: &[&str], default: F) -> String
where
    F: FnOnce() -> String,
{
    env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default)
}

/// Read from the primary variable or an alias chain; empty values count as unset.
pub fn env_optional(primary: &str, aliases: &[&str]) -> Option<String> {
    env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()))
        .and_then(|s| {
            let s = s.trim().to_string();
            if s.is_empty() {
                None
            } else {
                Some(s)
            }
        })
}

/// Parse a boolean variable: 0/false/no/off are false, anything else is true.
pub fn env_bool(primary: &str, aliases: &[&str], default: bool) -> bool {
    let v = env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()));
    match v.as_deref() {
        Some(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        ),
        None => default,
    }
}

// All `env::set_var` calls go through here; business code never carries
// its own `unsafe` block.
//
// SAFETY contract: callers must run before any threads are spawned.

/// Set a single environment variable.
#[allow(unsafe_code)]
pub fn set_env_var(key: &str, value: &str) {
    unsafe { env::set_var(key, value) };
}

/// Remove a single environment variable.
#[allow(unsafe_code)]
pub fn remove_env_var(key: &str) {
    unsafe { env::remove_var(key) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_prefers_primary_then_alias_then_default() {
        set_env_var("PADDOCK_TEST_LOADER_ALIAS", "from-alias");
        let v = env_or("PADDOCK_TEST_LOADER_MISSING", &["PADDOCK_TEST_LOADER_ALIAS"], || {
            "default".to_string()
        });
        assert_eq!(v, "from-alias");
        remove_env_var("PADDOCK_TEST_LOADER_ALIAS");

        let v = env_or("PADDOCK_TEST_LOADER_MISSING", &[], || "default".to_string());
        assert_eq!(v, "default");
    }

    #[test]
    fn env_optional_treats_empty_as_unset() {
        set_env_var("PADDOCK_TEST_LOADER_EMPTY", "  ");
        assert_eq!(env_optional("PADDOCK_TEST_LOADER_EMPTY", &[]), None);
        remove_env_var("PADDOCK_TEST_LOADER_EMPTY");
    }

    #[test]
    fn env_bool_parses_off_values() {
        for off in ["0", "false", "NO", "off"] {
            set_env_var("PADDOCK_TEST_LOADER_BOOL", off);
            assert!(!env_bool("PADDOCK_TEST_LOADER_BOOL", &[], true));
        }
        set_env_var("PADDOCK_TEST_LOADER_BOOL", "1");
        assert!(env_bool("PADDOCK_TEST_LOADER_BOOL", &[], false));
        remove_env_var("PADDOCK_TEST_LOADER_BOOL");
        assert!(env_bool("PADDOCK_TEST_LOADER_BOOL", &[], true));
    }
}
