//! Dependency manifest parsing (`requirements.txt`).
//!
//! Handles `package==version`, `package>=version`, `package~=version` and
//! friends. Comment lines, blank lines, and pip flag lines (`-r`, `-e`)
//! are skipped.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// One declared dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub name: String,
    /// Version constraint as written, e.g. "==2.31.0" or ">=1.4,<2".
    /// `None` for unconstrained entries.
    pub constraint: Option<String>,
}

impl Requirement {
    /// "name==version" or just "name".
    pub fn display(&self) -> String {
        match &self.constraint {
            Some(c) => format!("{}{}", self.name, c),
            None => self.name.clone(),
        }
    }
}

/// Parse manifest content into requirements.
pub fn parse_requirements(content: &str) -> Vec<Requirement> {
    let mut reqs = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
            continue;
        }
        let line = line.split('#').next().unwrap_or(line).trim();
        if line.is_empty() {
            continue;
        }

        match line.find(|c: char| matches!(c, '=' | '>' | '<' | '~' | '!')) {
            Some(idx) => {
                let name = line[..idx].trim();
                let constraint = line[idx..].trim();
                if !name.is_empty() && !constraint.is_empty() {
                    reqs.push(Requirement {
                        name: name.to_string(),
                        constraint: Some(constraint.to_string()),
                    });
                }
            }
            None => reqs.push(Requirement {
                name: line.to_string(),
                constraint: None,
            }),
        }
    }
    reqs
}

/// Load and parse a manifest file.
pub fn load(path: &Path) -> Result<Vec<Requirement>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Read manifest {}", path.display()))?;
    Ok(parse_requirements(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_exact_pins() {
        let content = "fastf1==3.3.9\nstreamlit==1.35.0\nplotly==5.22.0\n";
        let reqs = parse_requirements(content);
        assert_eq!(reqs.len(), 3);
        assert_eq!(reqs[0].name, "fastf1");
        assert_eq!(reqs[0].constraint.as_deref(), Some("==3.3.9"));
        assert_eq!(reqs[1].display(), "streamlit==1.35.0");
    }

    #[test]
    fn parse_range_operators() {
        let content = "pandas>=2.0\nnumpy~=1.26\nscipy<2.0,>=1.11\n";
        let reqs = parse_requirements(content);
        assert_eq!(reqs.len(), 3);
        assert_eq!(reqs[0].constraint.as_deref(), Some(">=2.0"));
        assert_eq!(reqs[1].constraint.as_deref(), Some("~=1.26"));
        assert_eq!(reqs[2].constraint.as_deref(), Some("<2.0,>=1.11"));
    }

    #[test]
    fn skip_comments_flags_and_blanks() {
        let content = "# chart stack\n\n-r base.txt\n-e git+https://example/repo\nplotly==5.22.0\n";
        let reqs = parse_requirements(content);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].name, "plotly");
    }

    #[test]
    fn strip_inline_comment() {
        let content = "fastf1==3.3.9  # timing data API\n";
        let reqs = parse_requirements(content);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].constraint.as_deref(), Some("==3.3.9"));
    }

    #[test]
    fn unconstrained_entry_is_kept() {
        let reqs = parse_requirements("streamlit\n");
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].constraint, None);
        assert_eq!(reqs[0].display(), "streamlit");
    }
}
