//! CLI configuration loaded from arithmo.toml.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level arithmo configuration. Command-line flags override these
/// values; these override the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArithmoConfig {
    /// Where session summaries are written.
    #[serde(default = "default_session_dir")]
    pub session_dir: PathBuf,
    /// Starting difficulty when --tier is not given.
    #[serde(default = "default_tier")]
    pub default_tier: String,
    /// Offer a break after this many questions.
    #[serde(default = "default_milestone")]
    pub milestone_every: usize,
}

fn default_session_dir() -> PathBuf {
    PathBuf::from("data/sessions")
}
fn default_tier() -> String {
    "easy".to_string()
}
fn default_milestone() -> usize {
    5
}

impl Default for ArithmoConfig {
    fn default() -> Self {
        Self {
            session_dir: default_session_dir(),
            default_tier: default_tier(),
            milestone_every: default_milestone(),
        }
    }
}

/// Load config from an explicit path, or `arithmo.toml` in the working
/// directory when present, falling back to defaults.
///
/// An explicit path that does not exist is an error; the implicit one is not.
pub fn load_config_from(path: Option<&Path>) -> Result<ArithmoConfig> {
    let candidate = match path {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from("arithmo.toml"),
    };

    if !candidate.exists() {
        if path.is_some() {
            anyhow::bail!("config file not found: {}", candidate.display());
        }
        return Ok(ArithmoConfig::default());
    }

    let content = std::fs::read_to_string(&candidate)
        .with_context(|| format!("failed to read config from {}", candidate.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse {}", candidate.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_file() {
        let config = ArithmoConfig::default();
        assert_eq!(config.session_dir, PathBuf::from("data/sessions"));
        assert_eq!(config.default_tier, "easy");
        assert_eq!(config.milestone_every, 5);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: ArithmoConfig = toml::from_str("default_tier = \"medium\"").unwrap();
        assert_eq!(config.default_tier, "medium");
        assert_eq!(config.milestone_every, 5);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
