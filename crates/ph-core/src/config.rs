//! Rule file loading.
//!
//! Rule files hold an [`AnonymizerConfig`] as JSON, TOML or YAML, picked by
//! extension:
//!
//! ```json
//! { "rules": [
//!     { "field": "name",  "action": "mask", "params": { "salt": "site-a" } },
//!     { "field": "email", "action": "suppress" }
//! ] }
//! ```
//!
//! Loaded configs carry the file path and a SHA-256 of its content so runs
//! can be traced back to the exact rules used.

use ph_anonymize::AnonymizerConfig;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a default rule file.
pub const RULES_ENV: &str = "PH_RULES";

/// Errors that can occur during rule file loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Rule file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid rule file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Unsupported rule file format for {path} (expected .json, .toml, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf },
}

/// Serialization format of a rule file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    Json,
    Toml,
    Yaml,
}

impl RuleFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "json" => Some(RuleFormat::Json),
            "toml" => Some(RuleFormat::Toml),
            "yaml" | "yml" => Some(RuleFormat::Yaml),
            _ => None,
        }
    }

    /// Parse config content in this format.
    ///
    /// Errors are flattened to strings; each backend has its own error type
    /// and all of them carry the unsupported-action message verbatim.
    pub fn parse(&self, content: &str) -> Result<AnonymizerConfig, String> {
        match self {
            RuleFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            RuleFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            RuleFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// A rule config with provenance.
#[derive(Debug, Clone)]
pub struct LoadedRules {
    /// The parsed config.
    pub config: AnonymizerConfig,
    /// Where it was loaded from.
    pub path: PathBuf,
    /// SHA-256 of the file content.
    pub content_hash: String,
}

/// Load and validate a rule file.
pub fn load_rules(path: &Path) -> Result<LoadedRules, ConfigError> {
    let format = RuleFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::IoError {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let config = format.parse(&content).map_err(|message| ConfigError::ParseError {
        path: path.to_path_buf(),
        message,
    })?;

    Ok(LoadedRules {
        config,
        path: path.to_path_buf(),
        content_hash: compute_hash(&content),
    })
}

/// Resolve the rule file: explicit path first, then `PH_RULES`.
///
/// Returns `Ok(None)` when neither is set (passthrough run).
pub fn resolve_rules(explicit: Option<&Path>) -> Result<Option<LoadedRules>, ConfigError> {
    if let Some(path) = explicit {
        return load_rules(path).map(Some);
    }
    match std::env::var_os(RULES_ENV) {
        Some(path) if !path.is_empty() => load_rules(Path::new(&path)).map(Some),
        _ => Ok(None),
    }
}

fn compute_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
