use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or validating configuration. The engine itself
/// never fails: out-of-range requests are clamped or refused.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}
