use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NovaError {
    #[error("Could not load knowledge base {path:?}: {reason}")]
    KnowledgeBaseLoad { path: PathBuf, reason: String },

    #[error("External launch failed: {0}")]
    ExternalLaunch(String),

    #[error("Knowledge engine fault: {0}")]
    EngineFault(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl NovaError {
    /// Build a knowledge base load error for `path`
    pub fn kb_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::KnowledgeBaseLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NovaError>;
