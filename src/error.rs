use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the clausewise application
#[derive(Error, Debug)]
pub enum ClausewiseError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation errors
    #[error("Configuration validation failed: {errors:?}")]
    ConfigValidation { errors: Vec<ValidationError> },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Invalid configuration value
    #[error("Invalid configuration value at {path}: {message}")]
    InvalidConfigValue { path: String, message: String },

    /// Analysis requested with no usable text
    #[error("No contract text to analyze")]
    EmptyInput,

    /// Input file type not supported
    #[error("Unsupported input file: {path} (plain-text contracts only)")]
    UnsupportedInput { path: PathBuf },

    /// Unknown bundled sample name
    #[error("Unknown sample contract: {name}")]
    UnknownSample { name: String },

    /// Persisted history cannot be parsed
    #[error("History file is corrupt: {path}: {source}")]
    CorruptHistory {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A record references an artifact that no longer exists on disk
    #[error("Artifact not found: {path}")]
    MissingArtifact { path: PathBuf },

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    /// JSON errors
    #[error("JSON error: {context}: {source}")]
    Json {
        source: serde_json::Error,
        context: String,
    },

    /// CSV export errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Path to the configuration key that failed validation
    pub path: String,
    /// Error message describing the validation failure
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for clausewise operations
pub type Result<T> = std::result::Result<T, ClausewiseError>;
