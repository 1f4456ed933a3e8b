use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("No upstream IDs available: {0}")]
    NoUpstreamIds(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Could not load config from {path}: {reason}")]
    ConfigLoad { path: String, reason: String },
}
