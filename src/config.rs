//! JSON files holding one entity's generation options.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::errors::GenError;

/// Read an entity config. Missing keys take the config type's defaults.
///
/// # Errors
/// Returns [`GenError::Io`] if the file cannot be read and [`GenError::Json`] if it does not parse.
pub fn load_generation_config<T: DeserializeOwned>(path: &Path) -> Result<T, GenError> {
    let text = fs::read_to_string(path)?;
    let cfg = serde_json::from_str(&text)?;
    log::info!("config: loaded {}", path.display());
    Ok(cfg)
}

/// Write an entity config as pretty-printed JSON, creating parent directories.
///
/// # Errors
/// Returns [`GenError::Io`] or [`GenError::Json`] on failure.
pub fn save_generation_config<T: Serialize>(path: &Path, cfg: &T) -> Result<(), GenError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut text = serde_json::to_string_pretty(cfg)?;
    text.push('\n');
    fs::write(path, text)?;
    log::info!("config: saved {}", path.display());
    Ok(())
}
