//! Application settings from TOML files and the environment.
//!
//! Precedence: CLI > env > config files > defaults. Config files are searched in
//! order (`--settings`, `BULKSEED_CONFIG`, `~/.config/bulkseed.toml`,
//! `./bulkseed.toml`); the first file that sets a key wins.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::GenError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub output_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_retention: Option<usize>,
}

impl AppSettings {
    /// Fill keys that are still unset from `other`.
    fn fill_from(&mut self, other: AppSettings) {
        if self.output_dir.is_none() {
            self.output_dir = other.output_dir;
        }
        if self.log_dir.is_none() {
            self.log_dir = other.log_dir;
        }
        if self.log_level.is_none() {
            self.log_level = other.log_level;
        }
        if self.log_retention.is_none() {
            self.log_retention = other.log_retention;
        }
    }

    /// Settings from `BULKSEED_*` variables, read through `var`.
    pub fn from_env_with<F: Fn(&str) -> Option<String>>(var: F) -> AppSettings {
        AppSettings {
            output_dir: var("BULKSEED_OUTPUT_DIR").map(PathBuf::from),
            log_dir: var("BULKSEED_LOG_DIR").map(PathBuf::from),
            log_level: var("BULKSEED_LOG_LEVEL"),
            log_retention: var("BULKSEED_LOG_RETENTION").and_then(|s| s.parse().ok()),
        }
    }

    /// Parse one TOML settings file.
    ///
    /// # Errors
    /// Returns [`GenError::Io`] or [`GenError::Toml`].
    pub fn from_file(path: &Path) -> Result<AppSettings, GenError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Merge env over files over defaults. `explicit` must exist and parse;
    /// the other candidates are skipped when missing or unreadable.
    ///
    /// # Errors
    /// Returns [`GenError::Settings`] when the explicit file cannot be loaded.
    pub fn resolve<F: Fn(&str) -> Option<String>>(
        explicit: Option<&Path>,
        candidates: &[PathBuf],
        var: F,
    ) -> Result<AppSettings, GenError> {
        let mut cfg = AppSettings::from_env_with(&var);
        if let Some(p) = explicit {
            let file_cfg = AppSettings::from_file(p)
                .map_err(|e| GenError::Settings(format!("{}: {e}", p.display())))?;
            cfg.fill_from(file_cfg);
        }
        for p in candidates.iter().filter(|p| p.exists()) {
            match AppSettings::from_file(p) {
                Ok(file_cfg) => cfg.fill_from(file_cfg),
                Err(e) => log::warn!("settings: skipping {}: {}", p.display(), e),
            }
        }
        Ok(cfg)
    }

    /// Load with the process environment and the standard search path.
    ///
    /// # Errors
    /// See [`AppSettings::resolve`].
    pub fn load(explicit: Option<&Path>) -> Result<AppSettings, GenError> {
        AppSettings::resolve(explicit, &search_paths(), |k| std::env::var(k).ok())
    }

    /// Output directory: configured, else the user's downloads folder, else `.`.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(dirs_next::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Implicit settings files, in lookup order.
#[must_use]
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(p) = std::env::var("BULKSEED_CONFIG") {
        paths.push(PathBuf::from(p));
    }
    if let Some(home) = dirs_next::home_dir() {
        paths.push(home.join(".config").join("bulkseed.toml"));
    }
    if let Ok(cur) = std::env::current_dir() {
        paths.push(cur.join("bulkseed.toml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn env_beats_files_and_first_file_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a.toml");
        let b = tmp.path().join("b.toml");
        std::fs::write(&a, "log_level = \"debug\"\n").unwrap();
        std::fs::write(&b, "log_level = \"trace\"\nlog_retention = 3\noutput_dir = \"/from/file\"\n").unwrap();

        let cfg =
            AppSettings::resolve(None, &[a, b], env(&[("BULKSEED_OUTPUT_DIR", "/from/env")])).unwrap();
        assert_eq!(cfg.output_dir, Some(PathBuf::from("/from/env")));
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        assert_eq!(cfg.log_retention, Some(3));
    }

    #[test]
    fn explicit_file_must_exist() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");
        let err = AppSettings::resolve(Some(&missing), &[], env(&[])).unwrap_err();
        assert!(matches!(err, GenError::Settings(_)));
    }

    #[test]
    fn broken_candidate_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let bad = tmp.path().join("bad.toml");
        std::fs::write(&bad, "log_level = [").unwrap();
        let cfg = AppSettings::resolve(None, &[bad], env(&[("BULKSEED_LOG_RETENTION", "5")])).unwrap();
        assert_eq!(cfg.log_retention, Some(5));
        assert_eq!(cfg.log_level, None);
    }

    #[test]
    fn configured_output_dir_is_used() {
        let cfg = AppSettings { output_dir: Some(PathBuf::from("out")), ..AppSettings::default() };
        assert_eq!(cfg.output_dir(), PathBuf::from("out"));
    }
}
