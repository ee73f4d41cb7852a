//! Configuration file loading and discovery.
//!
//! Settings come from built-in defaults, optionally overridden by a YAML
//! file, and finally by command-line flags (applied in `main`).

use crate::domain::{DomainError, DomainResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_NAMES: &[&str] = &[".smoelenboek.yaml", "smoelenboek.yaml", "config.yaml"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct AppConfig {
    /// Path or http(s) URL of the profile JSON
    pub source: String,
    pub refresh_interval_secs: u64,
    /// Fragment to start at, e.g. `profile/ann`
    pub initial_route: Option<String>,
    pub preferences_path: Option<PathBuf>,
    pub persist_preferences: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: "data.json".to_string(),
            refresh_interval_secs: 30,
            initial_route: None,
            preferences_path: None,
            persist_preferences: true,
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> DomainResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| DomainError::io(path, e))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> DomainResult<Self> {
        let config: AppConfig = serde_yaml::from_str(content)
            .map_err(|e| DomainError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.source.trim().is_empty() {
            return Err(DomainError::Config("source must not be empty".to_string()));
        }
        if self.refresh_interval_secs == 0 {
            return Err(DomainError::Config(
                "refresh-interval-secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.preferences_path
            .clone()
            .unwrap_or_else(super::JsonPreferenceStore::default_path)
    }

    /// `<cache dir>/smoelenboek/smoelenboek.log` unless overridden.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::cache_dir().map(|dir| dir.join("smoelenboek").join("smoelenboek.log"))
        })
    }
}

/// Finds a config file: the explicit path if it exists, then the working
/// directory, then `<config dir>/smoelenboek/`.
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then(|| path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(path) = find_config_in_dir(&cwd, &CONFIG_FILE_NAMES[..2]) {
            return Some(path);
        }
    }

    dirs::config_dir()
        .and_then(|dir| find_config_in_dir(&dir.join("smoelenboek"), CONFIG_FILE_NAMES))
}

fn find_config_in_dir(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.source, "data.json");
        assert_eq!(config.refresh_interval(), Duration::from_secs(30));
        assert!(config.persist_preferences);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml(
            "source: https://example.com/data.json\nrefresh-interval-secs: 5\n",
        )
        .unwrap();
        assert_eq!(config.source, "https://example.com/data.json");
        assert_eq!(config.refresh_interval(), Duration::from_secs(5));
        assert!(config.persist_preferences);
        assert_eq!(config.initial_route, None);
    }

    #[test]
    fn test_invalid_yaml_values() {
        assert!(matches!(
            AppConfig::from_yaml("refresh-interval-secs: 0"),
            Err(DomainError::Config(_))
        ));
        assert!(matches!(
            AppConfig::from_yaml("source: ''"),
            Err(DomainError::Config(_))
        ));
        assert!(matches!(
            AppConfig::from_yaml("colour: blue"),
            Err(DomainError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("smoelenboek.yaml");
        fs::write(&path, "initial-route: profile/ann\npersist-preferences: false\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.initial_route.as_deref(), Some("profile/ann"));
        assert!(!config.persist_preferences);
    }

    #[test]
    fn test_explicit_path_discovery() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        assert_eq!(discover_config_file(Some(path.as_path())), None);

        fs::write(&path, "source: data.json\n").unwrap();
        assert_eq!(discover_config_file(Some(path.as_path())), Some(path.clone()));
    }

    #[test]
    fn test_find_config_in_dir() {
        let dir = tempdir().unwrap();
        assert_eq!(find_config_in_dir(dir.path(), CONFIG_FILE_NAMES), None);

        fs::write(dir.path().join("smoelenboek.yaml"), "").unwrap();
        assert_eq!(
            find_config_in_dir(dir.path(), CONFIG_FILE_NAMES),
            Some(dir.path().join("smoelenboek.yaml"))
        );
    }
}
