use crate::application::PreferenceStore;
use crate::domain::{DomainError, DomainResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Preferences kept as a pretty-printed JSON object of booleans.
///
/// Every `set` rewrites the file, so the stored value always matches the
/// in-memory one once the call returns.
#[derive(Debug)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, bool>,
}

impl JsonPreferenceStore {
    /// Opens the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match Self::read(&path) {
            Ok(values) => values,
            Err(e) => {
                if path.exists() {
                    tracing::warn!(error = %e, "ignoring unreadable preference file");
                }
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    /// `<config dir>/smoelenboek/preferences.json`, falling back to the
    /// working directory when the platform has no config dir.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("smoelenboek"))
            .unwrap_or_default()
            .join("preferences.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> DomainResult<BTreeMap<String, bool>> {
        let content = fs::read_to_string(path).map_err(|e| DomainError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self) -> DomainResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| DomainError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json).map_err(|e| DomainError::io(&self.path, e))
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> Option<bool> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: bool) -> DomainResult<()> {
        self.values.insert(key.to_string(), value);
        self.write()
    }
}

/// Process-lifetime preferences, for `--no-persist` and tests.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, bool>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<bool> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: bool) -> DomainResult<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
