//! TOML-file implementation of [`KeyValueStore`].
//!
//! The file is a flat table of string values:
//!
//! ```toml
//! theme = "dark"
//! ```
//!
//! Default location:
//! - **Linux**: `$XDG_CONFIG_HOME/ratatui-kit/preferences.toml`
//! - **macOS**: `~/Library/Application Support/rs.ratatui-kit.ratatui-kit/preferences.toml`
//! - **Windows**: `%APPDATA%\ratatui-kit\ratatui-kit\config\preferences.toml`
//!
//! Set `RATATUI_KIT_CONFIG_DIR` to put the file somewhere else.

use crate::error::Result;
use crate::error::StoreError;
use crate::preference::KeyValueStore;
use directories::ProjectDirs;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::info;

pub const CONFIG_DIR_ENV: &str = "RATATUI_KIT_CONFIG_DIR";
pub const FILE_NAME: &str = "preferences.toml";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct Preferences(BTreeMap<String, String>);

#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Preferences,
}

impl FileStore {
    /// Opens the store at `path`. A missing or blank file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(value) if value.trim().is_empty() => Preferences::default(),
            Ok(value) => toml::from_str(&value).map_err(|e| StoreError::Corrupt {
                path: path.clone(),
                message: e.message().to_string(),
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Preferences::default(),
            Err(err) => return Err(err.into()),
        };
        info!(path = ?path, entries = entries.0.len(), "preference file opened");
        Ok(Self { path, entries })
    }

    /// Opens the store at [`FileStore::default_path`].
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// `$RATATUI_KIT_CONFIG_DIR/preferences.toml` if the variable is set, otherwise the platform
    /// config directory.
    pub fn default_path() -> Result<PathBuf> {
        Ok(config_dir()?.join(FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let value = toml::to_string(&self.entries).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        fs::write(&self.path, value)?;
        debug!(path = ?self.path, "preference file written");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.0.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.0.insert(key.to_string(), value.to_string());
        self.save()
    }
}

fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let Some(project_dirs) = ProjectDirs::from("rs", "ratatui-kit", "ratatui-kit") else {
        return Err(StoreError::Unavailable(
            "could not determine the config directory".to_string(),
        ));
    };
    Ok(project_dirs.config_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_file_is_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "  \n")?;
        let store = FileStore::open(&path)?;
        assert_eq!(store.get("theme")?, None);
        Ok(())
    }

    #[test]
    fn non_string_values_are_corrupt() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "theme = 3\n")?;
        let err = FileStore::open(&path).err();
        assert!(matches!(err, Some(StoreError::Corrupt { .. })), "{err:?}");
        Ok(())
    }
}
