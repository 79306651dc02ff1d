//! Store location settings

use crate::types::{ConfError, Result};
use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOptions {
    /// Directory holding `<name>.json`. Defaults to the user's home directory.
    pub home_dir: Option<PathBuf>,
}

impl StoreOptions {
    pub fn with_home_dir(home_dir: impl Into<PathBuf>) -> Self {
        Self {
            home_dir: Some(home_dir.into()),
        }
    }

    /// Resolve the base directory, falling back to the platform home dir
    pub fn resolve_home(&self) -> Result<PathBuf> {
        let home = match &self.home_dir {
            Some(dir) => dir.clone(),
            None => dirs::home_dir().ok_or(ConfError::NoHomeDir)?,
        };

        if home.is_absolute() {
            Ok(home)
        } else {
            Ok(std::env::current_dir()?.join(home))
        }
    }

    /// Absolute, normalized path of the config file for `name`
    pub fn config_path(&self, name: &str) -> Result<PathBuf> {
        let home = self.resolve_home()?;
        let path = file_path(&home, name);
        debug!("Resolved config '{}' to {}", name, path.display());
        Ok(path)
    }
}

pub(crate) fn file_path(home: &Path, name: &str) -> PathBuf {
    home.join(format!("{}.json", name)).clean()
}
