use crate::error::{CliError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const STORE_FILE: &str = "store.json";
const CONFIG_FILE: &str = "config.toml";
const PATH_CONFIG_FILE: &str = "path.conf";

/// Locates the user's data directory (where the store lives) and configuration directory.
#[derive(Debug)]
pub struct DataManager {
    base_path: PathBuf,
}

impl DataManager {
    pub fn new() -> Result<Self> {
        let path = Self::determine_data_path()?;
        debug!("DataManager initialized with path: {:?}", &path);
        Ok(Self { base_path: path })
    }

    #[cfg(test)]
    pub fn with_custom_path(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn get_data_path(&self) -> &Path {
        &self.base_path
    }

    pub fn default_store_path(&self) -> PathBuf {
        self.base_path.join(STORE_FILE)
    }

    /// `config.toml` in the user configuration directory, if one exists.
    pub fn default_config_file() -> Option<PathBuf> {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .filter(|path| path.is_file())
    }

    pub fn set_custom_path(path: &Path) -> Result<()> {
        let path_str = path.to_str().ok_or_else(|| {
            CliError::Argument(format!("Data path is not valid UTF-8: {:?}", path))
        })?;
        let config_path = Self::get_path_config_file()?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(config_path, path_str).map_err(CliError::from)
    }

    pub fn reset_path() -> Result<()> {
        if let Ok(config_path) = Self::get_path_config_file() {
            if config_path.exists() {
                fs::remove_file(config_path)?;
            }
        }
        Ok(())
    }

    fn determine_data_path() -> Result<PathBuf> {
        match Self::get_path_config_file() {
            Ok(config_path) if config_path.exists() => {
                Self::read_custom_path(&config_path)?.map_or_else(Self::get_default_data_path, Ok)
            }
            _ => Self::get_default_data_path(),
        }
    }

    fn read_custom_path(config_path: &Path) -> Result<Option<PathBuf>> {
        let custom_path_str = fs::read_to_string(config_path)?.trim().to_string();
        if custom_path_str.is_empty() {
            warn!("Custom path config file is empty, falling back to default path.");
            Ok(None)
        } else {
            Ok(Some(PathBuf::from(custom_path_str)))
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("app", "skinprint", "skinprint")
    }

    fn get_path_config_file() -> Result<PathBuf> {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().join(PATH_CONFIG_FILE))
            .ok_or_else(|| CliError::Data("Could not determine config directory path.".to_string()))
    }

    fn get_default_data_path() -> Result<PathBuf> {
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                CliError::Data("Could not determine default data directory path.".to_string())
            })
    }
}
