use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{Config, ConfigError};

const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Reads and writes [`Config`] as a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Uses `<base>/config/config.json`, creating the directory if needed.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir)?;
        Ok(Self::new(config_dir.join(CONFIG_FILE)))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// A missing file yields [`Config::default`]; an unreadable one is an error.
    pub fn load(&self) -> Result<Config, ConfigError> {
        match fs::read_to_string(&self.config_path) {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes to a sibling `.tmp` file first, then renames over the target.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.config_path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.config_path)?;
        Ok(())
    }
}
