use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DATA_DIR_NAME: &str = ".spendlog";

/// Stores user-configurable shell preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Period label applied to the filter when the shell starts.
    #[serde(default = "Config::default_period_value")]
    pub default_period: String,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the expense and settings documents.
    /// Defaults to `<data dir>/store`.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_period: Self::default_period_value(),
            log_filter: Self::default_log_filter(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_root: None,
        }
    }
}

impl Config {
    pub fn default_period_value() -> String {
        "month".into()
    }

    pub fn default_log_filter() -> String {
        "spendlog=info".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Resolves the storage directory, honouring `data_root` when set.
    pub fn resolve_data_root(&self, app_dir: &std::path::Path) -> PathBuf {
        self.data_root
            .clone()
            .unwrap_or_else(|| app_dir.join("store"))
    }
}

/// Application data directory: `$SPENDLOG_HOME` when set, else `~/.spendlog`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = std::env::var_os("SPENDLOG_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}
