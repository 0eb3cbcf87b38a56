use std::{path::PathBuf, sync::Arc};

use dialoguer::theme::ColorfulTheme;
use spendlog_config::{Config, ConfigManager};
use spendlog_core::{Clock, CurrencyFormatter, DateFormatter, ExpenseStore};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler can reach.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: ExpenseStore,
    pub clock: Arc<dyn Clock>,
    pub currency_formatter: Box<dyn CurrencyFormatter>,
    pub date_formatter: Box<dyn DateFormatter>,
    pub theme: ColorfulTheme,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub storage_root: PathBuf,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, expenses: {} }}",
            self.running,
            self.last_command,
            self.store.expenses().len()
        )
    }
}
