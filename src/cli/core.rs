//! Core CLI loop, dispatch, and shell context helpers.

use std::{io, path::PathBuf, sync::Arc};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use spendlog_config::{app_data_dir, Config, ConfigError, ConfigManager};
use spendlog_core::{Clock, CoreError, ExpenseStore, StandardCurrencyFormatter, UsDateFormatter};
use spendlog_domain::{format_iso_date, parse_iso_date, AnalyticsSnapshot, Period};
use spendlog_storage_json::JsonFileStore;

pub use crate::errors::CliError;

use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};
use super::system_clock::SystemClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Number of id characters shown in tables and accepted as a short id.
pub(crate) const SHORT_ID_LEN: usize = 8;

impl ShellContext {
    /// Opens config and storage under the application data directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let app_dir = app_data_dir();
        let config_manager = ConfigManager::with_base_dir(app_dir.clone())?;
        let config = config_manager.load()?;
        crate::init(&config.log_filter);

        let storage_root = config.resolve_data_root(&app_dir);
        let backend = JsonFileStore::new(storage_root.clone())?;
        tracing::debug!(root = %storage_root.display(), "opening expense storage");
        let store = ExpenseStore::open(backend.into_adapter());

        Ok(Self::from_parts(
            mode,
            store,
            Arc::new(SystemClock),
            config,
            config_manager,
            storage_root,
        ))
    }

    /// Assembles a context from already-opened parts and applies the
    /// configured start-up preferences.
    pub fn from_parts(
        mode: CliMode,
        mut store: ExpenseStore,
        clock: Arc<dyn Clock>,
        config: Config,
        config_manager: ConfigManager,
        storage_root: PathBuf,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        store.set_period(Period::from_str_lossy(&config.default_period));
        if mode == CliMode::Script || !config.ui_color_enabled {
            colored::control::set_override(false);
        }

        ShellContext {
            mode,
            registry,
            store,
            clock,
            currency_formatter: Box::new(StandardCurrencyFormatter),
            date_formatter: Box::new(UsDateFormatter),
            theme: ColorfulTheme::default(),
            config,
            config_manager,
            storage_root,
            last_command: None,
            running: true,
        }
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        format!("spendlog [{}]> ", self.store.filters().period)
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager
            .save(&self.config)
            .map_err(CommandError::from)
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub(crate) fn snapshot(&self) -> AnalyticsSnapshot {
        self.store.snapshot(self.clock.as_ref())
    }

    pub(crate) fn money(&self, amount: f64) -> String {
        self.currency_formatter
            .format_amount(amount, self.store.settings().currency)
    }

    pub(crate) fn display_date(&self, date: &str) -> String {
        self.date_formatter.format_date(date)
    }

    pub(crate) fn snapshot_headline(&self, snapshot: &AnalyticsSnapshot) -> String {
        let caption = match self.store.filters().period {
            Period::Month => "This month",
            Period::Year => "This year",
            Period::Range => "Custom range",
        };
        format!(
            "{} ({} to {})",
            caption,
            self.display_date(&snapshot.range.from),
            self.display_date(&snapshot.range.to)
        )
    }

    /// Resolves a full id or a unique id prefix to the stored expense id.
    pub(crate) fn resolve_expense_id(&self, needle: &str) -> Result<String, CommandError> {
        let needle = needle.trim();
        if needle.is_empty() {
            return Err(CommandError::InvalidArguments("expense id is required".into()));
        }
        if let Some(expense) = self.store.expense(needle) {
            return Ok(expense.id.clone());
        }
        let matches: Vec<&str> = self
            .store
            .expenses()
            .iter()
            .filter(|expense| expense.id.starts_with(needle))
            .map(|expense| expense.id.as_str())
            .collect();
        match matches.as_slice() {
            [single] => Ok(single.to_string()),
            [] => Err(CommandError::InvalidArguments(format!(
                "no expense matches id `{}`",
                needle
            ))),
            _ => Err(CommandError::InvalidArguments(format!(
                "id `{}` matches {} expenses; use more characters",
                needle,
                matches.len()
            ))),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            tracing::debug!(command, args = args.len(), "dispatching command");
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.suggest(input) {
            cli_io::print_info(format!("Suggestion: `{}`?", best));
        }
    }

    /// Asks before a destructive action; script mode never prompts.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).or_else(|err| match err {
            CommandError::Dialoguer(inner) => Err(CliError::Prompt(inner)),
            _ => Ok(true),
        })
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                tracing::warn!(error = %other, "command failed");
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_hint(message);
    }
}

/// Parses a strict `YYYY-MM-DD` date, also accepting `today`.
pub(crate) fn parse_date(input: &str, today: NaiveDate) -> Result<String, CommandError> {
    if input.eq_ignore_ascii_case("today") {
        return Ok(format_iso_date(today));
    }
    parse_iso_date(input)
        .map(format_iso_date)
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
        })
}

/// Parses a strictly positive, finite amount.
pub(crate) fn parse_amount(input: &str) -> Result<f64, CommandError> {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(CommandError::InvalidArguments(format!(
            "invalid amount `{}` (expected a positive number)",
            input
        ))),
    }
}

pub(crate) fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

#[cfg(test)]
pub(crate) fn script_context(today: NaiveDate) -> (ShellContext, tempfile::TempDir) {
    use spendlog_core::{FixedClock, MemoryStore, StorageAdapter};

    let dir = tempfile::tempdir().expect("temp dir");
    let config_manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("config");
    let store = ExpenseStore::open(StorageAdapter::new(MemoryStore::new()));
    let context = ShellContext::from_parts(
        CliMode::Script,
        store,
        Arc::new(FixedClock::new(today)),
        Config::default(),
        config_manager,
        dir.path().join("store"),
    );
    (context, dir)
}

#[cfg(test)]
pub(crate) fn run_lines(context: &mut ShellContext, lines: &[&str]) {
    for line in lines {
        match context.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err).expect("report error"),
        }
    }
}
