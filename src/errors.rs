use std::io;

use spendlog_config::ConfigError;
use spendlog_core::CoreError;
use thiserror::Error;

/// Unified error type for the core, config and storage layers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors that end the shell.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("Line editor failed: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::App(AppError::Io(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::App(AppError::Config(err))
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::App(AppError::Core(err))
    }
}
