use spendlog_domain::{Currency, Period};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "currency",
            "Show or change the display currency",
            "currency [USD|EUR|RUB]",
            cmd_currency,
        ),
        CommandEntry::new(
            "settings",
            "Show settings, reset them, or set the start-up period",
            "settings <show|reset|period> [month|year|range]",
            cmd_settings,
        ),
    ]
}

fn cmd_currency(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(code) = args.first() else {
        let current = context.store.settings().currency;
        io::print_info(format!("Currency: {} ({})", current.code(), current.symbol()));
        let options: Vec<&str> = Currency::ALL.iter().map(|c| c.code()).collect();
        io::print_hint(format!("Available: {}", options.join(", ")));
        return Ok(());
    };

    let currency = code
        .parse::<Currency>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
    context.store.update_currency(currency);
    io::print_success(format!("Currency set to {}.", currency));
    Ok(())
}

fn cmd_settings(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let action = args.first().map(|arg| arg.to_lowercase());
    match action.as_deref() {
        None | Some("show") => {
            show_settings(context);
            Ok(())
        }
        Some("reset") => {
            if !context.confirm("Reset currency and custom categories to defaults?")? {
                io::print_info("Settings unchanged.");
                return Ok(());
            }
            context.store.reset_settings();
            io::print_success("Settings reset to defaults.");
            Ok(())
        }
        Some("period") => set_startup_period(context, args.get(1).copied()),
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown settings action `{}`",
            other
        ))),
    }
}

fn show_settings(context: &ShellContext) {
    let settings = context.store.settings();
    output_section("Settings");
    io::print_info(format!("  Currency          : {}", settings.currency));
    io::print_info(format!("  Default categories: {}", settings.categories.len()));
    io::print_info(format!(
        "  Custom categories : {}",
        settings.custom_categories.len()
    ));
    io::print_info(format!("  Start-up period   : {}", context.config.default_period));
    io::print_info(format!("  Colors            : {}", context.config.ui_color_enabled));
    io::print_info(format!(
        "  Config file       : {}",
        context.config_manager.config_path().display()
    ));
}

/// Persists the period applied when the shell starts; the live filter is
/// left alone.
fn set_startup_period(context: &mut ShellContext, label: Option<&str>) -> CommandResult {
    let Some(label) = label else {
        io::print_info(format!("Start-up period: {}", context.config.default_period));
        return Ok(());
    };
    let period = Period::parse(label).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "unknown period `{}` (expected month, year or range)",
            label
        ))
    })?;
    context.config.default_period = period.label().to_string();
    context.persist_config()?;
    io::print_success(format!("The shell will start on `{}`.", period));
    Ok(())
}
