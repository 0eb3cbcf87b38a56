use std::{collections::HashSet, path::Path};

use spendlog_storage_json::{load_expenses_from_path, save_expenses_to_path, JsonFileStore};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "export",
            "Write all expenses to a JSON file",
            "export <path>",
            cmd_export,
        ),
        CommandEntry::new(
            "import",
            "Merge expenses from a JSON file",
            "import <path>",
            cmd_import,
        ),
        CommandEntry::new(
            "status",
            "Show storage location and counts",
            "status",
            cmd_status,
        ),
    ]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(path) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: export <path>".into()));
    };
    let path = Path::new(path);
    save_expenses_to_path(context.store.expenses(), path)?;
    tracing::info!(
        path = %path.display(),
        count = context.store.expenses().len(),
        "exported expenses"
    );
    io::print_success(format!(
        "Exported {} expenses to {}.",
        context.store.expenses().len(),
        path.display()
    ));
    Ok(())
}

/// Imported expenses whose id already exists are skipped, as are repeats of
/// an id earlier in the same file.
fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(path) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: import <path>".into()));
    };
    let imported = load_expenses_from_path(Path::new(path))?;

    let mut seen: HashSet<String> = context
        .store
        .expenses()
        .iter()
        .map(|expense| expense.id.clone())
        .collect();
    let fresh: Vec<_> = imported
        .into_iter()
        .filter(|expense| seen.insert(expense.id.clone()))
        .collect();
    let added = fresh.len();
    if added == 0 {
        io::print_info("No new expenses to import.");
        return Ok(());
    }

    let mut merged = fresh;
    merged.extend(context.store.expenses().iter().cloned());
    context.store.load_expenses(merged);
    io::print_success(format!("Imported {} expenses.", added));
    Ok(())
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let keys = JsonFileStore::new(context.storage_root.clone())?.list_keys()?;
    output_section("Status");
    io::print_info(format!("  Storage    : {}", context.storage_root.display()));
    io::print_info(format!(
        "  Documents  : {}",
        if keys.is_empty() {
            "(none yet)".to_string()
        } else {
            keys.join(", ")
        }
    ));
    io::print_info(format!("  Expenses   : {}", context.store.expenses().len()));
    io::print_info(format!("  Currency   : {}", context.store.settings().currency));
    io::print_info(format!("  Period     : {}", context.store.filters().period));
    Ok(())
}
