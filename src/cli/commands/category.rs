use spendlog_core::DEFAULT_PALETTE;
use spendlog_domain::{is_hex_color, CustomCategory, Displayable};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::swatch;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "category",
        "Manage expense categories",
        "category <list|add|edit|remove> ...",
        cmd_category,
    )]
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(action) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: category <list|add|edit|remove> ...".into(),
        ));
    };

    match action.to_lowercase().as_str() {
        "list" => list_categories(context),
        "add" => add_category(context, &args[1..]),
        "edit" => edit_category(context, &args[1..]),
        "remove" => remove_category(context, &args[1..]),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown category subcommand `{}`",
            other
        ))),
    }
}

fn list_categories(context: &ShellContext) -> CommandResult {
    let settings = context.store.settings();
    let mut table = Table::new(vec![
        TableColumn::left("Name"),
        TableColumn::left("Kind"),
        TableColumn::left("Color"),
        TableColumn::left("ID"),
    ]);
    for name in &settings.categories {
        table.push_row(vec![name.clone(), "default".into(), String::new(), String::new()]);
    }
    for custom in &settings.custom_categories {
        table.push_row(vec![
            custom.name.clone(),
            "custom".into(),
            swatch(&custom.color, &custom.color),
            custom.id.clone(),
        ]);
    }
    io::print_info(table.render());
    Ok(())
}

fn add_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: category add <name> [#RRGGBB]".into(),
        ));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(CommandError::InvalidArguments("category name cannot be empty".into()));
    }
    if context.store.settings().has_category_named(name) {
        return Err(CommandError::InvalidArguments(format!(
            "category `{}` already exists",
            name
        )));
    }

    let color = match rest.first() {
        Some(color) => validated_color(color)?,
        None => {
            let used = context.store.settings().custom_categories.len();
            DEFAULT_PALETTE[used % DEFAULT_PALETTE.len()].to_string()
        }
    };
    let category = CustomCategory::new(name, color);
    io::print_success(format!(
        "Added category {} {}.",
        category.name,
        swatch(&category.color, &category.color)
    ));
    context.store.add_custom_category(category);
    Ok(())
}

fn edit_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [needle, field, value @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: category edit <id|name> <name|color> <value>".into(),
        ));
    };
    let mut category = find_custom(context, needle)?.clone();
    let value = value.join(" ");
    let value = value.trim();

    match field.to_lowercase().as_str() {
        "name" => {
            if value.is_empty() {
                return Err(CommandError::InvalidArguments(
                    "category name cannot be empty".into(),
                ));
            }
            let clashes = !value.eq_ignore_ascii_case(&category.name)
                && context.store.settings().has_category_named(value);
            if clashes {
                return Err(CommandError::InvalidArguments(format!(
                    "category `{}` already exists",
                    value
                )));
            }
            category.name = value.to_string();
        }
        "color" => category.color = validated_color(value)?,
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown category field `{}` (expected name or color)",
                other
            )))
        }
    }

    let name = category.name.clone();
    if context.store.update_custom_category(category) {
        io::print_success(format!("Updated category {}.", name));
    }
    Ok(())
}

fn remove_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(needle) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: category remove <id|name>".into(),
        ));
    };
    let category = find_custom(context, needle)?.clone();
    if context.store.delete_custom_category(&category.id) {
        io::print_success(format!("Removed category {}.", category.display_label()));
        io::print_hint("Existing expenses keep their category name.");
    }
    Ok(())
}

/// Custom categories match by id, unique id prefix, or case-insensitive name.
fn find_custom<'a>(
    context: &'a ShellContext,
    needle: &str,
) -> Result<&'a CustomCategory, CommandError> {
    let customs = &context.store.settings().custom_categories;
    if let Some(found) = customs
        .iter()
        .find(|c| c.id == needle || c.name.eq_ignore_ascii_case(needle))
    {
        return Ok(found);
    }
    let mut prefixed = customs.iter().filter(|c| c.id.starts_with(needle));
    match (prefixed.next(), prefixed.next()) {
        (Some(found), None) if !needle.is_empty() => Ok(found),
        _ => Err(CommandError::InvalidArguments(format!(
            "no custom category matches `{}`",
            needle
        ))),
    }
}

fn validated_color(value: &str) -> Result<String, CommandError> {
    let value = value.trim();
    if is_hex_color(value) {
        Ok(value.to_uppercase())
    } else {
        Err(CommandError::InvalidArguments(format!(
            "invalid color `{}` (use #RGB or #RRGGBB)",
            value
        )))
    }
}
