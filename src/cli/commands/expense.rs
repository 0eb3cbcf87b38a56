use spendlog_domain::{Displayable, NewExpense};

use crate::cli::core::{
    parse_amount, parse_date, short_id, CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a new expense",
            "add <amount> <category> [YYYY-MM-DD|today] [note...]",
            cmd_add,
        ),
        CommandEntry::new(
            "edit",
            "Change one field of an expense",
            "edit <id> <amount|category|date|note> <value>",
            cmd_edit,
        ),
        CommandEntry::new("delete", "Delete an expense", "delete <id>", cmd_delete),
        CommandEntry::new("clear", "Delete every expense", "clear", cmd_clear),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [amount, category, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: add <amount> <category> [YYYY-MM-DD|today] [note...]".into(),
        ));
    };

    let amount = parse_amount(amount)?;
    let category = category.trim();
    let date = match rest.first() {
        Some(value) => parse_date(value, context.today())?,
        None => parse_date("today", context.today())?,
    };
    let note = rest.iter().skip(1).copied().collect::<Vec<_>>().join(" ");

    warn_unknown_category(context, category);
    let draft = NewExpense::new(amount, category, date).with_note(note);
    let id = context.store.add_expense(draft)?;
    io::print_success(format!(
        "Added {} in {} ({}).",
        context.money(amount),
        category,
        short_id(&id)
    ));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id, field, value @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: edit <id> <amount|category|date|note> <value>".into(),
        ));
    };

    let id = context.resolve_expense_id(id)?;
    let mut expense = context
        .store
        .expense(&id)
        .cloned()
        .ok_or_else(|| CommandError::Message(format!("expense `{}` disappeared", id)))?;
    let value = value.join(" ");

    match field.to_lowercase().as_str() {
        "amount" => expense.amount = parse_amount(&value)?,
        "category" => {
            let category = value.trim();
            if category.is_empty() {
                return Err(CommandError::InvalidArguments("category cannot be empty".into()));
            }
            warn_unknown_category(context, category);
            expense.category = category.to_string();
        }
        "date" => expense.date = parse_date(value.trim(), context.today())?,
        "note" => {
            let note = value.trim();
            expense.note = (!note.is_empty()).then(|| note.to_string());
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown field `{}` (expected amount, category, date or note)",
                other
            )))
        }
    }

    if context.store.update_expense(expense) {
        io::print_success(format!("Updated expense {}.", short_id(&id)));
    } else {
        io::print_warning(format!("Expense {} was not found.", short_id(&id)));
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(needle) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: delete <id>".into()));
    };
    let id = context.resolve_expense_id(needle)?;
    let label = context
        .store
        .expense(&id)
        .map(Displayable::display_label)
        .unwrap_or_else(|| id.clone());
    if context.store.delete_expense(&id) {
        io::print_success(format!("Deleted {}.", label));
    }
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let count = context.store.expenses().len();
    if count == 0 {
        io::print_info("There are no expenses to clear.");
        return Ok(());
    }
    if !context.confirm(&format!("Delete all {} expenses?", count))? {
        io::print_info("Nothing deleted.");
        return Ok(());
    }
    context.store.clear_expenses();
    io::print_success(format!("Deleted {} expenses.", count));
    Ok(())
}

fn warn_unknown_category(context: &ShellContext, category: &str) {
    if !context.store.settings().has_category_named(category) {
        io::print_warning(format!(
            "`{}` is not a known category; it will still be recorded.",
            category
        ));
    }
}
