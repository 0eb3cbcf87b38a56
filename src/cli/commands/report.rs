use crate::cli::core::{short_id, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{section as output_section, swatch};
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};

const NOTE_WIDTH: usize = 32;
const BAR_WIDTH: usize = 24;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show totals for the active period",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "list",
            "List expenses in the active period",
            "list [all]",
            cmd_list,
        ),
        CommandEntry::new(
            "breakdown",
            "Show spending per category",
            "breakdown",
            cmd_breakdown,
        ),
        CommandEntry::new(
            "timeline",
            "Show spending per day",
            "timeline",
            cmd_timeline,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.snapshot();
    output_section(context.snapshot_headline(&snapshot));
    io::print_info(format!("  Total spent  : {}", context.money(snapshot.total)));
    io::print_info(format!("  Transactions : {}", snapshot.transaction_count()));
    io::print_info(format!("  Categories   : {}", snapshot.category_count()));
    if let Some(top) = snapshot.by_category.iter().max_by(|a, b| a.value.total_cmp(&b.value)) {
        io::print_info(format!(
            "  Top category : {} ({})",
            top.name,
            context.money(top.value)
        ));
    }
    if snapshot.is_empty() {
        io::print_hint("No expenses in this period. Use `add` to record one.");
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let show_all = match args.first().map(|arg| arg.to_lowercase()) {
        None => false,
        Some(arg) if arg == "all" => true,
        Some(other) => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown list option `{}` (expected `all`)",
                other
            )))
        }
    };

    let mut expenses = if show_all {
        context.store.expenses().to_vec()
    } else {
        context.snapshot().expenses
    };
    if expenses.is_empty() {
        io::print_info("No expenses to show.");
        return Ok(());
    }
    expenses.sort_by(|a, b| b.date.cmp(&a.date));

    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
        TableColumn::left("Note").max_width(NOTE_WIDTH),
    ]);
    for expense in &expenses {
        table.push_row(vec![
            short_id(&expense.id).to_string(),
            context.display_date(&expense.date),
            expense.category.clone(),
            context.money(expense.amount),
            expense.note.clone().unwrap_or_default(),
        ]);
    }
    io::print_info(table.render());
    io::print_info(format!(
        "{} expenses, {} total.",
        expenses.len(),
        context.money(expenses.iter().map(|expense| expense.amount).sum())
    ));
    Ok(())
}

fn cmd_breakdown(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.snapshot();
    output_section(format!("By category: {}", context.snapshot_headline(&snapshot)));
    if snapshot.by_category.is_empty() {
        io::print_info("No expenses in this period.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::left("Color"),
        TableColumn::right("Amount"),
        TableColumn::right("Share"),
        TableColumn::left(""),
    ]);
    for entry in &snapshot.by_category {
        let percent = snapshot.share_of_total(entry.value);
        table.push_row(vec![
            entry.name.clone(),
            entry.color.clone(),
            context.money(entry.value),
            format!("{:.1}%", percent),
            swatch(&bar(percent / 100.0), &entry.color),
        ]);
    }
    io::print_info(table.render());
    io::print_info(format!("Total: {}", context.money(snapshot.total)));
    Ok(())
}

fn cmd_timeline(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.snapshot();
    output_section(format!("By day: {}", context.snapshot_headline(&snapshot)));
    if snapshot.by_day.is_empty() {
        io::print_info("No expenses in this period.");
        return Ok(());
    }

    let peak = snapshot
        .by_day
        .iter()
        .map(|day| day.total)
        .fold(0.0_f64, f64::max);
    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::right("Total"),
        TableColumn::left(""),
    ]);
    for day in &snapshot.by_day {
        let ratio = if peak > 0.0 { day.total / peak } else { 0.0 };
        table.push_row(vec![
            context.display_date(&day.date),
            context.money(day.total),
            bar(ratio),
        ]);
    }
    io::print_info(table.render());
    Ok(())
}

/// Horizontal bar for a ratio in `0.0..=1.0`.
fn bar(ratio: f64) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_and_clamps() {
        assert_eq!(bar(0.0), "");
        assert_eq!(bar(0.5).len(), BAR_WIDTH / 2);
        assert_eq!(bar(3.0).len(), BAR_WIDTH);
    }
}
