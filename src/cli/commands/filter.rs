use spendlog_domain::Period;

use crate::cli::core::{parse_date, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "period",
            "Choose the reporting period",
            "period <month|year|range> [from] [to]",
            cmd_period,
        ),
        CommandEntry::new(
            "filter",
            "Inspect or adjust the custom range bounds",
            "filter <show|reset|from|to> [YYYY-MM-DD]",
            cmd_filter,
        ),
    ]
}

fn cmd_period(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(label) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: period <month|year|range> [from] [to]".into(),
        ));
    };
    let period = Period::parse(label).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "unknown period `{}` (expected month, year or range)",
            label
        ))
    })?;

    if period != Period::Range && args.len() > 1 {
        return Err(CommandError::InvalidArguments(
            "only `period range` accepts dates".into(),
        ));
    }
    if let Some(from) = args.get(1) {
        let from = parse_date(from, context.today())?;
        context.store.set_from_date(from);
    }
    if let Some(to) = args.get(2) {
        let to = parse_date(to, context.today())?;
        context.store.set_to_date(to);
    }

    context.store.set_period(period);
    show_filter(context);
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let action = args.first().map(|arg| arg.to_lowercase());
    match action.as_deref() {
        None | Some("show") => {
            show_filter(context);
            Ok(())
        }
        Some("reset") => {
            context.store.reset_filters();
            io::print_success("Filters reset to the current month.");
            Ok(())
        }
        Some(bound @ ("from" | "to")) => {
            let value = match args.get(1) {
                Some(raw) => parse_date(raw, context.today())?,
                None => String::new(),
            };
            if bound == "from" {
                context.store.set_from_date(value);
            } else {
                context.store.set_to_date(value);
            }
            if context.store.filters().period != Period::Range {
                io::print_hint("Bounds only apply after `period range`.");
            }
            show_filter(context);
            Ok(())
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown filter action `{}`",
            other
        ))),
    }
}

fn show_filter(context: &ShellContext) {
    let filters = context.store.filters();
    let range = context.store.date_range(context.clock.as_ref());
    let describe = |value: &str| {
        if value.is_empty() {
            "(unset)".to_string()
        } else {
            value.to_string()
        }
    };
    io::print_info(format!("Period : {}", filters.period));
    io::print_info(format!("From   : {}", describe(&filters.from)));
    io::print_info(format!("To     : {}", describe(&filters.to)));
    io::print_info(format!(
        "Active : {} to {}",
        context.display_date(&range.from),
        context.display_date(&range.to)
    ));
}
