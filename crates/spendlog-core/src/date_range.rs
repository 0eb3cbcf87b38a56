//! Resolves a period selection into concrete inclusive ISO date bounds.

use chrono::{Datelike, NaiveDate};
use spendlog_domain::{format_iso_date, DateRange, Filter, Period};

use crate::time::Clock;

/// First through last calendar day of the month containing `today`.
pub fn month_bounds(today: NaiveDate) -> DateRange {
    DateRange::new(
        format_iso_date(first_of_month(today)),
        format_iso_date(last_of_month(today)),
    )
}

/// January 1st through December 31st of `today`'s year.
pub fn year_bounds(today: NaiveDate) -> DateRange {
    let year = today.year();
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today);
    let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(today);
    DateRange::new(format_iso_date(start), format_iso_date(end))
}

/// Produces the `{from, to}` pair for a period.
///
/// For [`Period::Range`] the supplied bounds are used verbatim only when both
/// are non-empty; a half-specified range falls back to the current month for
/// both bounds so `from` can never land after an implicit `to`.
pub fn resolve_date_range(period: Period, from: &str, to: &str, today: NaiveDate) -> DateRange {
    match period {
        Period::Month => month_bounds(today),
        Period::Year => year_bounds(today),
        Period::Range => {
            let (from, to) = (from.trim(), to.trim());
            if from.is_empty() || to.is_empty() {
                month_bounds(today)
            } else {
                DateRange::new(from, to)
            }
        }
    }
}

/// Resolves a filter against the clock's current date. Re-evaluated on every
/// call; nothing is cached.
pub fn resolve_filter(filter: &Filter, clock: &dyn Clock) -> DateRange {
    resolve_date_range(filter.period, &filter.from, &filter.to, clock.today())
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}
