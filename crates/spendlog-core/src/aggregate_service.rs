//! Pure aggregation over expense lists: range filtering, per-category and
//! per-day grouping, and totals.

use std::collections::{BTreeMap, HashMap};

use spendlog_domain::{
    parse_iso_date, Amounted, AnalyticsSnapshot, CategoryData, CustomCategory, DateRange, DayData,
    Expense,
};

/// Fallback chart colors, assigned by first-seen category position.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6", "#EC4899", "#06B6D4", "#84CC16",
    "#F97316", "#6366F1",
];

pub struct AggregateService;

impl AggregateService {
    /// Keeps expenses dated within the inclusive `[from, to]` interval, in input
    /// order.
    ///
    /// Fails closed: an expense whose date does not parse as `yyyy-MM-dd` is
    /// excluded from every range, and an unparseable bound matches nothing.
    pub fn filter_by_range(expenses: &[Expense], range: &DateRange) -> Vec<Expense> {
        let (Some(from), Some(to)) = (parse_iso_date(&range.from), parse_iso_date(&range.to))
        else {
            return Vec::new();
        };
        expenses
            .iter()
            .filter(|expense| {
                expense
                    .parsed_date()
                    .is_some_and(|date| date >= from && date <= to)
            })
            .cloned()
            .collect()
    }

    /// One entry per distinct category, in first-seen order.
    pub fn by_category(expenses: &[Expense], custom: &[CustomCategory]) -> Vec<CategoryData> {
        let mut order: Vec<(&str, f64)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for expense in expenses {
            let name = expense.category.as_str();
            match positions.get(name) {
                Some(&idx) => order[idx].1 += expense.amount,
                None => {
                    positions.insert(name, order.len());
                    order.push((name, expense.amount));
                }
            }
        }

        order
            .into_iter()
            .enumerate()
            .map(|(index, (name, value))| CategoryData {
                name: name.to_string(),
                value,
                color: Self::category_color(name, index, custom),
            })
            .collect()
    }

    /// Custom color for `name` when one is defined, otherwise the palette slot
    /// for its first-seen position.
    pub fn category_color(name: &str, index: usize, custom: &[CustomCategory]) -> String {
        custom
            .iter()
            .find(|category| category.name == name)
            .map(|category| category.color.clone())
            .unwrap_or_else(|| DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string())
    }

    /// One entry per distinct date, ascending.
    pub fn by_day(expenses: &[Expense]) -> Vec<DayData> {
        let mut days: BTreeMap<&str, f64> = BTreeMap::new();
        for expense in expenses {
            *days.entry(expense.date.as_str()).or_insert(0.0) += expense.amount;
        }
        days.into_iter()
            .map(|(date, total)| DayData {
                date: date.to_string(),
                total,
            })
            .collect()
    }

    pub fn total(expenses: &[Expense]) -> f64 {
        expenses.iter().map(Amounted::amount).sum()
    }

    /// Filters once and derives every view from the same subset.
    pub fn summarize(
        expenses: &[Expense],
        custom: &[CustomCategory],
        range: DateRange,
    ) -> AnalyticsSnapshot {
        let filtered = Self::filter_by_range(expenses, &range);
        AnalyticsSnapshot {
            total: Self::total(&filtered),
            by_category: Self::by_category(&filtered, custom),
            by_day: Self::by_day(&filtered),
            expenses: filtered,
            range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(amount: f64, category: &str, date: &str) -> Expense {
        Expense {
            id: format!("{category}-{date}-{amount}"),
            amount,
            category: category.into(),
            date: date.into(),
            note: None,
        }
    }

    #[test]
    fn boundary_dates_are_included() {
        let expenses = vec![
            expense(1.0, "Food", "2024-02-29"),
            expense(2.0, "Food", "2024-03-01"),
            expense(3.0, "Food", "2024-03-31"),
            expense(4.0, "Food", "2024-04-01"),
        ];
        let filtered =
            AggregateService::filter_by_range(&expenses, &DateRange::new("2024-03-01", "2024-03-31"));
        let amounts: Vec<f64> = filtered.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![2.0, 3.0]);
    }

    #[test]
    fn malformed_expense_dates_are_excluded() {
        let expenses = vec![
            expense(1.0, "Food", "03/05/2024"),
            expense(2.0, "Food", ""),
            expense(3.0, "Food", "2024-03-05"),
        ];
        let filtered =
            AggregateService::filter_by_range(&expenses, &DateRange::new("0001-01-01", "9999-12-31"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].amount, 3.0);
    }

    #[test]
    fn malformed_bounds_match_nothing() {
        let expenses = vec![expense(1.0, "Food", "2024-03-05")];
        let filtered =
            AggregateService::filter_by_range(&expenses, &DateRange::new("yesterday", "2024-12-31"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn inverted_range_is_empty() {
        let expenses = vec![expense(1.0, "Food", "2024-03-05")];
        let filtered =
            AggregateService::filter_by_range(&expenses, &DateRange::new("2024-03-31", "2024-03-01"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn custom_color_wins_and_palette_follows_first_seen_position() {
        let custom = vec![CustomCategory {
            id: "c1".into(),
            name: "Pets".into(),
            color: "#123456".into(),
        }];
        let expenses = vec![
            expense(5.0, "Travel", "2024-03-01"),
            expense(6.0, "Pets", "2024-03-02"),
            expense(7.0, "Other", "2024-03-03"),
            expense(8.0, "Travel", "2024-03-04"),
        ];
        let data = AggregateService::by_category(&expenses, &custom);
        let colors: Vec<&str> = data.iter().map(|d| d.color.as_str()).collect();
        assert_eq!(colors, vec![DEFAULT_PALETTE[0], "#123456", DEFAULT_PALETTE[2]]);
        assert_eq!(data[0].value, 13.0);
    }

    #[test]
    fn palette_wraps_after_ten_categories() {
        let expenses: Vec<Expense> = (0..12)
            .map(|idx| expense(1.0, &format!("Cat{idx}"), "2024-03-01"))
            .collect();
        let data = AggregateService::by_category(&expenses, &[]);
        assert_eq!(data[10].color, DEFAULT_PALETTE[0]);
        assert_eq!(data[11].color, DEFAULT_PALETTE[1]);
    }

    #[test]
    fn empty_input_yields_empty_views() {
        let snapshot = AggregateService::summarize(&[], &[], DateRange::new("2024-01-01", "2024-01-31"));
        assert_eq!(snapshot.total, 0.0);
        assert!(snapshot.by_category.is_empty());
        assert!(snapshot.by_day.is_empty());
        assert_eq!(snapshot.share_of_total(10.0), 0.0);
    }
}
