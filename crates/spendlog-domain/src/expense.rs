//! Domain models for recorded expenses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::*;

/// ISO calendar date layout used for every persisted date string.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// One recorded transaction.
///
/// `date` is kept as the raw `yyyy-MM-dd` text; use [`Expense::parsed_date`]
/// when a calendar value is required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Expense {
    /// Materialises a draft into a stored expense with a freshly generated id.
    pub fn from_draft(draft: NewExpense) -> Self {
        Self {
            id: new_id(),
            amount: draft.amount,
            category: draft.category,
            date: draft.date,
            note: draft.note,
        }
    }

    /// Parses the stored date, returning `None` for malformed values.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.date)
    }
}

impl Identifiable for Expense {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} {} [{}]", self.date, self.category, self.id)
    }
}

/// Fields supplied by the add-expense flow; the id is assigned on insertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl NewExpense {
    pub fn new(amount: f64, category: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            date: date.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = if note.trim().is_empty() {
            None
        } else {
            Some(note)
        };
        self
    }
}

/// Strict `yyyy-MM-dd` parsing shared by filtering and input validation.
///
/// Only the zero-padded canonical form is accepted, so every date that parses
/// also groups and sorts correctly as text.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT)
        .ok()
        .filter(|date| format_iso_date(*date) == value)
}

/// Formats a calendar date in the persisted ISO layout.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_is_omitted_from_json_when_absent() {
        let expense = Expense::from_draft(NewExpense::new(12.5, "Food", "2024-03-05"));
        let json = serde_json::to_string(&expense).unwrap();
        assert!(!json.contains("note"));
    }

    #[test]
    fn legacy_record_with_short_id_deserializes() {
        let raw = r#"{"id":"k3j9x0a1b","amount":20,"category":"Food","date":"2024-03-06","note":"lunch"}"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(expense.id, "k3j9x0a1b");
        assert_eq!(expense.amount, 20.0);
        assert_eq!(expense.note.as_deref(), Some("lunch"));
    }

    #[test]
    fn malformed_dates_do_not_parse() {
        let mut expense = Expense::from_draft(NewExpense::new(1.0, "Food", "2024-13-40"));
        assert!(expense.parsed_date().is_none());
        expense.date = "2024-02-29".into();
        assert_eq!(
            expense.parsed_date(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn unpadded_or_padded_dates_are_rejected() {
        assert!(parse_iso_date("2024-3-5").is_none());
        assert!(parse_iso_date(" 2024-03-05").is_none());
        assert!(parse_iso_date("2024-03-05 ").is_none());
        assert!(parse_iso_date("+2024-03-05").is_none());
        assert_eq!(parse_iso_date("2024-03-05"), NaiveDate::from_ymd_opt(2024, 3, 5));
    }

    #[test]
    fn blank_notes_are_dropped() {
        let draft = NewExpense::new(5.0, "Other", "2024-01-01").with_note("   ");
        assert!(draft.note.is_none());
    }
}
