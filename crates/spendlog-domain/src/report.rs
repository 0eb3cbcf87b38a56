//! Derived aggregate views. Computed on demand, never persisted.

use serde::{Deserialize, Serialize};

use crate::{expense::Expense, filter::DateRange};

/// Summed spend for one category within a filtered set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryData {
    pub name: String,
    pub value: f64,
    pub color: String,
}

/// Summed spend for one calendar date within a filtered set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayData {
    pub date: String,
    pub total: f64,
}

/// Everything the summary and analytics views render for one filter.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSnapshot {
    pub range: DateRange,
    pub expenses: Vec<Expense>,
    pub total: f64,
    pub by_category: Vec<CategoryData>,
    pub by_day: Vec<DayData>,
}

impl AnalyticsSnapshot {
    pub fn transaction_count(&self) -> usize {
        self.expenses.len()
    }

    pub fn category_count(&self) -> usize {
        self.by_category.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Share of the total for a category value, in percent. Zero when the
    /// total is zero.
    pub fn share_of_total(&self, value: f64) -> f64 {
        if self.total.abs() < f64::EPSILON {
            0.0
        } else {
            value / self.total * 100.0
        }
    }
}
