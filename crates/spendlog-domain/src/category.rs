//! Domain types representing expense categories.

use serde::{Deserialize, Serialize};

use crate::common::*;

/// Built-in category names offered to every user.
pub const DEFAULT_CATEGORIES: [&str; 9] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Travel",
    "Education",
    "Other",
];

/// User-defined category with its own chart color.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomCategory {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl CustomCategory {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            color: color.into(),
        }
    }
}

impl Identifiable for CustomCategory {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for CustomCategory {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for CustomCategory {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.color)
    }
}

/// Returns `true` for `#RGB` or `#RRGGBB` hex colors.
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
