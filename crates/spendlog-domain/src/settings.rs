//! Process-wide configuration persisted alongside the expense list.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::category::{CustomCategory, DEFAULT_CATEGORIES};
use crate::common::{Identifiable, NamedEntity};

/// Display currencies supported by the formatter.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    RUB,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::USD, Currency::EUR, Currency::RUB];

    pub fn code(self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::RUB => "RUB",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::RUB => "₽",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCurrency(pub String);

impl fmt::Display for UnknownCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported currency `{}` (expected USD, EUR or RUB)", self.0)
    }
}

impl std::error::Error for UnknownCurrency {}

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "RUB" => Ok(Currency::RUB),
            _ => Err(UnknownCurrency(value.to_string())),
        }
    }
}

/// Currency choice plus category definitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub currency: Currency,
    #[serde(default = "Settings::default_categories")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub custom_categories: Vec<CustomCategory>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            categories: Self::default_categories(),
            custom_categories: Vec::new(),
        }
    }
}

impl Settings {
    pub fn default_categories() -> Vec<String> {
        DEFAULT_CATEGORIES.iter().map(|name| name.to_string()).collect()
    }

    pub fn custom_category(&self, id: &str) -> Option<&CustomCategory> {
        self.custom_categories.iter().find(|cat| cat.id() == id)
    }

    /// Built-in names followed by custom names, in display order.
    pub fn all_category_names(&self) -> Vec<&str> {
        self.categories
            .iter()
            .map(String::as_str)
            .chain(self.custom_categories.iter().map(NamedEntity::name))
            .collect()
    }

    /// Case-insensitive check across built-in and custom names.
    pub fn has_category_named(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        self.all_category_names()
            .iter()
            .any(|existing| existing.to_lowercase() == needle)
    }
}
