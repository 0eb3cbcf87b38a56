//! View filter state: the selected period and optional custom bounds.

use std::fmt;

use serde::{de::Deserializer, Deserialize, Serialize};

/// Time window used to select which expenses are aggregated.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Month,
    Year,
    Range,
}

impl Period {
    /// Parses a period label, falling back to [`Period::Month`] for anything
    /// unrecognised.
    pub fn from_str_lossy(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    /// Strict variant used where unknown labels should be reported.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "month" => Some(Period::Month),
            "year" => Some(Period::Year),
            "range" => Some(Period::Range),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Month => "month",
            Period::Year => "year",
            Period::Range => "range",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .map(|raw| Period::from_str_lossy(&raw))
            .unwrap_or_default())
    }
}

/// Ephemeral filter selection. `from`/`to` only matter for [`Period::Range`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Filter {
    pub period: Period,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

/// Concrete inclusive bounds as ISO date strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

impl DateRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_period_falls_back_to_month() {
        assert_eq!(Period::from_str_lossy("quarter"), Period::Month);
        assert_eq!(Period::from_str_lossy(" YEAR "), Period::Year);
        let parsed: Period = serde_json::from_str("\"weekly\"").unwrap();
        assert_eq!(parsed, Period::Month);
        let parsed: Period = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, Period::Month);
    }

    #[test]
    fn default_filter_is_current_month_without_bounds() {
        let filter = Filter::default();
        assert_eq!(filter.period, Period::Month);
        assert!(filter.from.is_empty());
        assert!(filter.to.is_empty());
    }
}
