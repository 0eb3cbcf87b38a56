use spendlog_domain::{parse_iso_date, Currency};

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64, currency: Currency) -> String;
}

/// Formats stored ISO date strings for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: &str) -> String;
}

/// en-US style: symbol prefix, `,` grouping, up to two fraction digits with
/// trailing zeros dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardCurrencyFormatter;

impl CurrencyFormatter for StandardCurrencyFormatter {
    fn format_amount(&self, amount: f64, currency: Currency) -> String {
        format_money(amount, currency)
    }
}

/// Month/day/year without zero padding; malformed dates are shown verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct UsDateFormatter;

impl DateFormatter for UsDateFormatter {
    fn format_date(&self, date: &str) -> String {
        parse_iso_date(date)
            .map(|parsed| parsed.format("%-m/%-d/%Y").to_string())
            .unwrap_or_else(|| date.to_string())
    }
}

/// Renders `amount` in `currency`, e.g. `$1,234.5` or `-€70`.
pub fn format_money(amount: f64, currency: Currency) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    let fraction = match fraction {
        0 => String::new(),
        f if f % 10 == 0 => format!(".{}", f / 10),
        f => format!(".{:02}", f),
    };
    format!(
        "{sign}{}{}{fraction}",
        currency.symbol(),
        group_thousands(whole)
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
