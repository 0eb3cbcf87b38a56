use chrono::{DateTime, Local, NaiveDate, Utc};

use spendlog_core::Clock;

/// Wall clock. `today` follows the local calendar date so "this month"
/// matches what the user sees on their own calendar.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
