#![doc(test(attr(deny(warnings))))]

//! spendlog records expenses, filters them by period, and renders category
//! and daily breakdowns from a line-oriented terminal shell.

pub mod cli;
pub mod errors;
pub mod utils;

/// Initializes global tracing once, using `default_filter` unless `RUST_LOG`
/// is set.
pub fn init(default_filter: &str) {
    utils::init_tracing(default_filter);
    tracing::debug!("spendlog tracing initialized.");
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init("spendlog=info");
        super::init("spendlog=debug");
    }
}
