//! spendlog-domain
//!
//! Pure domain models (Expense, CustomCategory, Settings, Filter, derived views).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod expense;
pub mod filter;
pub mod report;
pub mod settings;

pub use category::*;
pub use common::*;
pub use expense::*;
pub use filter::*;
pub use report::*;
pub use settings::*;
