//! spendlog-core
//!
//! Aggregation, date-range resolution, the expense store and its storage seam.
//! Depends on spendlog-domain. No CLI, no terminal I/O, no direct file access.

pub mod aggregate_service;
pub mod date_range;
pub mod error;
pub mod format;
pub mod storage;
pub mod store;
pub mod time;

#[cfg(test)]
mod tests;

pub use aggregate_service::*;
pub use date_range::*;
pub use error::CoreError;
pub use format::*;
pub use storage::{KeyValueStore, MemoryStore, StorageAdapter, EXPENSES_KEY, SETTINGS_KEY};
pub use store::*;
pub use time::{Clock, FixedClock};
