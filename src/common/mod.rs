//! 共通モジュール

pub mod error;
pub mod types;

pub use error::{WatchError, WatchResult};
pub use types::ServiceRecord;
