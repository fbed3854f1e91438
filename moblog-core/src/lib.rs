pub mod config;
pub mod error;
pub mod event;

pub use config::MoblogConfig;
pub use error::MoblogError;
pub use event::{LogBatch, LogEvent, ReceiptStamp};
