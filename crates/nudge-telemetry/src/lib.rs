//! Analytics records and the session event log

mod log;
mod paths;
mod types;

pub use log::{atomic_write, EventLog, TelemetryError};
pub use paths::Paths;
pub use types::PromptRecord;
