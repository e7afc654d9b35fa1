//! Logging and progress helpers
//!
//! Consistent log lines for pipeline stages and spinners for slow reads.

pub mod log;
pub mod progress;

pub use self::log::{log_operation_complete, log_operation_start, log_stage, log_warning};
pub use self::progress::{create_spinner, finish_and_clear, with_spinner};
