//! Shared helpers: logging, progress reporting and test fixtures

pub mod logging;
pub mod test_utils;
