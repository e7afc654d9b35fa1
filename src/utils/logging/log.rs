//! Log lines for file operations and pipeline stages

use std::path::Path;
use std::time::Duration;

/// Log the start of a file operation
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{operation}: {}", path.display());
}

/// Log a finished file operation
///
/// # Arguments
/// * `verb` - Past-tense verb for the operation ("loaded", "wrote")
/// * `path` - File that was read or written
/// * `rows` - Number of rows moved
/// * `elapsed` - Time taken, if measured
pub fn log_operation_complete(verb: &str, path: &Path, rows: usize, elapsed: Option<Duration>) {
    match elapsed {
        Some(duration) => log::info!("{verb} {rows} rows ({}) in {duration:?}", path.display()),
        None => log::info!("{verb} {rows} rows ({})", path.display()),
    }
}

/// Log the outcome of an in-memory pipeline stage
pub fn log_stage(stage: &str, rows_in: usize, rows_out: usize, elapsed: Duration) {
    log::info!("{stage}: {rows_in} rows in, {rows_out} rows out ({elapsed:?})");
}

/// Log a warning, optionally naming the file it concerns
pub fn log_warning(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{message}: {}", path.display()),
        None => log::warn!("{message}"),
    }
}
