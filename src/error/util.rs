//! Utility functions for error handling
//!
//! Helpers that open files and directories with a readable error when they fail.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, SurveyError};

/// Open a file for reading, describing what it was needed for on failure
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.is_file() {
        return Err(SurveyError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("File not found: {} (needed for {purpose})", path.display()),
        )));
    }

    fs::File::open(path).map_err(|e| {
        let reason = match e.kind() {
            io::ErrorKind::PermissionDenied => "permission denied",
            _ => "failed to open",
        };
        SurveyError::Io(io::Error::new(
            e.kind(),
            format!("{}: {reason} while {purpose}: {e}", path.display()),
        ))
    })
}

/// Make sure an output directory exists, creating it if needed
pub fn ensure_directory(path: &Path, purpose: &str) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(SurveyError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} exists but is not a directory ({purpose})", path.display()),
        )));
    }

    fs::create_dir_all(path).map_err(|e| {
        SurveyError::Io(io::Error::new(
            e.kind(),
            format!("Could not create {} for {purpose}: {e}", path.display()),
        ))
    })
}
