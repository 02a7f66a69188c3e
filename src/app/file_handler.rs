//! File system helpers for the application layer.
//!
//! Validates the edge-list path given on the command line and writes the
//! rendered report when an output file is requested. Uses the macros from the
//! parent `app` module for verbose logging.

use std::fs::OpenOptions;
use std::io::{BufWriter, Error as IoError, Write};
use std::path::Path;

use super::error::AppError;
use super::verbose_eprintln;

/// Checks that `graph_file_path` names an existing regular file and returns it
/// as a UTF-8 string for the loader.
///
/// # Errors
/// Returns `AppError::InvalidPath` if the path is missing, is not a file, or
/// is not valid UTF-8.
pub fn validate_graph_file(graph_file_path: &Path, quiet_mode: bool) -> Result<String, AppError> {
    if !graph_file_path.exists() {
        let error_msg = format!("File not found: {}", graph_file_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidPath(error_msg));
    }
    if !graph_file_path.is_file() {
        let error_msg = format!("Path is not a file: {}", graph_file_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidPath(error_msg));
    }

    graph_file_path
        .to_str()
        .map(str::to_string)
        .ok_or_else(|| {
            let error_msg = format!("Path is not valid UTF-8: {}", graph_file_path.display());
            verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
            AppError::InvalidPath(error_msg)
        })
}

/// Writes string content to a specified file, creating or overwriting it.
///
/// # Errors
/// Returns an `IoError` if opening, writing or flushing fails.
pub fn write_content_to_file(file_path: &Path, content: &str) -> Result<(), IoError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(file_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()?; // Callers read the file right after we return.
    Ok(())
}
