use crate::error::{CompressionError, Result};
use std::fs;
use std::path::Path;

/// Checks that the input directory exists and has at least one entry.
///
/// Any entry counts, including hidden files and subdirectories; whether
/// any of them is a PNG is decided later by discovery.
///
/// # Errors
/// * `NotFound` if nothing exists at `input_dir`
/// * `NotADirectory` if `input_dir` is a file
/// * `Empty` if the directory has no entries
pub fn validate_input(input_dir: &Path) -> Result<()> {
    if !input_dir.exists() {
        return Err(CompressionError::NotFound(input_dir.to_path_buf()));
    }

    if !input_dir.is_dir() {
        return Err(CompressionError::NotADirectory(input_dir.to_path_buf()));
    }

    if fs::read_dir(input_dir)?.next().is_none() {
        return Err(CompressionError::Empty(input_dir.to_path_buf()));
    }

    Ok(())
}

/// Creates the output directory and any missing ancestors.
///
/// Idempotent: an existing directory is left untouched.
pub fn ensure_output_directory(output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir).map_err(|source| CompressionError::DirectoryCreationFailed {
        path: output_dir.to_path_buf(),
        source,
    })
}
