//! Saving answers to disk.

use anyhow::{Context, Result};
use malachite::natural::Natural;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Append `answer` in decimal, followed by a newline, to the file at `path`.
/// The file is created if it doesn't exist.
///
/// # Errors
/// Returns an error if the file can't be opened or written.
pub fn append_answer(path: &Path, answer: &Natural) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {} for appending", path.display()))?;
    writeln!(file, "{answer}")
        .with_context(|| format!("Failed to write answer to {}", path.display()))?;
    Ok(())
}
