use std::{io::Write, path::Path};

use eyre::{Result, WrapErr};

use crate::OutputEncoding;

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite
    Always,
    /// Only create if file doesn't exist
    IfMissing,
}

/// Write `content` to `path` according to the overwrite rule.
pub fn write_file_with(
    path: &Path,
    content: &str,
    encoding: OutputEncoding,
    overwrite: Overwrite,
) -> Result<WriteResult> {
    match overwrite {
        Overwrite::Always => {
            write_file(path, content, encoding)?;
            Ok(WriteResult::Written)
        }
        Overwrite::IfMissing => {
            if path.exists() {
                Ok(WriteResult::Skipped)
            } else {
                write_file(path, content, encoding)?;
                Ok(WriteResult::Written)
            }
        }
    }
}

/// Encode and write a file, creating parent directories as needed.
///
/// The content is written to a temporary file in the target directory and
/// then renamed over the destination, so readers never observe a partial file.
pub fn write_file(path: &Path, content: &str, encoding: OutputEncoding) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;

    let bytes = encoding.encode(content);
    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .wrap_err_with(|| format!("failed to create temporary file in '{}'", parent.display()))?;
    tmp.write_all(&bytes)
        .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .wrap_err_with(|| format!("failed to replace '{}'", path.display()))?;
    Ok(())
}
