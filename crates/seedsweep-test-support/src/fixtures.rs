//! Scratch directory helpers.

use std::fs;
use std::io;
use std::path::Path;

use tempfile::TempDir;

/// Create a fresh scratch directory that is removed on drop.
///
/// # Errors
///
/// Returns an error if the temporary directory cannot be created.
pub fn scratch_dir() -> io::Result<TempDir> {
    tempfile::Builder::new().prefix("seedsweep-").tempdir()
}

/// Populate `dir` with entries.
///
/// A name ending in `/` becomes a directory holding one small file; any other
/// name becomes a regular file.
///
/// # Errors
///
/// Returns an error if any entry cannot be written.
pub fn populate(dir: &Path, entries: &[&str]) -> io::Result<()> {
    for entry in entries {
        if let Some(folder) = entry.strip_suffix('/') {
            let path = dir.join(folder);
            fs::create_dir_all(&path)?;
            fs::write(path.join("payload.bin"), b"payload")?;
        } else {
            fs::write(dir.join(entry), b"payload")?;
        }
    }
    Ok(())
}

/// Sorted names of the direct children of `dir`.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed.
pub fn entry_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.file_name().to_string_lossy().into_owned()))
        .collect::<io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}
