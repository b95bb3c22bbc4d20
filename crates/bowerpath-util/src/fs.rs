use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Read a file to string, replacing invalid UTF-8 sequences with the replacement character.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_to_string_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// List the names of every entry directly under `dir`, sorted by file name.
///
/// Files, directories and symlinks are all returned; no filtering is applied.
///
/// # Errors
/// Returns an error if `dir` cannot be read.
pub fn list_entry_names(dir: &Path) -> io::Result<Vec<OsString>> {
    let mut names = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            e.into_io_error()
                .unwrap_or_else(|| io::Error::other("directory walk failed"))
        })?;
        names.push(entry.file_name().to_os_string());
    }

    Ok(names)
}
