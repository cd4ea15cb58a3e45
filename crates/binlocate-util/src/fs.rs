use std::fs;
use std::io;
use std::path::Path;

/// UTF-8 byte order mark, as written by some Windows editors and PowerShell.
const UTF8_BOM: char = '\u{FEFF}';

/// Read a file to string, replacing invalid UTF-8 sequences with the replacement character.
///
/// Wrapper scripts generated on Windows are not guaranteed to be UTF-8, and a
/// single stray byte must not make an otherwise readable shim unparseable.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_to_string_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a wrapper script as text: lossy UTF-8 with a leading BOM removed.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_script(path: &Path) -> io::Result<String> {
    let text = read_to_string_lossy(path)?;
    Ok(strip_bom(&text).to_owned())
}

/// Strip a leading byte order mark from `text`, if present.
#[must_use]
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(UTF8_BOM).unwrap_or(text)
}

/// Whether `path` exists and is a regular file (symlinks are followed).
#[must_use]
pub fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_file())
}
