//! Slash-normalized path string helpers.
//!
//! Everything here works on `/`-separated strings so that Windows-style
//! candidates (`C:\Program Files\nodejs\npm.cmd`) can be handled the same way
//! on every host. No function in this module touches the filesystem.

use std::path::Path;

const NODE_MODULES: &str = "node_modules/";
const SHADOW_BIN_DIR: &str = "node_modules/.bin";

/// Convert every backslash to a forward slash.
#[must_use]
pub fn normalize_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Lossy, slash-normalized string form of a path.
#[must_use]
pub fn from_path(path: &Path) -> String {
    normalize_slashes(&path.to_string_lossy())
}

/// Split a slash-normalized path into its root and the remainder.
///
/// Roots are `/`, `C:/`, `C:` (drive-relative), `//server/share/` (UNC) or
/// empty for relative paths.
#[must_use]
pub fn split_root(path: &str) -> (&str, &str) {
    let bytes = path.as_bytes();

    if path.starts_with("//") {
        // UNC: //server/share/rest
        let mut slashes = 0;
        for (i, b) in bytes.iter().enumerate().skip(2) {
            if *b == b'/' {
                slashes += 1;
                if slashes == 2 {
                    return path.split_at(i + 1);
                }
            }
        }
        return path.split_at(2);
    }

    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        if bytes.len() >= 3 && bytes[2] == b'/' {
            return path.split_at(3);
        }
        return path.split_at(2);
    }

    if path.starts_with('/') {
        return path.split_at(1);
    }

    ("", path)
}

/// Whether a path is absolute on either platform family.
#[must_use]
pub fn is_absolute(path: &str) -> bool {
    let path = normalize_slashes(path);
    let (root, _) = split_root(&path);
    root.ends_with('/')
}

/// Normalize slashes and collapse `.`/`..` segments and duplicate separators.
///
/// `..` never climbs above an absolute root; in relative paths leading `..`
/// segments are kept.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    collapse_segments(&normalize_slashes(path))
}

/// Like [`normalize_path`] but backslashes are kept: on POSIX they are
/// ordinary file name characters.
#[must_use]
pub fn normalize_posix_path(path: &str) -> String {
    collapse_segments(path)
}

fn collapse_segments(path: &str) -> String {
    let (root, rest) = split_root(path);
    let absolute = root.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (root.is_empty(), joined.is_empty()) {
        (true, true) => ".".to_string(),
        (true, false) => joined,
        (false, _) => format!("{root}{joined}"),
    }
}

/// Resolve `rel` against `base` the way an absolute path join does:
/// an absolute `rel` wins, otherwise the two are joined and normalized.
#[must_use]
pub fn join_resolve(base: &str, rel: &str) -> String {
    let rel = normalize_slashes(rel);
    if is_absolute(&rel) {
        return normalize_path(&rel);
    }
    let base = normalize_slashes(base);
    if base.is_empty() {
        return normalize_path(&rel);
    }
    normalize_path(&format!("{base}/{rel}"))
}

/// Parent directory of a normalized path (`.` for a bare name).
#[must_use]
pub fn dirname(path: &str) -> String {
    let path = normalize_path(path);
    let (root, rest) = split_root(&path);
    match rest.rfind('/') {
        Some(idx) => format!("{root}{}", &rest[..idx]),
        None if root.is_empty() => ".".to_string(),
        None => root.to_string(),
    }
}

/// Last path segment.
#[must_use]
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    match trimmed.rfind(['/', '\\']) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Split a bare file name into stem and extension (dot included).
///
/// A leading dot does not start an extension (`.bashrc` has none).
#[must_use]
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Extension of the last segment including the dot, or `""`.
#[must_use]
pub fn extname(path: &str) -> &str {
    split_extension(basename(path)).1
}

/// Last segment with its extension removed.
#[must_use]
pub fn file_stem(path: &str) -> &str {
    split_extension(basename(path)).0
}

/// The part of `path` after its last `node_modules/` marker.
///
/// `/p/node_modules/.pnpm/node_modules/pnpm/bin/pnpm.cjs` gives
/// `pnpm/bin/pnpm.cjs`.
#[must_use]
pub fn strip_node_modules(path: &str) -> Option<&str> {
    path.rfind(NODE_MODULES)
        .map(|idx| &path[idx + NODE_MODULES.len()..])
        .filter(|rest| !rest.is_empty())
}

/// Name of the package a path inside `node_modules` belongs to.
#[must_use]
pub fn package_name_from_path(path: &str) -> Option<&str> {
    let rest = strip_node_modules(path)?;
    let mut parts = rest.splitn(3, '/');
    let first = parts.next()?;
    if first.starts_with('@') {
        let second = parts.next()?;
        Some(&rest[..first.len() + 1 + second.len()])
    } else if first.starts_with('.') {
        None
    } else {
        Some(first)
    }
}

/// Whether `dir` is a project-local `node_modules/.bin` directory.
#[must_use]
pub fn is_shadow_bin_dir(dir: &str) -> bool {
    let dir = normalize_slashes(dir);
    let dir = dir.trim_end_matches('/');
    dir.ends_with(SHADOW_BIN_DIR) || dir.contains("/node_modules/.bin/")
}
