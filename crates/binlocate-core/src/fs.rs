//! Filesystem capability used by the resolver.
//!
//! The resolver only ever reads: wrapper contents, existence checks and
//! `realpath`. [`OsFs`] is the real implementation; [`MemoryFs`] is an
//! immutable in-memory tree used to exercise Windows layouts on any host.

use crate::paths;
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// Symlink hops followed before giving up (matches Linux `MAXSYMLINKS`).
const MAX_SYMLINK_HOPS: usize = 40;

/// Read-only filesystem operations needed for resolution.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait FileSystem: Send + Sync + std::fmt::Debug {
    /// Read a text file, lossily decoded with any UTF-8 BOM removed.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn exists(&self, path: &Path) -> bool;

    /// True only for regular files (after following symlinks).
    fn is_file(&self, path: &Path) -> bool;

    /// Resolve symlinks and `..` into an absolute path.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// The host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl FileSystem for OsFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        binlocate_util::fs::read_script(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        binlocate_util::fs::is_regular_file(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        // dunce drops the `\\?\` verbatim prefix on Windows when it is safe to.
        dunce::canonicalize(path)
    }
}

/// Parse a JSON file, treating a missing or malformed file as absent.
pub fn read_json_lenient<T: DeserializeOwned>(fs: &dyn FileSystem, path: &Path) -> Option<T> {
    let text = fs.read_to_string(path).ok()?;
    serde_json::from_str(&text).ok()
}

/// In-memory filesystem keyed by slash-normalized absolute paths.
///
/// Built once through the `with_*` methods and never mutated afterwards, so
/// it needs no locking. Parent directories are created implicitly.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: HashMap<String, String>,
    dirs: HashSet<String>,
    symlinks: HashMap<String, String>,
}

impl MemoryFs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a regular file.
    #[must_use]
    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        let path = paths::normalize_path(path);
        self.add_parents(&path);
        self.files.insert(path, contents.to_string());
        self
    }

    /// Add a symlink. Relative targets resolve against the link's directory.
    #[must_use]
    pub fn with_symlink(mut self, path: &str, target: &str) -> Self {
        let path = paths::normalize_path(path);
        self.add_parents(&path);
        self.symlinks.insert(path, paths::normalize_slashes(target));
        self
    }

    /// Add an empty directory.
    #[must_use]
    pub fn with_dir(mut self, path: &str) -> Self {
        let path = paths::normalize_path(path);
        self.add_parents(&path);
        self.dirs.insert(path);
        self
    }

    fn add_parents(&mut self, path: &str) {
        let mut parent = paths::dirname(path);
        loop {
            if !self.dirs.insert(parent.clone()) {
                break;
            }
            let next = paths::dirname(&parent);
            if next == parent {
                break;
            }
            parent = next;
        }
    }

    fn realpath(&self, path: &str) -> io::Result<String> {
        let normalized = paths::normalize_slashes(path);
        let (root, rest) = paths::split_root(&normalized);
        if !root.ends_with('/') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not an absolute path: {path}"),
            ));
        }

        let mut root = root.to_string();
        let mut resolved: Vec<String> = Vec::new();
        let mut pending = push_segments(Vec::new(), rest);
        let mut hops = 0;

        while let Some(segment) = pending.pop() {
            match segment.as_str() {
                "" | "." => continue,
                ".." => {
                    resolved.pop();
                    continue;
                }
                _ => {}
            }

            resolved.push(segment);
            let current = format!("{root}{}", resolved.join("/"));

            if let Some(target) = self.symlinks.get(&current) {
                hops += 1;
                if hops > MAX_SYMLINK_HOPS {
                    return Err(io::Error::other(format!(
                        "too many levels of symbolic links: {path}"
                    )));
                }
                resolved.pop();
                let (target_root, target_rest) = paths::split_root(target);
                if target_root.ends_with('/') {
                    root = target_root.to_string();
                    resolved.clear();
                }
                pending = push_segments(pending, target_rest);
            } else if self.files.contains_key(&current) {
                if pending.iter().any(|s| !s.is_empty() && s != ".") {
                    return Err(io::Error::new(
                        io::ErrorKind::NotADirectory,
                        format!("not a directory: {current}"),
                    ));
                }
            } else if !self.dirs.contains(&current) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such file or directory: {current}"),
                ));
            }
        }

        Ok(format!("{root}{}", resolved.join("/")))
    }
}

/// Push `rest`'s segments so that popping yields them in path order.
fn push_segments(mut stack: Vec<String>, rest: &str) -> Vec<String> {
    stack.extend(rest.split('/').rev().map(str::to_string));
    stack
}

impl FileSystem for MemoryFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let real = self.realpath(&paths::from_path(path))?;
        match self.files.get(&real) {
            Some(contents) => Ok(binlocate_util::fs::strip_bom(contents).to_string()),
            None => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {real}"),
            )),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.realpath(&paths::from_path(path)).is_ok()
    }

    fn is_file(&self, path: &Path) -> bool {
        self.realpath(&paths::from_path(path))
            .is_ok_and(|real| self.files.contains_key(&real))
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        self.realpath(&paths::from_path(path)).map(PathBuf::from)
    }
}
