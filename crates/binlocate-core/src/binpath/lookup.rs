//! PATH search feeding the resolver.

use super::resolve::{run_blocking, BinResolver};
use crate::error::{ResolveError, Result};
use std::ffi::OsString;
use std::path::PathBuf;

/// Finds executables by name.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait BinFinder: Send + Sync + std::fmt::Debug {
    /// Every match, in search order.
    fn find_all(&self, name: &str) -> Vec<PathBuf>;

    /// The first match.
    fn find(&self, name: &str) -> Option<PathBuf> {
        self.find_all(name).into_iter().next()
    }
}

/// `PATH` search via the `which` crate.
///
/// Unset fields fall back to the process `PATH` and working directory at
/// lookup time.
#[derive(Debug, Clone, Default)]
pub struct PathSearch {
    path: Option<OsString>,
    cwd: Option<PathBuf>,
}

impl PathSearch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Search this `PATH` value instead of the process one.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<OsString>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Resolve relative names against `cwd`.
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    fn search_path(&self) -> Option<OsString> {
        self.path.clone().or_else(|| std::env::var_os("PATH"))
    }

    fn cwd(&self) -> PathBuf {
        self.cwd
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl BinFinder for PathSearch {
    fn find_all(&self, name: &str) -> Vec<PathBuf> {
        which::which_in_all(name, self.search_path(), self.cwd())
            .map(|matches| matches.collect())
            .unwrap_or_default()
    }

    fn find(&self, name: &str) -> Option<PathBuf> {
        which::which_in(name, self.search_path(), self.cwd()).ok()
    }
}

/// Options for [`BinResolver::which`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WhichOptions {
    /// Return `Ok(None)` instead of an error when nothing is found.
    pub nothrow: bool,
}

impl WhichOptions {
    #[must_use]
    pub fn nothrow() -> Self {
        Self { nothrow: true }
    }
}

impl BinResolver {
    /// Find `name` on PATH and resolve the first match.
    ///
    /// `nothrow` only covers "not found"; a match that fails to resolve is
    /// still an error.
    pub fn which(&self, name: &str, options: &WhichOptions) -> Result<Option<PathBuf>> {
        match self.finder().find(name) {
            Some(found) => self.resolve(found).map(Some),
            None if options.nothrow => Ok(None),
            None => Err(ResolveError::not_found_in_path(name)),
        }
    }

    /// Find every match of `name` on PATH and resolve each one.
    ///
    /// Matches that resolve to the same file are reported once, first
    /// occurrence wins.
    pub fn which_all(&self, name: &str, options: &WhichOptions) -> Result<Option<Vec<PathBuf>>> {
        let found = self.finder().find_all(name);
        if found.is_empty() {
            return if options.nothrow {
                Ok(None)
            } else {
                Err(ResolveError::not_found_in_path(name))
            };
        }

        let mut resolved: Vec<PathBuf> = Vec::with_capacity(found.len());
        for path in found {
            let real = self.resolve(&path)?;
            if !resolved.contains(&real) {
                resolved.push(real);
            }
        }
        Ok(Some(resolved))
    }

    /// [`BinResolver::which`] on the blocking thread pool.
    pub async fn which_async(&self, name: &str, options: WhichOptions) -> Result<Option<PathBuf>> {
        let resolver = self.clone();
        let name = name.to_string();
        run_blocking(move || resolver.which(&name, &options)).await
    }

    /// [`BinResolver::which_all`] on the blocking thread pool.
    pub async fn which_all_async(
        &self,
        name: &str,
        options: WhichOptions,
    ) -> Result<Option<Vec<PathBuf>>> {
        let resolver = self.clone();
        let name = name.to_string();
        run_blocking(move || resolver.which_all(&name, &options)).await
    }
}

/// Search the process PATH for `name` and resolve it for the host platform.
pub fn which(name: &str, options: &WhichOptions) -> Result<Option<PathBuf>> {
    BinResolver::default().which(name, options)
}

/// Every PATH match of `name`, resolved for the host platform.
pub fn which_all(name: &str, options: &WhichOptions) -> Result<Option<Vec<PathBuf>>> {
    BinResolver::default().which_all(name, options)
}

/// Async [`which`].
pub async fn which_async(name: &str, options: WhichOptions) -> Result<Option<PathBuf>> {
    BinResolver::default().which_async(name, options).await
}

/// Async [`which_all`].
pub async fn which_all_async(name: &str, options: WhichOptions) -> Result<Option<Vec<PathBuf>>> {
    BinResolver::default().which_all_async(name, options).await
}

/// Finder over a fixed table.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct StaticFinder(std::collections::HashMap<String, Vec<PathBuf>>);

#[cfg(test)]
impl StaticFinder {
    pub(crate) fn with(mut self, name: &str, paths: &[&str]) -> Self {
        self.0
            .insert(name.to_string(), paths.iter().map(PathBuf::from).collect());
        self
    }
}

#[cfg(test)]
impl BinFinder for StaticFinder {
    fn find_all(&self, name: &str) -> Vec<PathBuf> {
        self.0.get(name).cloned().unwrap_or_default()
    }
}
