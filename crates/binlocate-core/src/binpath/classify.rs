//! Candidate classification: extension, basename and binary class.

use super::shim::{BinClass, ShimKind};
use crate::paths;
use crate::platform::Platform;
use std::path::{Path, PathBuf};

/// Script extensions that are already the real entry point.
const SOURCE_EXTENSIONS: &[&str] = &[".js", ".cjs", ".mjs", ".ts", ".cts", ".mts"];

/// A path handed to the resolver, broken down for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Input exactly as given.
    pub path: PathBuf,
    /// Lossy text of `path`, for messages.
    pub raw: String,
    /// `.`/`..` collapsed; backslashes become `/` on Windows only.
    pub normalized: String,
    /// Lowercased extension including the dot, or empty.
    pub extension: String,
    /// File name without extension, original case.
    pub basename: String,
    /// `basename` as used for comparisons (lowercased on Windows).
    pub name_key: String,
    pub class: BinClass,
}

impl Candidate {
    /// Classify `raw`. Never fails.
    #[must_use]
    pub fn classify(raw: &str, platform: Platform) -> Self {
        Self::from_path(Path::new(raw), platform)
    }

    /// Classify a path without assuming it is valid UTF-8.
    #[must_use]
    pub fn from_path(path: &Path, platform: Platform) -> Self {
        let raw = path.to_string_lossy().into_owned();
        let (normalized, file_name) = if platform.is_windows() {
            let normalized = paths::normalize_path(&raw);
            let file_name = paths::basename(&normalized).to_string();
            (normalized, file_name)
        } else {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            (paths::normalize_posix_path(&raw), file_name)
        };
        let (stem, extension) = paths::split_extension(&file_name);
        let extension = extension.to_ascii_lowercase();
        let basename = stem.to_string();
        let name_key = if platform.is_windows() {
            basename.to_ascii_lowercase()
        } else {
            basename.clone()
        };
        let class = BinClass::from_name(&name_key);

        Self {
            path: path.to_path_buf(),
            raw,
            normalized,
            extension,
            basename,
            name_key,
            class,
        }
    }

    /// Directory holding the candidate.
    #[must_use]
    pub fn dir(&self) -> String {
        paths::dirname(&self.normalized)
    }

    #[must_use]
    pub fn is_node(&self) -> bool {
        self.name_key == "node"
    }

    /// Variable prefix npm's launchers use for this binary (`NPM`/`NPX`).
    #[must_use]
    pub fn cli_var(&self) -> &'static str {
        if self.name_key == "npx" {
            "NPX"
        } else {
            "NPM"
        }
    }
}

/// How the Windows branch treats an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowsExtension {
    /// A wrapper that has to be unwrapped.
    Shim(ShimKind),
    /// A script run directly by node.
    Source,
    /// A native executable.
    Native,
    Unsupported,
}

impl WindowsExtension {
    #[must_use]
    pub fn of(extension: &str) -> Self {
        if let Some(kind) = ShimKind::from_extension(extension) {
            Self::Shim(kind)
        } else if SOURCE_EXTENSIONS.contains(&extension) {
            Self::Source
        } else if extension == ".exe" {
            Self::Native
        } else {
            Self::Unsupported
        }
    }
}
