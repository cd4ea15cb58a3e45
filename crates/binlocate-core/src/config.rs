use crate::binpath::{BinResolver, PathSearch};
use crate::platform::Platform;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime configuration for the binlocate CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Current working directory.
    pub cwd: PathBuf,

    /// Whether to emit JSON logs.
    pub json_logs: bool,

    /// Verbosity level (0 = INFO, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,

    /// Which wrapper conventions to apply.
    pub platform: Platform,

    /// PATH value to search instead of the process `PATH`.
    pub search_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            json_logs: false,
            verbosity: 0,
            platform: Platform::current(),
            search_path: None,
        }
    }
}

impl Config {
    /// Create a new config with the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            ..Default::default()
        }
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON log output.
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Override the search path.
    #[must_use]
    pub fn with_search_path(mut self, search_path: Option<String>) -> Self {
        self.search_path = search_path;
        self
    }

    /// The PATH finder this config describes.
    #[must_use]
    pub fn path_search(&self) -> PathSearch {
        let search = PathSearch::new().with_cwd(self.cwd.clone());
        match &self.search_path {
            Some(path) => search.with_path(path),
            None => search,
        }
    }

    /// A resolver for this config's platform and search path.
    #[must_use]
    pub fn resolver(&self) -> BinResolver {
        BinResolver::new(self.platform).with_finder(self.path_search())
    }
}
