//! Locating the globally installed package managers.
//!
//! Inside `npm run` scripts PATH starts with the project's
//! `node_modules/.bin`, which may hold a locally installed copy (or a stub)
//! of npm/pnpm/yarn. These helpers look past it. Results are the paths as
//! found, not resolved.

use super::resolve::BinResolver;
use crate::paths;
use crate::platform::Platform;
use std::path::{Path, PathBuf};

/// Well-known install roots, taken from the environment by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownLocations {
    pub home: Option<PathBuf>,
    /// `%APPDATA%`
    pub app_data: Option<PathBuf>,
    /// `%LOCALAPPDATA%`
    pub local_app_data: Option<PathBuf>,
}

impl KnownLocations {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            home: dirs_next::home_dir(),
            app_data: std::env::var_os("APPDATA").map(PathBuf::from),
            local_app_data: std::env::var_os("LOCALAPPDATA").map(PathBuf::from),
        }
    }

    /// Places pnpm is commonly installed, in preference order.
    #[must_use]
    pub fn pnpm_paths(&self, platform: Platform) -> Vec<PathBuf> {
        if platform.is_windows() {
            let mut out = Vec::new();
            if let Some(app_data) = &self.app_data {
                out.extend(under(app_data, &["npm/pnpm.cmd", "npm/pnpm"]));
            }
            if let Some(local) = &self.local_app_data {
                out.extend(under(local, &["pnpm/pnpm.cmd", "pnpm/pnpm"]));
            }
            out.push(PathBuf::from("C:/Program Files/nodejs/pnpm.cmd"));
            out.push(PathBuf::from("C:/Program Files/nodejs/pnpm"));
            out
        } else {
            let mut out = vec![
                PathBuf::from("/usr/local/bin/pnpm"),
                PathBuf::from("/usr/bin/pnpm"),
            ];
            if let Some(home) = &self.home {
                out.extend(under(home, &[".local/share/pnpm/pnpm", ".pnpm/pnpm"]));
            }
            out
        }
    }

    /// Places yarn is commonly installed, in preference order.
    #[must_use]
    pub fn yarn_paths(&self, platform: Platform) -> Vec<PathBuf> {
        if platform.is_windows() {
            let mut out = Vec::new();
            if let Some(app_data) = &self.app_data {
                out.extend(under(app_data, &["npm/yarn.cmd", "npm/yarn"]));
            }
            if let Some(local) = &self.local_app_data {
                out.extend(under(local, &["Yarn/bin/yarn.cmd"]));
            }
            out.push(PathBuf::from("C:/Program Files (x86)/Yarn/bin/yarn.cmd"));
            out.push(PathBuf::from("C:/Program Files/nodejs/yarn.cmd"));
            out
        } else {
            let mut out = vec![
                PathBuf::from("/usr/local/bin/yarn"),
                PathBuf::from("/usr/bin/yarn"),
            ];
            if let Some(home) = &self.home {
                out.extend(under(
                    home,
                    &[".yarn/bin/yarn", ".config/yarn/global/node_modules/.bin/yarn"],
                ));
            }
            out
        }
    }
}

fn under(root: &Path, rels: &[&str]) -> Vec<PathBuf> {
    let root = paths::from_path(root);
    rels.iter()
        .map(|rel| PathBuf::from(paths::join_resolve(&root, rel)))
        .collect()
}

/// Whether `dir` is a project-local `node_modules/.bin` directory.
#[must_use]
pub fn is_shadow_bin_path(dir: impl AsRef<Path>) -> bool {
    paths::is_shadow_bin_dir(&paths::from_path(dir.as_ref()))
}

fn in_shadow_dir(bin: &Path) -> bool {
    bin.parent().is_some_and(is_shadow_bin_path)
}

impl BinResolver {
    /// First existing path in `common_paths`, else the first PATH match that
    /// is not inside a `node_modules/.bin` (falling back to a shadowed one).
    #[must_use]
    pub fn find_real_bin(&self, name: &str, common_paths: &[PathBuf]) -> Option<PathBuf> {
        if let Some(found) = common_paths.iter().find(|p| self.fs().exists(p)) {
            return Some(found.clone());
        }

        let first = self.finder().find(name)?;
        if !in_shadow_dir(&first) {
            return Some(first);
        }
        let alternative = self
            .finder()
            .find_all(name)
            .into_iter()
            .find(|p| !in_shadow_dir(p));
        Some(alternative.unwrap_or(first))
    }

    /// The npm that belongs to the `node` on PATH, else a system npm.
    #[must_use]
    pub fn find_real_npm(&self) -> Option<PathBuf> {
        if let Some(node) = self.finder().find("node") {
            let dir = paths::dirname(&paths::from_path(&node));
            let names: &[&str] = if self.platform().is_windows() {
                &["npm.cmd", "npm"]
            } else {
                &["npm"]
            };
            for name in names {
                let npm = PathBuf::from(format!("{dir}/{name}"));
                if self.fs().exists(&npm) {
                    return Some(npm);
                }
            }
        }

        let common = [
            PathBuf::from("/usr/local/bin/npm"),
            PathBuf::from("/usr/bin/npm"),
        ];
        self.find_real_bin("npm", &common)
    }

    #[must_use]
    pub fn find_real_pnpm(&self, locations: &KnownLocations) -> Option<PathBuf> {
        self.find_real_bin("pnpm", &locations.pnpm_paths(self.platform()))
    }

    #[must_use]
    pub fn find_real_yarn(&self, locations: &KnownLocations) -> Option<PathBuf> {
        self.find_real_bin("yarn", &locations.yarn_paths(self.platform()))
    }
}

/// [`BinResolver::find_real_bin`] on the host.
#[must_use]
pub fn find_real_bin(name: &str, common_paths: &[PathBuf]) -> Option<PathBuf> {
    BinResolver::default().find_real_bin(name, common_paths)
}

/// [`BinResolver::find_real_npm`] on the host.
#[must_use]
pub fn find_real_npm() -> Option<PathBuf> {
    BinResolver::default().find_real_npm()
}

/// [`BinResolver::find_real_pnpm`] on the host.
#[must_use]
pub fn find_real_pnpm() -> Option<PathBuf> {
    BinResolver::default().find_real_pnpm(&KnownLocations::from_env())
}

/// [`BinResolver::find_real_yarn`] on the host.
#[must_use]
pub fn find_real_yarn() -> Option<PathBuf> {
    BinResolver::default().find_real_yarn(&KnownLocations::from_env())
}
