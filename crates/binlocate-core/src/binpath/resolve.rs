//! Resolver orchestration.
//!
//! `classify -> volta -> {windows | posix} -> canonicalize`.

use super::classify::{Candidate, WindowsExtension};
use super::lookup::{BinFinder, PathSearch};
use super::matcher::MatcherCache;
use super::shim::{rule_for, BinClass, PatternExtractor, ShimExtractor, ShimKind};
use super::volta;
use crate::error::{ResolveError, Result};
use crate::fs::{FileSystem, OsFs};
use crate::paths;
use crate::platform::Platform;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Layout some CI setup actions leave behind: the shim nested one level too deep.
const CI_PNPM_MARKER: &str = "/.bin/pnpm/bin/";

/// Interpreters whose scripts count as wrappers on POSIX.
const SHELLS: &[&str] = &["sh", "bash", "dash", "zsh", "ksh"];

/// Resolves binaries and wrapper scripts to the file that actually runs.
///
/// Cloning is cheap; clones share the filesystem, PATH finder and compiled
/// patterns.
#[derive(Debug, Clone)]
pub struct BinResolver {
    platform: Platform,
    fs: Arc<dyn FileSystem>,
    finder: Arc<dyn BinFinder>,
    matchers: Arc<MatcherCache>,
}

impl Default for BinResolver {
    fn default() -> Self {
        Self::new(Platform::current())
    }
}

impl BinResolver {
    /// Resolver for `platform` over the host filesystem and process `PATH`.
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            fs: Arc::new(OsFs),
            finder: Arc::new(PathSearch::default()),
            matchers: Arc::new(MatcherCache::new()),
        }
    }

    /// Replace the filesystem.
    pub fn with_fs(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    /// Replace the PATH finder.
    pub fn with_finder(mut self, finder: impl BinFinder + 'static) -> Self {
        self.finder = Arc::new(finder);
        self
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    #[must_use]
    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    #[must_use]
    pub fn finder(&self) -> &dyn BinFinder {
        self.finder.as_ref()
    }

    #[must_use]
    pub fn matchers(&self) -> &MatcherCache {
        &self.matchers
    }

    /// Resolve `bin_path` to the canonical path of the script or executable
    /// it ultimately runs.
    ///
    /// Resolving an already resolved path returns it unchanged.
    pub fn resolve(&self, bin_path: impl AsRef<Path>) -> Result<PathBuf> {
        let bin_path = bin_path.as_ref();
        if bin_path.as_os_str().is_empty() {
            return Err(ResolveError::io(bin_path, io::ErrorKind::NotFound.into()));
        }
        let candidate = Candidate::from_path(bin_path, self.platform);

        if let Some(real) = volta::resolve_volta_bin(self.fs(), &candidate) {
            return self.canonicalize(Path::new(&real));
        }

        let target = if self.platform.is_windows() {
            PathBuf::from(self.resolve_windows(&candidate)?)
        } else {
            self.resolve_posix(candidate)?
        };
        self.canonicalize(&target)
    }

    /// [`BinResolver::resolve`] on the blocking thread pool.
    pub async fn resolve_async(&self, bin_path: impl Into<PathBuf>) -> Result<PathBuf> {
        let resolver = self.clone();
        let bin_path = bin_path.into();
        run_blocking(move || resolver.resolve(bin_path)).await
    }

    fn resolve_windows(&self, candidate: &Candidate) -> Result<String> {
        let kind = match WindowsExtension::of(&candidate.extension) {
            WindowsExtension::Shim(kind) => kind,
            WindowsExtension::Source | WindowsExtension::Native => {
                return Ok(candidate.normalized.clone())
            }
            WindowsExtension::Unsupported => {
                return Err(ResolveError::unsupported_extension(
                    &candidate.raw,
                    &candidate.extension,
                ))
            }
        };

        let dir = candidate.dir();
        if candidate.class == BinClass::NpmOrNpx {
            let bundled = format!("{dir}/node_modules/npm/bin/{}-cli.js", candidate.name_key);
            if self.fs.exists(Path::new(&bundled)) {
                return Ok(bundled);
            }
        }

        let source = self.read_wrapper(Path::new(&candidate.normalized))?;
        match self.extract(Platform::Windows, kind, candidate, &source) {
            Some(rel) => Ok(paths::join_resolve(&dir, &rel)),
            None => Err(ResolveError::not_resolved(&candidate.raw, &source)),
        }
    }

    /// The file to canonicalize. Anything that is not an unwrapped shim keeps
    /// the caller's path untouched.
    fn resolve_posix(&self, candidate: Candidate) -> Result<PathBuf> {
        if !candidate.extension.is_empty() || !candidate.class.is_package_manager() {
            return Ok(candidate.path);
        }

        let candidate = match self.ci_layout_fix(&candidate) {
            Some(fixed) => Candidate::classify(&fixed, Platform::Posix),
            None => candidate,
        };

        let source = self.read_wrapper(&candidate.path)?;
        let rel = self
            .extract(Platform::Posix, ShimKind::Sh, &candidate, &source)
            .map(|rel| {
                if candidate.name_key == "pnpm" && rel.starts_with("pnpm/") {
                    format!("../{rel}")
                } else {
                    rel
                }
            });

        match rel {
            Some(rel) => Ok(PathBuf::from(paths::join_resolve(&candidate.dir(), &rel))),
            None if is_shell_script(&source) => {
                Err(ResolveError::not_resolved(&candidate.raw, &source))
            }
            // Not a wrapper at all, e.g. a symlink straight to npm-cli.js.
            None => Ok(candidate.path),
        }
    }

    /// `.../.bin/pnpm/bin/pnpm` -> `.../.bin/pnpm` when that is a regular file.
    fn ci_layout_fix(&self, candidate: &Candidate) -> Option<String> {
        if candidate.class != BinClass::PnpmOrYarn {
            return None;
        }
        let idx = candidate.normalized.find(CI_PNPM_MARKER)?;
        let base = &candidate.normalized[..idx + CI_PNPM_MARKER.len() - "/bin/".len()];
        self.fs.is_file(Path::new(base)).then(|| base.to_string())
    }

    fn extract(
        &self,
        platform: Platform,
        kind: ShimKind,
        candidate: &Candidate,
        source: &str,
    ) -> Option<String> {
        let rule = rule_for(platform, kind, candidate.class)?;
        PatternExtractor::new(rule, candidate.cli_var(), &self.matchers).extract(source)
    }

    fn read_wrapper(&self, path: &Path) -> Result<String> {
        self.fs
            .read_to_string(path)
            .map_err(|e| ResolveError::io(path, e))
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        let real = self
            .fs
            .canonicalize(path)
            .map_err(|e| ResolveError::io(path, e))?;
        if self.platform.is_windows() {
            Ok(PathBuf::from(paths::from_path(&real)))
        } else {
            Ok(real)
        }
    }
}

/// Resolve `bin_path` for the host platform.
pub fn resolve_bin_path(bin_path: impl AsRef<Path>) -> Result<PathBuf> {
    BinResolver::default().resolve(bin_path)
}

/// Async [`resolve_bin_path`].
pub async fn resolve_bin_path_async(bin_path: impl Into<PathBuf>) -> Result<PathBuf> {
    BinResolver::default().resolve_async(bin_path).await
}

/// Whether a wrapper's shebang names a shell.
fn is_shell_script(source: &str) -> bool {
    let Some(line) = source.lines().next().and_then(|l| l.strip_prefix("#!")) else {
        return false;
    };
    let mut words = line.split_whitespace();
    let Some(program) = words.next() else {
        return false;
    };
    let mut interpreter = paths::basename(program);
    if interpreter == "env" {
        interpreter = words
            .find(|w| !w.starts_with('-'))
            .map_or("", paths::basename);
    }
    SHELLS.contains(&interpreter)
}

/// Run blocking resolver work on tokio's blocking pool.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result,
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(err) => Err(ResolveError::io(
            PathBuf::new(),
            io::Error::new(io::ErrorKind::Interrupted, err.to_string()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::codes;
    use crate::fs::MemoryFs;

    const YARN_CMD: &str = "@ECHO off\r\nIF EXIST \"%dp0%\\node.exe\" (\r\n  SET \"_prog=%dp0%\\node.exe\"\r\n)\r\nendLocal & \"%_prog%\"  \"%dp0%\\node_modules\\yarn\\bin\\yarn.js\" %*\r\n";
    const PNPM_SH: &str = "#!/bin/sh\nbasedir=$(dirname \"$(echo \"$0\" | sed -e 's,\\\\,/,g')\")\nif [ -x \"$basedir/node\" ]; then\n  exec \"$basedir/node\"  \"$basedir/../pnpm/bin/pnpm.cjs\" \"$@\"\nelse\n  exec node  \"$basedir/../pnpm/bin/pnpm.cjs\" \"$@\"\nfi\n";

    fn windows(fs: MemoryFs) -> BinResolver {
        BinResolver::new(Platform::Windows).with_fs(fs)
    }

    fn posix(fs: MemoryFs) -> BinResolver {
        BinResolver::new(Platform::Posix).with_fs(fs)
    }

    #[test]
    fn test_windows_npm_fast_path_skips_wrapper() {
        // The wrapper content would not match; the fast path must not read it.
        let fs = MemoryFs::new()
            .with_file("C:/Program Files/nodejs/npm.cmd", "garbage")
            .with_file(
                "C:/Program Files/nodejs/node_modules/npm/bin/npm-cli.js",
                "",
            );
        let resolved = windows(fs)
            .resolve(r"C:\Program Files\nodejs\npm.cmd")
            .unwrap();
        assert_eq!(
            resolved,
            PathBuf::from("C:/Program Files/nodejs/node_modules/npm/bin/npm-cli.js")
        );
    }

    #[test]
    fn test_windows_npx_cmd_wrapper_is_case_insensitive() {
        let source = "@ECHO OFF\r\nSET \"NPX_CLI_JS=%~dp0\\..\\lib\\npm\\bin\\npx-cli.js\"\r\n";
        let fs = MemoryFs::new()
            .with_file("C:/tools/bin/NPX.CMD", source)
            .with_file("C:/tools/lib/npm/bin/npx-cli.js", "");
        let resolved = windows(fs).resolve(r"C:\tools\bin\NPX.CMD").unwrap();
        assert_eq!(resolved, PathBuf::from("C:/tools/lib/npm/bin/npx-cli.js"));
    }

    #[test]
    fn test_windows_npm_cmd_pointing_elsewhere() {
        let source = "@ECHO off\r\nSET \"NPM_CLI_JS=%~dp0\\..\\lib\\npm\\bin\\npm-cli.js\"\r\n";
        let fs = MemoryFs::new()
            .with_file("C:/tools/bin/npm.cmd", source)
            .with_file("C:/tools/lib/npm/bin/npm-cli.js", "");
        let resolved = windows(fs).resolve("C:/tools/bin/npm.cmd").unwrap();
        assert_eq!(resolved, PathBuf::from("C:/tools/lib/npm/bin/npm-cli.js"));
    }

    #[test]
    fn test_windows_cmd_shim_for_yarn() {
        let fs = MemoryFs::new()
            .with_file("C:/Users/dev/AppData/Roaming/npm/yarn.cmd", YARN_CMD)
            .with_file(
                "C:/Users/dev/AppData/Roaming/npm/node_modules/yarn/bin/yarn.js",
                "",
            );
        let resolved = windows(fs)
            .resolve(r"C:\Users\dev\AppData\Roaming\npm\yarn.cmd")
            .unwrap();
        assert_eq!(
            resolved,
            PathBuf::from("C:/Users/dev/AppData/Roaming/npm/node_modules/yarn/bin/yarn.js")
        );
    }

    #[test]
    fn test_windows_ps1_generic_shim() {
        let source = "& \"$basedir/node$exe\"  \"$basedir/../typescript/bin/tsc\" $args\n";
        let fs = MemoryFs::new()
            .with_file("C:/proj/node_modules/.bin/tsc.ps1", source)
            .with_file("C:/proj/node_modules/typescript/bin/tsc", "");
        let resolved = windows(fs).resolve("C:/proj/node_modules/.bin/tsc.ps1").unwrap();
        assert_eq!(resolved, PathBuf::from("C:/proj/node_modules/typescript/bin/tsc"));
    }

    #[test]
    fn test_windows_unmatched_wrapper_is_not_resolved() {
        let fs = MemoryFs::new().with_file("C:/tools/foo.cmd", "@echo off\r\nfoo.exe %*\r\n");
        let err = windows(fs).resolve("C:/tools/foo.cmd").unwrap_err();
        assert_eq!(err.code(), codes::BIN_NOT_RESOLVED);
        assert!(err.to_string().contains("C:/tools/foo.cmd"));
        assert!(err.to_string().contains("foo.exe %*"));
    }

    #[test]
    fn test_windows_extension_handling() {
        let fs = MemoryFs::new()
            .with_file("C:/tools/run.bat", "")
            .with_file("C:/tools/cli.mjs", "")
            .with_file("C:/tools/native.EXE", "");
        let resolver = windows(fs);

        let err = resolver.resolve("C:/tools/run.bat").unwrap_err();
        assert_eq!(err.code(), codes::BIN_UNSUPPORTED_EXTENSION);

        assert_eq!(
            resolver.resolve(r"C:\tools\cli.mjs").unwrap(),
            PathBuf::from("C:/tools/cli.mjs")
        );
        assert_eq!(
            resolver.resolve("C:/tools/native.EXE").unwrap(),
            PathBuf::from("C:/tools/native.EXE")
        );
    }

    #[test]
    fn test_posix_pnpm_cmd_shim() {
        let fs = MemoryFs::new()
            .with_file("/usr/local/bin/pnpm", PNPM_SH)
            .with_symlink("/usr/local/pnpm", "lib/node_modules/pnpm")
            .with_file("/usr/local/lib/node_modules/pnpm/bin/pnpm.cjs", "");
        let resolved = posix(fs).resolve("/usr/local/bin/pnpm").unwrap();
        assert_eq!(
            resolved,
            PathBuf::from("/usr/local/lib/node_modules/pnpm/bin/pnpm.cjs")
        );
    }

    #[test]
    fn test_posix_resolution_is_idempotent() {
        let fs = MemoryFs::new()
            .with_file("/usr/local/bin/pnpm", PNPM_SH)
            .with_symlink("/usr/local/pnpm", "lib/node_modules/pnpm")
            .with_file("/usr/local/lib/node_modules/pnpm/bin/pnpm.cjs", "");
        let resolver = posix(fs);
        let once = resolver.resolve("/usr/local/bin/pnpm").unwrap();
        let twice = resolver.resolve(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_posix_pnpm_relative_repair() {
        let source = "#!/bin/sh\nexec node $basedir/pnpm/bin/pnpm.cjs \"$@\"\n";
        let fs = MemoryFs::new()
            .with_file("/ci/node_modules/.bin/pnpm", source)
            .with_file("/ci/node_modules/pnpm/bin/pnpm.cjs", "");
        let resolved = posix(fs).resolve("/ci/node_modules/.bin/pnpm").unwrap();
        assert_eq!(resolved, PathBuf::from("/ci/node_modules/pnpm/bin/pnpm.cjs"));
    }

    #[test]
    fn test_posix_ci_nested_layout_is_corrected() {
        let source = "#!/bin/sh\nexec node \"$basedir/../pnpm/bin/pnpm.cjs\" \"$@\"\n";
        let fs = MemoryFs::new()
            .with_file("/ci/node_modules/.bin/pnpm", source)
            .with_file("/ci/node_modules/pnpm/bin/pnpm.cjs", "");
        let resolved = posix(fs)
            .resolve("/ci/node_modules/.bin/pnpm/bin/pnpm")
            .unwrap();
        assert_eq!(resolved, PathBuf::from("/ci/node_modules/pnpm/bin/pnpm.cjs"));
    }

    #[test]
    fn test_posix_npm_own_launcher() {
        let source = "#!/usr/bin/env bash\nCLI_BASEDIR=\"$(dirname \"$0\")\"\nNPM_CLI_JS=\"$CLI_BASEDIR/node_modules/npm/bin/npm-cli.js\"\n";
        let fs = MemoryFs::new()
            .with_file("/opt/node/bin/npm", source)
            .with_file("/opt/node/bin/node_modules/npm/bin/npm-cli.js", "");
        let resolved = posix(fs).resolve("/opt/node/bin/npm").unwrap();
        assert_eq!(
            resolved,
            PathBuf::from("/opt/node/bin/node_modules/npm/bin/npm-cli.js")
        );
    }

    #[test]
    fn test_posix_symlinked_npm_passes_through() {
        let fs = MemoryFs::new()
            .with_file(
                "/usr/lib/node_modules/npm/bin/npm-cli.js",
                "#!/usr/bin/env node\nrequire('../lib/cli.js')(process)\n",
            )
            .with_symlink("/usr/bin/npm", "../lib/node_modules/npm/bin/npm-cli.js");
        let resolved = posix(fs).resolve("/usr/bin/npm").unwrap();
        assert_eq!(
            resolved,
            PathBuf::from("/usr/lib/node_modules/npm/bin/npm-cli.js")
        );
    }

    #[test]
    fn test_posix_unmatched_shell_wrapper_fails() {
        let fs = MemoryFs::new().with_file("/usr/bin/yarn", "#!/bin/bash\nexec /opt/yarn \"$@\"\n");
        let err = posix(fs).resolve("/usr/bin/yarn").unwrap_err();
        assert_eq!(err.code(), codes::BIN_NOT_RESOLVED);
    }

    #[test]
    fn test_posix_generic_binaries_are_not_read() {
        // Unreadable as a file, but still resolvable as a path.
        let fs = MemoryFs::new().with_dir("/usr/bin/eslint");
        let resolved = posix(fs).resolve("/usr/bin/eslint").unwrap();
        assert_eq!(resolved, PathBuf::from("/usr/bin/eslint"));
    }

    #[test]
    fn test_not_a_directory_is_rewrapped() {
        let source = "#!/bin/sh\nexec node \"$basedir/../pnpm/bin/pnpm.cjs\" \"$@\"\n";
        let fs = MemoryFs::new()
            .with_file("/usr/local/bin/pnpm", source)
            .with_file("/usr/local/pnpm", "not a directory");
        let err = posix(fs).resolve("/usr/local/bin/pnpm").unwrap_err();
        assert_eq!(err.code(), codes::BIN_NOT_A_DIRECTORY);
        assert_eq!(err.errno(), "ENOTDIR");
        assert!(err
            .to_string()
            .contains("not a directory: /usr/local/pnpm/bin/pnpm.cjs"));
    }

    #[test]
    fn test_missing_target_keeps_os_error() {
        let fs = MemoryFs::new().with_file("/usr/local/bin/pnpm", PNPM_SH);
        let err = posix(fs).resolve("/usr/local/bin/pnpm").unwrap_err();
        assert_eq!(err.code(), codes::BIN_IO);
        assert_eq!(err.errno(), "ENOENT");
    }

    #[test]
    fn test_volta_takes_precedence() {
        let root = "/home/dev/.volta";
        let fs = MemoryFs::new()
            .with_file(&format!("{root}/bin/npm"), "ELF")
            .with_file(
                &format!("{root}/tools/user/platform.json"),
                r#"{"node": {"runtime": "20.11.0", "npm": "10.2.4"}}"#,
            )
            .with_file(&format!("{root}/tools/image/npm/10.2.4/bin/npm-cli.js"), "");
        let resolved = posix(fs).resolve(format!("{root}/bin/npm")).unwrap();
        assert_eq!(
            resolved,
            PathBuf::from(format!("{root}/tools/image/npm/10.2.4/bin/npm-cli.js"))
        );
    }

    #[test]
    fn test_broken_volta_manifest_falls_back_to_shim() {
        let root = "/home/dev/.volta";
        let fs = MemoryFs::new()
            .with_file(&format!("{root}/bin/pnpm"), PNPM_SH)
            .with_file(&format!("{root}/tools/user/bin/pnpm.json"), "{\"package\": ")
            .with_file(&format!("{root}/pnpm/bin/pnpm.cjs"), "");
        let resolved = posix(fs).resolve(format!("{root}/bin/pnpm")).unwrap();
        assert_eq!(resolved, PathBuf::from(format!("{root}/pnpm/bin/pnpm.cjs")));
    }

    #[test]
    fn test_empty_input_is_not_found() {
        let err = posix(MemoryFs::new()).resolve("").unwrap_err();
        assert_eq!(err.code(), codes::BIN_IO);
        assert_eq!(err.errno(), "ENOENT");

        let err = windows(MemoryFs::new()).resolve("").unwrap_err();
        assert_eq!(err.errno(), "ENOENT");
    }

    #[test]
    fn test_patterns_compiled_once_per_resolver() {
        let fs = MemoryFs::new()
            .with_file("/usr/local/bin/pnpm", PNPM_SH)
            .with_symlink("/usr/local/pnpm", "lib/node_modules/pnpm")
            .with_file("/usr/local/lib/node_modules/pnpm/bin/pnpm.cjs", "");
        let resolver = posix(fs);
        resolver.resolve("/usr/local/bin/pnpm").unwrap();
        let compiled = resolver.matchers().len();
        assert!(compiled > 0);
        resolver.clone().resolve("/usr/local/bin/pnpm").unwrap();
        assert_eq!(resolver.matchers().len(), compiled);
    }

    #[test]
    fn test_is_shell_script() {
        assert!(is_shell_script("#!/bin/sh\n"));
        assert!(is_shell_script("#!/usr/bin/env bash\n"));
        assert!(is_shell_script("#!/usr/bin/env -S zsh -f\n"));
        assert!(!is_shell_script("#!/usr/bin/env node\n"));
        assert!(!is_shell_script("\u{7f}ELF"));
        assert!(!is_shell_script(""));
    }

    #[tokio::test]
    async fn test_resolve_async_matches_sync() {
        let fs = MemoryFs::new()
            .with_file("/usr/local/bin/pnpm", PNPM_SH)
            .with_symlink("/usr/local/pnpm", "lib/node_modules/pnpm")
            .with_file("/usr/local/lib/node_modules/pnpm/bin/pnpm.cjs", "");
        let resolver = posix(fs);
        let sync = resolver.resolve("/usr/local/bin/pnpm").unwrap();
        let async_result = resolver.resolve_async("/usr/local/bin/pnpm").await.unwrap();
        assert_eq!(sync, async_result);
    }

    #[cfg(unix)]
    #[test]
    fn test_real_filesystem_pnpm_layout() {
        use std::os::unix::fs::symlink;
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let prefix = dir.path().join("usr/local");
        std::fs::create_dir_all(prefix.join("bin")).unwrap();
        std::fs::create_dir_all(prefix.join("lib/node_modules/pnpm/bin")).unwrap();
        std::fs::write(prefix.join("lib/node_modules/pnpm/bin/pnpm.cjs"), "").unwrap();
        std::fs::write(prefix.join("bin/pnpm"), PNPM_SH).unwrap();
        symlink("lib/node_modules/pnpm", prefix.join("pnpm")).unwrap();

        let resolved = BinResolver::new(Platform::Posix)
            .resolve(prefix.join("bin/pnpm"))
            .unwrap();
        let expected =
            dunce::canonicalize(prefix.join("lib/node_modules/pnpm/bin/pnpm.cjs")).unwrap();
        assert_eq!(resolved, expected);
    }

    #[cfg(unix)]
    #[test]
    fn test_backslash_in_posix_file_name_resolves_to_itself() {
        use crate::binpath::lookup::WhichOptions;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let real_dir = dunce::canonicalize(dir.path()).unwrap();
        let tool = real_dir.join("a\\b");
        std::fs::write(&tool, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let resolver = BinResolver::new(Platform::Posix);
        assert_eq!(resolver.resolve(&tool).unwrap(), tool);

        let resolver = resolver.with_finder(PathSearch::new().with_path(real_dir.as_os_str()));
        assert_eq!(
            resolver.which("a\\b", &WhichOptions::default()).unwrap(),
            Some(tool)
        );
    }

    // macOS refuses file names that are not valid UTF-8.
    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_posix_file_name_resolves_to_itself() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let real_dir = dunce::canonicalize(dir.path()).unwrap();
        let tool = real_dir.join(OsStr::from_bytes(b"tool\xff"));
        std::fs::write(&tool, "").unwrap();

        let resolved = BinResolver::new(Platform::Posix).resolve(&tool).unwrap();
        assert_eq!(resolved, tool);
    }
}
