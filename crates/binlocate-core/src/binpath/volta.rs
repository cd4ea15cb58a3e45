//! Volta-managed binaries.
//!
//! Volta puts its own launcher on PATH (`~/.volta/bin/npm`), which is useless
//! as a script path. The real tool lives in Volta's image directory and is
//! located through the manifests under `tools/user/`.

use super::classify::Candidate;
use super::shim::BinClass;
use crate::fs::{read_json_lenient, FileSystem};
use serde::Deserialize;
use std::path::Path;

const VOLTA_SEGMENT: &str = "/.volta/";

/// `tools/user/platform.json`.
#[derive(Debug, Default, Deserialize)]
struct PlatformManifest {
    #[serde(default)]
    node: Option<NodeEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct NodeEntry {
    #[serde(default)]
    runtime: Option<String>,
    #[serde(default)]
    npm: Option<String>,
}

/// `tools/user/bin/<name>.json`.
#[derive(Debug, Deserialize)]
struct PackageBin {
    package: String,
}

/// Volta root (`.../.volta`) if the path lies inside one.
#[must_use]
pub fn volta_root(normalized: &str) -> Option<&str> {
    normalized
        .to_ascii_lowercase()
        .find(VOLTA_SEGMENT)
        .map(|idx| &normalized[..idx + VOLTA_SEGMENT.len() - 1])
}

/// Locate the real file behind a Volta launcher.
///
/// Returns `None` when the candidate is not under Volta or nothing could be
/// found; ordinary shim resolution then carries on.
#[must_use]
pub fn resolve_volta_bin(fs: &dyn FileSystem, candidate: &Candidate) -> Option<String> {
    if candidate.is_node() {
        return None;
    }
    let root = volta_root(&candidate.normalized)?;
    let image = format!("{root}/tools/image");
    let name = &candidate.name_key;

    let options = if candidate.class == BinClass::NpmOrNpx {
        npm_locations(fs, root, &image, name)?
    } else {
        let manifest = format!("{root}/tools/user/bin/{name}.json");
        let bin: PackageBin = read_json_lenient(fs, Path::new(&manifest))?;
        let base = format!("{image}/packages/{}/bin/{name}", bin.package);
        let cmd = format!("{base}.cmd");
        vec![base, cmd]
    };

    options.into_iter().find(|p| fs.exists(Path::new(p)))
}

fn npm_locations(fs: &dyn FileSystem, root: &str, image: &str, name: &str) -> Option<Vec<String>> {
    let manifest = format!("{root}/tools/user/platform.json");
    let node = read_json_lenient::<PlatformManifest>(fs, Path::new(&manifest))?.node?;
    let script = format!("{name}-cli.js");

    let mut options = Vec::with_capacity(3);
    if let Some(npm) = node.npm.as_deref() {
        options.push(format!("{image}/npm/{npm}/bin/{script}"));
    }
    if let Some(runtime) = node.runtime.as_deref() {
        options.push(format!("{image}/node/{runtime}/lib/node_modules/npm/bin/{script}"));
        // Windows node images have no lib/ level.
        options.push(format!("{image}/node/{runtime}/node_modules/npm/bin/{script}"));
    }
    Some(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;
    use crate::platform::Platform;

    const ROOT: &str = "/home/dev/.volta";

    fn candidate(path: &str) -> Candidate {
        Candidate::classify(path, Platform::Posix)
    }

    #[test]
    fn test_volta_root() {
        assert_eq!(volta_root("/home/dev/.volta/bin/npm"), Some(ROOT));
        assert_eq!(
            volta_root("C:/Users/Dev/.Volta/bin/npm.exe"),
            Some("C:/Users/Dev/.Volta")
        );
        assert_eq!(volta_root("/usr/local/bin/npm"), None);
        assert_eq!(volta_root("/home/dev/.volta-old/bin/npm"), None);
    }

    #[test]
    fn test_pinned_npm_image() {
        let fs = MemoryFs::new()
            .with_file(
                &format!("{ROOT}/tools/user/platform.json"),
                r#"{"node": {"runtime": "20.11.0", "npm": "10.2.4"}}"#,
            )
            .with_file(&format!("{ROOT}/tools/image/npm/10.2.4/bin/npx-cli.js"), "");

        assert_eq!(
            resolve_volta_bin(&fs, &candidate(&format!("{ROOT}/bin/npx"))),
            Some(format!("{ROOT}/tools/image/npm/10.2.4/bin/npx-cli.js"))
        );
    }

    #[test]
    fn test_missing_npm_image_falls_back_to_bundled_npm() {
        let bundled =
            format!("{ROOT}/tools/image/node/20.11.0/lib/node_modules/npm/bin/npm-cli.js");
        let fs = MemoryFs::new()
            .with_file(
                &format!("{ROOT}/tools/user/platform.json"),
                r#"{"node": {"runtime": "20.11.0", "npm": "10.2.4"}}"#,
            )
            .with_file(&bundled, "");

        assert_eq!(
            resolve_volta_bin(&fs, &candidate(&format!("{ROOT}/bin/npm"))),
            Some(bundled)
        );
    }

    #[test]
    fn test_unpinned_npm_uses_windows_node_layout() {
        let root = "C:/Users/dev/AppData/Local/Volta/.volta";
        let bundled = format!("{root}/tools/image/node/18.19.0/node_modules/npm/bin/npm-cli.js");
        let fs = MemoryFs::new()
            .with_file(
                &format!("{root}/tools/user/platform.json"),
                r#"{"node": {"runtime": "18.19.0"}}"#,
            )
            .with_file(&bundled, "");

        let c = Candidate::classify(&format!("{root}/bin/NPM.exe"), Platform::Windows);
        assert_eq!(resolve_volta_bin(&fs, &c), Some(bundled));
    }

    #[test]
    fn test_package_bin_and_cmd_variant() {
        let fs = MemoryFs::new()
            .with_file(
                &format!("{ROOT}/tools/user/bin/tsc.json"),
                r#"{"name": "tsc", "package": "typescript"}"#,
            )
            .with_file(&format!("{ROOT}/tools/image/packages/typescript/bin/tsc.cmd"), "");

        assert_eq!(
            resolve_volta_bin(&fs, &candidate(&format!("{ROOT}/bin/tsc"))),
            Some(format!("{ROOT}/tools/image/packages/typescript/bin/tsc.cmd"))
        );
    }

    #[test]
    fn test_invalid_or_missing_manifest_is_not_found() {
        let fs =
            MemoryFs::new().with_file(&format!("{ROOT}/tools/user/platform.json"), "{ not json");
        let npm = candidate(&format!("{ROOT}/bin/npm"));
        let eslint = candidate(&format!("{ROOT}/bin/eslint"));
        assert_eq!(resolve_volta_bin(&fs, &npm), None);
        assert_eq!(resolve_volta_bin(&fs, &eslint), None);
    }

    #[test]
    fn test_node_is_never_redirected() {
        let fs = MemoryFs::new().with_file(
            &format!("{ROOT}/tools/user/bin/node.json"),
            r#"{"package": "node"}"#,
        );
        assert_eq!(resolve_volta_bin(&fs, &candidate(&format!("{ROOT}/bin/node"))), None);
    }
}
