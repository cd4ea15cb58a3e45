//! `binlocate resolve` command implementation.

use super::{fail, print_json, EXIT_ERROR, SCHEMA_VERSION};
use binlocate_core::{paths, Config};
use miette::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ResolveOutput {
    ok: bool,
    schema_version: u32,
    input: String,
    platform: String,
    resolved: String,
    /// npm package that owns the resolved file, when under `node_modules`.
    package: Option<String>,
}

/// Resolve a path to the file it runs.
///
/// Relative inputs are taken relative to the configured working directory;
/// drive-letter paths count as absolute on every host.
pub fn run(config: &Config, bin: &Path, json: bool) -> Result<()> {
    let input = if paths::is_absolute(&bin.to_string_lossy()) {
        bin.to_path_buf()
    } else {
        config.cwd.join(bin)
    };
    let resolver = config.resolver();

    tracing::debug!(input = %input.display(), platform = %config.platform, "resolving");

    let resolved = match resolver.resolve(&input) {
        Ok(resolved) => resolved,
        Err(e) => fail(&e, json, EXIT_ERROR),
    };

    tracing::debug!(resolved = %resolved.display(), "resolved");

    if json {
        let resolved_str = paths::from_path(&resolved);
        print_json(&ResolveOutput {
            ok: true,
            schema_version: SCHEMA_VERSION,
            input: bin.display().to_string(),
            platform: config.platform.to_string(),
            package: paths::package_name_from_path(&resolved_str).map(str::to_string),
            resolved: resolved_str,
        })
    } else {
        println!("{}", resolved.display());
        Ok(())
    }
}
