//! `binlocate real` command implementation.

use super::{fail, print_json, EXIT_ERROR, SCHEMA_VERSION};
use binlocate_core::{Config, KnownLocations, ResolveError};
use miette::Result;
use serde::Serialize;

#[derive(Serialize)]
struct RealOutput {
    ok: bool,
    schema_version: u32,
    name: String,
    path: String,
}

/// Locate the globally installed `name`, looking past `node_modules/.bin`.
pub fn run(config: &Config, name: &str, json: bool) -> Result<()> {
    let resolver = config.resolver();
    let locations = KnownLocations::from_env();

    let found = match name {
        "npm" => resolver.find_real_npm(),
        "pnpm" => resolver.find_real_pnpm(&locations),
        "yarn" => resolver.find_real_yarn(&locations),
        other => resolver.find_real_bin(other, &[]),
    };

    let Some(path) = found else {
        fail(&ResolveError::not_found_in_path(name), json, EXIT_ERROR);
    };

    tracing::debug!(binary = name, path = %path.display(), "found");

    if json {
        print_json(&RealOutput {
            ok: true,
            schema_version: SCHEMA_VERSION,
            name: name.to_string(),
            path: path.display().to_string(),
        })
    } else {
        println!("{}", path.display());
        Ok(())
    }
}
