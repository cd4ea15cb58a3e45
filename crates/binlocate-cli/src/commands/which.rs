//! `binlocate which` command implementation.

use super::{fail, print_json, EXIT_ERROR, SCHEMA_VERSION};
use binlocate_core::{Config, WhichOptions};
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct WhichOutput<T: Serialize> {
    ok: bool,
    schema_version: u32,
    name: String,
    resolved: Option<T>,
}

/// Search PATH for `name` and resolve what is found.
///
/// With `nothrow`, a miss prints nothing (JSON: `"resolved": null`) and
/// exits 0.
pub fn run(config: &Config, name: &str, all: bool, nothrow: bool, json: bool) -> Result<()> {
    let resolver = config.resolver();
    let options = WhichOptions { nothrow };

    tracing::debug!(binary = name, all, nothrow, "searching PATH");

    if all {
        let resolved = match resolver.which_all(name, &options) {
            Ok(resolved) => resolved,
            Err(e) => fail(&e, json, EXIT_ERROR),
        };
        tracing::debug!(matches = resolved.as_ref().map_or(0, Vec::len), "search done");
        output(name, resolved, json, |paths: &Vec<PathBuf>| {
            for path in paths {
                println!("{}", path.display());
            }
        })
    } else {
        let resolved = match resolver.which(name, &options) {
            Ok(resolved) => resolved,
            Err(e) => fail(&e, json, EXIT_ERROR),
        };
        output(name, resolved, json, |path: &PathBuf| {
            println!("{}", path.display());
        })
    }
}

fn output<T: Serialize>(
    name: &str,
    resolved: Option<T>,
    json: bool,
    print_text: impl Fn(&T),
) -> Result<()> {
    if json {
        return print_json(&WhichOutput {
            ok: true,
            schema_version: SCHEMA_VERSION,
            name: name.to_string(),
            resolved,
        });
    }
    if let Some(resolved) = &resolved {
        print_text(resolved);
    }
    Ok(())
}
