//! `binlocate version` command implementation.

use super::{print_json, SCHEMA_VERSION};
use binlocate_core::Platform;
use miette::Result;
use serde::Serialize;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
struct VersionInfo {
    version: &'static str,
    schema_version: u32,
    /// Wrapper conventions in effect (`--platform` or the host).
    platform: Platform,
}

pub fn run(platform: Platform, json: bool) -> Result<()> {
    if json {
        return print_json(&VersionInfo {
            version: VERSION,
            schema_version: SCHEMA_VERSION,
            platform,
        });
    }
    println!("binlocate {VERSION} ({platform} wrappers)");
    Ok(())
}
