//! `binlocate exec` command implementation.
//!
//! Resolve a binary from node_modules/.bin or PATH, then run the real file.

use super::{fail, ErrorInfo, EXIT_ERROR, EXIT_NOT_FOUND};
use binlocate_core::{paths, BinResolver, Config, PathSearch, ResolveError, WhichOptions};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Scripts that have to be started through `node`.
const NODE_SCRIPT_EXTENSIONS: &[&str] = &[".js", ".cjs", ".mjs"];

/// Result for JSON output.
#[derive(Serialize)]
struct ExecFailure {
    ok: bool,
    binary: String,
    resolved_path: Option<String>,
    error: ErrorInfo,
}

/// Run a binary after resolving it to its real entry point.
///
/// Search order:
/// 1. `./node_modules/.bin` and every parent's `node_modules/.bin`
/// 2. The configured search path (process `PATH` by default)
pub fn run(config: &Config, binary: &str, args: &[String], json: bool) -> Result<()> {
    let search_path = search_path(&config.cwd, config.search_path.as_deref())?;
    let resolver = BinResolver::new(config.platform).with_finder(
        PathSearch::new()
            .with_path(search_path.clone())
            .with_cwd(config.cwd.clone()),
    );

    let resolved = match resolver.which(binary, &WhichOptions::nothrow()) {
        Ok(Some(resolved)) => resolved,
        Ok(None) => fail(&ResolveError::not_found_in_path(binary), json, EXIT_NOT_FOUND),
        Err(e) => fail(&e, json, EXIT_ERROR),
    };

    tracing::debug!(binary, resolved = %resolved.display(), "executing");

    let mut cmd = command_for(&resolved);
    cmd.args(args)
        .current_dir(&config.cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .env("PATH", &search_path);

    match cmd.status() {
        Ok(status) => {
            // Exit with the same code as the child process
            std::process::exit(status.code().unwrap_or(EXIT_ERROR));
        }
        Err(e) => {
            let message = format!("failed to execute '{}': {e}", resolved.display());
            if json {
                let failure = ExecFailure {
                    ok: false,
                    binary: binary.to_string(),
                    resolved_path: Some(resolved.display().to_string()),
                    error: ErrorInfo {
                        code: "EXEC_FAILED".to_string(),
                        errno: "EIO".to_string(),
                        message,
                    },
                };
                println!("{}", serde_json::to_string_pretty(&failure).into_diagnostic()?);
            } else {
                eprintln!("error: {message}");
            }
            std::process::exit(EXIT_ERROR);
        }
    }
}

/// Node scripts run through `node`; anything else is executed directly.
fn command_for(resolved: &Path) -> Command {
    let extension = paths::extname(&resolved.to_string_lossy()).to_ascii_lowercase();
    if NODE_SCRIPT_EXTENSIONS.contains(&extension.as_str()) {
        let mut cmd = Command::new("node");
        cmd.arg(resolved);
        cmd
    } else {
        Command::new(resolved)
    }
}

/// Every `node_modules/.bin` from `cwd` upwards, followed by `base` (or the
/// process `PATH`).
fn search_path(cwd: &Path, base: Option<&str>) -> Result<OsString> {
    let mut dirs: Vec<PathBuf> = Vec::new();

    let mut current = cwd.to_path_buf();
    loop {
        let bin_dir = current.join("node_modules").join(".bin");
        if bin_dir.is_dir() {
            dirs.push(bin_dir);
        }
        if !current.pop() {
            break;
        }
    }

    let base = base
        .map(OsString::from)
        .or_else(|| std::env::var_os("PATH"))
        .unwrap_or_default();
    dirs.extend(std::env::split_paths(&base));

    std::env::join_paths(dirs).into_diagnostic()
}
