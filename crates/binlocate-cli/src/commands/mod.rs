pub mod exec;
pub mod real;
pub mod resolve;
pub mod version;
pub mod which;

use binlocate_core::ResolveError;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

/// Schema version of every `--json` payload; bump on breaking field changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Exit code for resolution and usage errors.
pub const EXIT_ERROR: i32 = 1;

/// Exit code when the binary to run does not exist.
pub const EXIT_NOT_FOUND: i32 = 127;

/// Error info for JSON output.
#[derive(Serialize)]
pub struct ErrorInfo {
    pub code: String,
    pub errno: String,
    pub message: String,
}

impl From<&ResolveError> for ErrorInfo {
    fn from(err: &ResolveError) -> Self {
        Self {
            code: err.code().to_string(),
            errno: err.errno().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Serialize)]
struct Failure {
    ok: bool,
    error: ErrorInfo,
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{text}");
    Ok(())
}

/// Report `err` and exit with `code`.
pub fn fail(err: &ResolveError, json: bool, code: i32) -> ! {
    if json {
        let failure = Failure {
            ok: false,
            error: ErrorInfo::from(err),
        };
        if let Ok(text) = serde_json::to_string_pretty(&failure) {
            println!("{text}");
        }
    } else {
        eprintln!("error: {err}");
    }
    std::process::exit(code);
}
