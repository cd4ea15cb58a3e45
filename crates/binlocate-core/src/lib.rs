#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]

//! binlocate core: find the real file behind npm/pnpm/yarn launchers.
//!
//! ```no_run
//! use binlocate_core::{BinResolver, Platform, WhichOptions};
//!
//! let resolver = BinResolver::new(Platform::current());
//! if let Some(real) = resolver.which("pnpm", &WhichOptions::nothrow())? {
//!     println!("{}", real.display());
//! }
//! # Ok::<(), binlocate_core::ResolveError>(())
//! ```

pub mod binpath;
pub mod config;
pub mod error;
pub mod fs;
pub mod paths;
pub mod platform;

pub use binpath::{
    find_real_bin, find_real_npm, find_real_pnpm, find_real_yarn, is_shadow_bin_path,
    resolve_bin_path, resolve_bin_path_async, which, which_all, which_all_async, which_async,
    BinClass, BinFinder, BinResolver, KnownLocations, PathSearch, WhichOptions,
};
pub use config::Config;
pub use error::{codes, ResolveError, Result};
pub use fs::{FileSystem, MemoryFs, OsFs};
pub use platform::Platform;
