//! Binary path resolution.
//!
//! Turns a binary name or a path to a launcher (`npm.cmd`, a cmd-shim shell
//! script, a Volta shim) into the script or executable that actually runs.
//!
//! ## Pipeline
//!
//! 1. [`Candidate::classify`] splits the path into extension, basename and
//!    [`BinClass`].
//! 2. Paths under a `.volta` directory are looked up in Volta's manifests.
//! 3. On Windows, `.cmd`/`.ps1`/extensionless wrappers are unwrapped through
//!    the [`shim`] pattern table. On POSIX only `npm`, `npx`, `pnpm` and
//!    `yarn` shell wrappers are inspected.
//! 4. The result is canonicalized.
//!
//! [`BinResolver::which`] runs a PATH search first.

pub mod classify;
pub mod lookup;
pub mod matcher;
pub mod real;
pub mod resolve;
pub mod shim;
pub mod volta;

pub use classify::{Candidate, WindowsExtension};
pub use lookup::{
    which, which_all, which_all_async, which_async, BinFinder, PathSearch, WhichOptions,
};
pub use matcher::MatcherCache;
pub use real::{
    find_real_bin, find_real_npm, find_real_pnpm, find_real_yarn, is_shadow_bin_path,
    KnownLocations,
};
pub use resolve::{resolve_bin_path, resolve_bin_path_async, BinResolver};
pub use shim::{rule_for, BinClass, PatternExtractor, ShimExtractor, ShimKind, ShimRule};
