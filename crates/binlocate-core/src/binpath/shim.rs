//! Wrapper-script formats and the patterns that unwrap them.
//!
//! Each rule maps `(platform, shim kind, binary class)` to an ordered list of
//! patterns. Capture group 1 of the first pattern that matches is the path
//! of the real script, relative to the wrapper's directory.

use super::matcher::MatcherCache;
use crate::platform::Platform;
use std::borrow::Cow;

/// Which family of binary a candidate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinClass {
    NpmOrNpx,
    PnpmOrYarn,
    Generic,
}

impl BinClass {
    /// Classify a basename (without extension). Callers lowercase it first
    /// where the platform is case-insensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "npm" | "npx" => Self::NpmOrNpx,
            "pnpm" | "yarn" => Self::PnpmOrYarn,
            _ => Self::Generic,
        }
    }

    #[must_use]
    pub fn is_package_manager(self) -> bool {
        !matches!(self, Self::Generic)
    }
}

/// Wrapper-script flavour, keyed off the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShimKind {
    /// Batch file (`.cmd`).
    Cmd,
    /// PowerShell (`.ps1`).
    Ps1,
    /// Extensionless shell script.
    Sh,
}

impl ShimKind {
    /// Map a lowercased extension (with dot) to a shim kind.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            ".cmd" => Some(Self::Cmd),
            ".ps1" => Some(Self::Ps1),
            "" => Some(Self::Sh),
            _ => None,
        }
    }
}

// cmd-shim `.cmd`: `"%dp0%\node_modules\yarn\bin\yarn.js" %*`
const CMD_SHIM_CMD: &str = r#""%dp0%\\([^"]+)"\s*%\*"#;
// Older generators: `"%~dp0\node_modules\yarn\bin\yarn.js" %*`
const CMD_TILDE_DP0: &str = r#""%~dp0\\([^"]+)"\s*%\*"#;
// npm's own `npm.cmd`/`npx.cmd`: `SET "NPM_CLI_JS=%~dp0\node_modules\npm\bin\npm-cli.js"`
const NPM_CMD: &str = r#""{CLI}_CLI_JS=%~dp0\\([^"]+)""#;
// cmd-shim sh: `exec "$basedir/node"  "$basedir/../pnpm/bin/pnpm.cjs" "$@"`
const CMD_SHIM_SH: &str = r#""\$basedir/([^"]+)"\s+"\$@""#;
// Hand-written launchers: `exec node "$basedir/../lib/cli.js" "$@"`
const NODE_EXEC_SH: &str = r#"exec\s+node\s+"\$basedir/([^"]+)"\s+"\$@""#;
// CI setup actions emit the script path unquoted.
const CI_SH: &str = r#"\$basedir/([^"\s]+\.c?js)\s+"\$@""#;
// npm's own sh launcher: `NPM_CLI_JS="$CLI_BASEDIR/node_modules/npm/bin/npm-cli.js"`
const NPM_SH: &str = r#"{CLI}_CLI_JS="\$(?:CLI_BASEDIR|basedir)/([^"]+)""#;
// npm's own ps1 launcher: `$NPM_CLI_JS="$PSScriptRoot/node_modules/npm/bin/npm-cli.js"`
const NPM_PS1: &str = r#"\${CLI}_CLI_JS="\$PSScriptRoot/([^"]+)""#;
// cmd-shim pwsh: `& "$basedir/node$exe"  "$basedir/node_modules/yarn/bin/yarn.js" $args`
const CMD_SHIM_PS1: &str = r#""\$basedir/([^"]+)"\s+\$args"#;

/// Placeholder replaced with `NPM` or `NPX`.
const CLI_PLACEHOLDER: &str = "{CLI}";

/// One row of the shim table.
#[derive(Debug)]
pub struct ShimRule {
    pub platform: Platform,
    pub kind: ShimKind,
    pub class: BinClass,
    pub patterns: &'static [&'static str],
}

impl ShimRule {
    /// Batch files are matched case-insensitively.
    #[must_use]
    pub fn case_insensitive(&self) -> bool {
        self.kind == ShimKind::Cmd
    }
}

macro_rules! rule {
    ($platform:ident, $kind:ident, $class:ident, [$($pattern:expr),+ $(,)?]) => {
        ShimRule {
            platform: Platform::$platform,
            kind: ShimKind::$kind,
            class: BinClass::$class,
            patterns: &[$($pattern),+],
        }
    };
}

static SHIM_RULES: &[ShimRule] = &[
    rule!(Windows, Cmd, NpmOrNpx, [NPM_CMD]),
    rule!(Windows, Cmd, PnpmOrYarn, [CMD_SHIM_CMD, CMD_TILDE_DP0]),
    rule!(Windows, Cmd, Generic, [CMD_SHIM_CMD]),
    rule!(Windows, Sh, NpmOrNpx, [NPM_SH, CMD_SHIM_SH]),
    rule!(Windows, Sh, PnpmOrYarn, [NODE_EXEC_SH, CMD_SHIM_SH]),
    rule!(Windows, Sh, Generic, [CMD_SHIM_SH]),
    rule!(Windows, Ps1, NpmOrNpx, [NPM_PS1]),
    rule!(Windows, Ps1, PnpmOrYarn, [CMD_SHIM_PS1]),
    rule!(Windows, Ps1, Generic, [CMD_SHIM_PS1]),
    rule!(Posix, Sh, NpmOrNpx, [CMD_SHIM_SH, NPM_SH]),
    rule!(Posix, Sh, PnpmOrYarn, [NODE_EXEC_SH, CMD_SHIM_SH, CI_SH]),
];

/// Look up the rule for a wrapper, if that combination is ever unwrapped.
#[must_use]
pub fn rule_for(platform: Platform, kind: ShimKind, class: BinClass) -> Option<&'static ShimRule> {
    SHIM_RULES
        .iter()
        .find(|r| r.platform == platform && r.kind == kind && r.class == class)
}

/// Pulls the relative real-script path out of a wrapper's source.
pub trait ShimExtractor {
    fn extract(&self, source: &str) -> Option<String>;
}

/// [`ShimExtractor`] over a [`ShimRule`]'s patterns.
#[derive(Debug)]
pub struct PatternExtractor<'a> {
    rule: &'static ShimRule,
    cli: &'a str,
    cache: &'a MatcherCache,
}

impl<'a> PatternExtractor<'a> {
    /// `cli` fills the `NPM`/`NPX` slot of npm's own launchers.
    #[must_use]
    pub fn new(rule: &'static ShimRule, cli: &'a str, cache: &'a MatcherCache) -> Self {
        Self { rule, cli, cache }
    }

    fn instantiate(&self, pattern: &'static str) -> Cow<'static, str> {
        if pattern.contains(CLI_PLACEHOLDER) {
            Cow::Owned(pattern.replace(CLI_PLACEHOLDER, self.cli))
        } else {
            Cow::Borrowed(pattern)
        }
    }
}

impl ShimExtractor for PatternExtractor<'_> {
    fn extract(&self, source: &str) -> Option<String> {
        for pattern in self.rule.patterns {
            let pattern = self.instantiate(pattern);
            let Ok(regex) = self
                .cache
                .get_or_compile(&pattern, self.rule.case_insensitive())
            else {
                continue;
            };
            if let Some(rel) = regex.captures(source).and_then(|c| c.get(1)) {
                return Some(rel.as_str().to_string());
            }
        }
        None
    }
}
