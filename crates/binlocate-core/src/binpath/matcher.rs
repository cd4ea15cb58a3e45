//! Compiled-pattern cache.

use regex_lite::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MatcherKey {
    pattern: String,
    case_insensitive: bool,
}

/// Lazily compiled shim patterns, keyed by pattern text and case mode.
///
/// Insert-if-absent with no eviction; the set of patterns is a small static
/// table, so the cache is bounded by it. Two threads racing on the same key
/// both compile and the second insert overwrites an equal value.
#[derive(Debug, Default)]
pub struct MatcherCache {
    compiled: RwLock<HashMap<MatcherKey, Arc<Regex>>>,
}

impl MatcherCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the compiled form of `pattern`, compiling it on first use.
    pub fn get_or_compile(
        &self,
        pattern: &str,
        case_insensitive: bool,
    ) -> Result<Arc<Regex>, regex_lite::Error> {
        let key = MatcherKey {
            pattern: pattern.to_string(),
            case_insensitive,
        };

        if let Some(regex) = self
            .compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(regex));
        }

        let regex = Arc::new(
            RegexBuilder::new(pattern)
                .case_insensitive(case_insensitive)
                .build()?,
        );
        self.compiled
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Arc::clone(&regex));
        Ok(regex)
    }

    /// Number of compiled patterns held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
