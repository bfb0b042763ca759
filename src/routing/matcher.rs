//! Route path matching.
//!
//! # Responsibilities
//! - Match a normalised location path against a static route path
//! - Apply case sensitivity and trailing-slash strictness
//!
//! # Design Decisions
//! - Case-insensitive and trailing-slash tolerant by default
//! - The root path `/` only ever matches the root
//! - Static segments only: no params, no regex

use serde::{Deserialize, Serialize};

use crate::routing::location::Location;

/// Matching options shared by every route in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Compare paths case-sensitively.
    pub sensitive: bool,

    /// Require the trailing slash to match exactly.
    pub strict: bool,
}

/// Matches a single static route path.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    key: String,
    options: MatchOptions,
}

impl PathMatcher {
    /// Create a matcher for `path` under the given options.
    pub fn new(path: &str, options: MatchOptions) -> Self {
        Self {
            key: normalize(path, options),
            options,
        }
    }

    /// The comparison key. Two routes with the same key are indistinguishable.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns true if the location's path matches this route.
    pub fn matches(&self, location: &Location) -> bool {
        normalize(location.path(), self.options) == self.key
    }
}

fn normalize(path: &str, options: MatchOptions) -> String {
    let mut path = if path.is_empty() { "/" } else { path };
    if !options.strict && path.len() > 1 {
        path = path.strip_suffix('/').unwrap_or(path);
    }
    if options.sensitive {
        path.to_string()
    } else {
        path.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(path: &str) -> Location {
        Location::parse(path).unwrap()
    }

    #[test]
    fn test_default_matching() {
        let matcher = PathMatcher::new("/sign", MatchOptions::default());

        assert!(matcher.matches(&loc("/sign")));
        assert!(matcher.matches(&loc("/sign/")));
        assert!(matcher.matches(&loc("/SIGN"))); // Case insensitive
        assert!(matcher.matches(&loc("/sign?doc=1")));
        assert!(!matcher.matches(&loc("/signature")));
        assert!(!matcher.matches(&loc("/sign/extra")));
    }

    #[test]
    fn test_root_only_matches_root() {
        let matcher = PathMatcher::new("/", MatchOptions::default());

        assert!(matcher.matches(&loc("/")));
        assert!(matcher.matches(&loc("")));
        assert!(!matcher.matches(&loc("/sign")));
    }

    #[test]
    fn test_strict_and_sensitive() {
        let options = MatchOptions {
            sensitive: true,
            strict: true,
        };
        let matcher = PathMatcher::new("/convert", options);

        assert!(matcher.matches(&loc("/convert")));
        assert!(!matcher.matches(&loc("/convert/")));
        assert!(!matcher.matches(&loc("/Convert")));
    }

    #[test]
    fn test_keys_collapse_equivalent_paths() {
        let options = MatchOptions::default();
        assert_eq!(
            PathMatcher::new("/Sign/", options).key(),
            PathMatcher::new("/sign", options).key()
        );
    }
}
