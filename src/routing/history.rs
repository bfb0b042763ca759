//! Navigation history.
//!
//! The [`History`] trait is the seam between the navigator and whatever
//! actually stores session entries. [`MemoryHistory`] keeps them in
//! process, which is what the server, the CLI and the tests use.
//!
//! Locations stored in history never include the base path; `href` adds it
//! back when a full URL is needed.

use std::fmt;

use crate::routing::location::Location;

/// A stack of session entries with a cursor.
pub trait History: fmt::Debug + Send {
    /// Normalised base path (`""` or `/app`).
    fn base(&self) -> &str;

    /// The current entry.
    fn location(&self) -> &Location;

    /// Add an entry after the current one, dropping any forward entries.
    fn push(&mut self, location: Location);

    /// Overwrite the current entry.
    fn replace(&mut self, location: Location);

    /// Move the cursor by `delta`. Returns false (and stays put) when the
    /// move would leave the stack.
    fn go(&mut self, delta: isize) -> bool;

    /// Full href for `location`, base included.
    fn href(&self, location: &Location) -> String {
        join_base(self.base(), location)
    }
}

/// Normalise a configured base path: no trailing slash, leading slash
/// enforced, `/` collapsed to the empty base.
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Prefix `location` with a normalised base.
pub fn join_base(base: &str, location: &Location) -> String {
    format!("{}{}", base, location)
}

/// Strip a normalised base from a request target.
///
/// Returns `None` when the target lies outside the base. `/app` and
/// `/app?x=1` map to the root; `/application` is outside `/app`.
pub fn strip_base(base: &str, target: &str) -> Option<String> {
    let rest = target.strip_prefix(base)?;
    if rest.is_empty() {
        Some("/".to_string())
    } else if rest.starts_with('/') {
        Some(rest.to_string())
    } else if rest.starts_with('?') || rest.starts_with('#') {
        Some(format!("/{}", rest))
    } else {
        None
    }
}

/// In-process history.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    base: String,
    entries: Vec<Location>,
    position: usize,
}

impl MemoryHistory {
    /// Start at the root under `base`.
    pub fn new(base: &str) -> Self {
        Self::starting_at(base, Location::root())
    }

    /// Start at `location` under `base`.
    pub fn starting_at(base: &str, location: Location) -> Self {
        Self {
            base: normalize_base(base),
            entries: vec![location],
            position: 0,
        }
    }

    /// Number of entries in the stack.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor index into the stack.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn entries(&self) -> &[Location] {
        &self.entries
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("")
    }
}

impl History for MemoryHistory {
    fn base(&self) -> &str {
        &self.base
    }

    fn location(&self) -> &Location {
        &self.entries[self.position]
    }

    fn push(&mut self, location: Location) {
        self.entries.truncate(self.position + 1);
        self.entries.push(location);
        self.position = self.entries.len() - 1;
    }

    fn replace(&mut self, location: Location) {
        self.entries[self.position] = location;
    }

    fn go(&mut self, delta: isize) -> bool {
        let Some(target) = self.position.checked_add_signed(delta) else {
            return false;
        };
        if target >= self.entries.len() {
            return false;
        }
        self.position = target;
        true
    }
}
