//! Parsed navigation targets.
//!
//! Every path handed to the router goes through [`Location::parse`] first.
//! Parsing joins the input onto a fixed origin with the `url` crate, which
//! collapses dot segments and normalises percent-encoding, so the matcher
//! only ever sees canonical paths.

use std::fmt;

use url::Url;

use crate::routing::route::RouteError;

/// Origin used only to anchor relative paths while parsing.
const PARSE_ORIGIN: &str = "http://docdesk.invalid/";

/// A normalised location: path plus optional query and fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Location {
    /// The application root.
    pub fn root() -> Self {
        Self {
            path: "/".to_string(),
            query: None,
            fragment: None,
        }
    }

    /// Parse an absolute path such as `/sign?doc=1#page-2`.
    ///
    /// An empty (or blank) input is the root. Inputs that are not
    /// absolute paths, including network-path references (`//host` and
    /// `/\host`), are rejected, as are backslashes and control characters
    /// anywhere in the input.
    pub fn parse(input: &str) -> Result<Self, RouteError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        if !trimmed.starts_with('/')
            || trimmed.starts_with("//")
            || trimmed.contains('\\')
            || trimmed.chars().any(|c| c.is_ascii_control())
        {
            return Err(RouteError::InvalidPath {
                input: input.to_string(),
            });
        }

        let url = Url::parse(PARSE_ORIGIN)
            .and_then(|origin| origin.join(trimmed))
            .map_err(|_| RouteError::InvalidPath {
                input: input.to_string(),
            })?;

        Ok(Self {
            path: url.path().to_string(),
            query: url.query().filter(|q| !q.is_empty()).map(str::to_owned),
            fragment: url.fragment().filter(|f| !f.is_empty()).map(str::to_owned),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Build the location a redirect lands on.
    ///
    /// The target's own query and fragment win; missing ones are carried
    /// over from `self`.
    pub(crate) fn redirect_to(&self, target: Location) -> Location {
        Location {
            path: target.path,
            query: target.query.or_else(|| self.query.clone()),
            fragment: target.fragment.or_else(|| self.fragment.clone()),
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}
