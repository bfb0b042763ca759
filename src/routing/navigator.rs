//! Programmatic navigation.
//!
//! A [`Navigator`] pairs the shared, immutable [`Router`] with one session's
//! [`History`]. Entries pushed to history are always final locations, so a
//! redirect never leaves its source path behind in the stack.

use std::sync::Arc;

use thiserror::Error;

use crate::routing::history::History;
use crate::routing::route::RouteError;
use crate::routing::router::{Resolution, ResolvedRoute, Router};

/// Why a navigation did not happen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("no route matches `{location}`")]
    Unmatched { location: String },

    #[error("already at `{location}`")]
    Duplicated { location: String },

    #[error("history cannot move by {delta}")]
    OutOfRange { delta: isize },
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Push,
    Replace,
}

/// Session-level navigation driver.
#[derive(Debug)]
pub struct Navigator<H: History> {
    router: Arc<Router>,
    history: H,
    current: Option<ResolvedRoute>,
}

impl<H: History> Navigator<H> {
    /// Perform the initial navigation to the history's current entry.
    ///
    /// A redirect replaces the initial entry. An unmatched initial entry
    /// leaves nothing mounted.
    pub fn start(router: Arc<Router>, mut history: H) -> Result<Self, NavigationError> {
        let initial = history.location().clone();
        let current = match router.resolve_location(initial)? {
            Resolution::Matched(route) => {
                if route.is_redirect() {
                    history.replace(route.location.clone());
                }
                Some(route)
            }
            Resolution::Unmatched(location) => {
                tracing::warn!(location = %location, "No route matched initial location");
                None
            }
        };

        Ok(Self {
            router,
            history,
            current,
        })
    }

    /// The currently mounted route.
    pub fn current(&self) -> Option<&ResolvedRoute> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Navigate to `to`, adding a history entry.
    pub fn push(&mut self, to: &str) -> Result<&ResolvedRoute, NavigationError> {
        self.navigate(to, Mode::Push)
    }

    /// Navigate to `to`, overwriting the current history entry.
    pub fn replace(&mut self, to: &str) -> Result<&ResolvedRoute, NavigationError> {
        self.navigate(to, Mode::Replace)
    }

    fn navigate(&mut self, to: &str, mode: Mode) -> Result<&ResolvedRoute, NavigationError> {
        let route = match self.router.resolve(to)? {
            Resolution::Matched(route) => route,
            Resolution::Unmatched(location) => {
                tracing::warn!(location = %location, "No route matched navigation target");
                return Err(NavigationError::Unmatched {
                    location: location.to_string(),
                });
            }
        };

        if self
            .current
            .as_ref()
            .is_some_and(|current| current.location == route.location)
        {
            return Err(NavigationError::Duplicated {
                location: route.location.to_string(),
            });
        }

        match mode {
            Mode::Push => self.history.push(route.location.clone()),
            Mode::Replace => self.history.replace(route.location.clone()),
        }

        tracing::debug!(
            to = %route.location,
            view = route.view.name(),
            redirected_from = ?route.redirected_from.as_ref().map(ToString::to_string),
            mode = ?mode,
            "Navigated"
        );

        Ok(&*self.current.insert(route))
    }

    /// Move through history by `delta` entries and mount what is there.
    pub fn go(&mut self, delta: isize) -> Result<Option<&ResolvedRoute>, NavigationError> {
        if !self.history.go(delta) {
            return Err(NavigationError::OutOfRange { delta });
        }

        let location = self.history.location().clone();
        self.current = self.router.resolve_location(location)?.into_matched();
        Ok(self.current.as_ref())
    }

    pub fn back(&mut self) -> Result<Option<&ResolvedRoute>, NavigationError> {
        self.go(-1)
    }

    pub fn forward(&mut self) -> Result<Option<&ResolvedRoute>, NavigationError> {
        self.go(1)
    }
}
