//! Route lookup and resolution.
//!
//! # Responsibilities
//! - Validate and store the route table
//! - Look up the record matching a path
//! - Follow redirects down to a view, or report an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (shared via `Arc` without locks)
//! - Table is validated up front: unique paths, no dangling redirects, no loops
//! - O(n) scan in declaration order; first match wins
//! - Explicit `Unmatched` rather than a silent default route

use std::collections::{HashMap, HashSet};

use crate::routing::location::Location;
use crate::routing::matcher::{MatchOptions, PathMatcher};
use crate::routing::route::{RouteError, RouteRecord, RouteTarget};
use crate::views::ViewRef;

/// A location resolved to a view.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    /// Final location after following redirects.
    pub location: Location,
    /// Path of the record that renders the view.
    pub matched: String,
    /// The view to mount.
    pub view: ViewRef,
    /// The requested location, when at least one redirect was followed.
    pub redirected_from: Option<Location>,
}

impl ResolvedRoute {
    pub fn is_redirect(&self) -> bool {
        self.redirected_from.is_some()
    }
}

/// Outcome of resolving a path.
#[derive(Debug, Clone)]
pub enum Resolution {
    Matched(ResolvedRoute),
    Unmatched(Location),
}

impl Resolution {
    pub fn matched(&self) -> Option<&ResolvedRoute> {
        match self {
            Resolution::Matched(route) => Some(route),
            Resolution::Unmatched(_) => None,
        }
    }

    pub fn into_matched(self) -> Option<ResolvedRoute> {
        match self {
            Resolution::Matched(route) => Some(route),
            Resolution::Unmatched(_) => None,
        }
    }
}

#[derive(Debug)]
struct CompiledRoute {
    record: RouteRecord,
    matcher: PathMatcher,
}

/// The application's route table.
#[derive(Debug)]
pub struct Router {
    routes: Vec<CompiledRoute>,
    options: MatchOptions,
}

impl Router {
    /// Build a router with default matching options.
    pub fn new(records: Vec<RouteRecord>) -> Result<Self, RouteError> {
        Self::with_options(records, MatchOptions::default())
    }

    /// Build a router, validating the table.
    pub fn with_options(
        records: Vec<RouteRecord>,
        options: MatchOptions,
    ) -> Result<Self, RouteError> {
        let mut seen: HashMap<String, String> = HashMap::new();
        let mut routes = Vec::with_capacity(records.len());

        for record in records {
            if !record.path().starts_with('/') {
                return Err(RouteError::NotAbsolute {
                    path: record.path().to_string(),
                });
            }
            let matcher = PathMatcher::new(record.path(), options);
            if let Some(existing) = seen.get(matcher.key()) {
                return Err(RouteError::DuplicatePath {
                    path: record.path().to_string(),
                    existing: existing.clone(),
                });
            }
            seen.insert(matcher.key().to_string(), record.path().to_string());
            routes.push(CompiledRoute { record, matcher });
        }

        let router = Self { routes, options };
        router.check_redirects()?;

        tracing::debug!(
            routes = router.routes.len(),
            sensitive = options.sensitive,
            strict = options.strict,
            "Route table compiled"
        );
        Ok(router)
    }

    /// Every redirect chain must end at a view.
    fn check_redirects(&self) -> Result<(), RouteError> {
        for (start, route) in self.routes.iter().enumerate() {
            if route.record.redirect_target().is_none() {
                continue;
            }

            let mut visited = HashSet::from([start]);
            let mut index = start;
            while let Some(to) = self.routes[index].record.redirect_target() {
                let target = Location::parse(to)?;
                let next = self.position(&target).ok_or_else(|| RouteError::DanglingRedirect {
                    from: self.routes[index].record.path().to_string(),
                    to: to.to_string(),
                })?;
                if !visited.insert(next) {
                    return Err(RouteError::RedirectLoop {
                        path: route.record.path().to_string(),
                    });
                }
                index = next;
            }
        }
        Ok(())
    }

    fn position(&self, location: &Location) -> Option<usize> {
        self.routes.iter().position(|r| r.matcher.matches(location))
    }

    fn find(&self, location: &Location) -> Option<&RouteRecord> {
        self.routes
            .iter()
            .find(|r| r.matcher.matches(location))
            .map(|r| &r.record)
    }

    /// Records in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteRecord> {
        self.routes.iter().map(|r| &r.record)
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// The record matching `path`, without following redirects.
    pub fn lookup(&self, path: &str) -> Result<Option<&RouteRecord>, RouteError> {
        let location = Location::parse(path)?;
        Ok(self.find(&location))
    }

    /// Resolve `path` to a view, following redirects.
    pub fn resolve(&self, path: &str) -> Result<Resolution, RouteError> {
        self.resolve_location(Location::parse(path)?)
    }

    /// Resolve an already parsed location.
    pub fn resolve_location(&self, requested: Location) -> Result<Resolution, RouteError> {
        let mut current = requested.clone();
        let mut hops = 0usize;

        loop {
            let Some(record) = self.find(&current) else {
                return Ok(Resolution::Unmatched(current));
            };

            match record.target() {
                RouteTarget::View(view) => {
                    return Ok(Resolution::Matched(ResolvedRoute {
                        location: current,
                        matched: record.path().to_string(),
                        view: view.clone(),
                        redirected_from: (hops > 0).then_some(requested),
                    }));
                }
                RouteTarget::Redirect(to) => {
                    hops += 1;
                    if hops > self.routes.len() {
                        return Err(RouteError::RedirectLoop {
                            path: requested.path().to_string(),
                        });
                    }
                    current = current.redirect_to(Location::parse(to)?);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{ConvertDocumentView, SignPdfView};
    use std::sync::Arc;

    fn table() -> Vec<RouteRecord> {
        vec![
            RouteRecord::redirect("/", "/sign"),
            RouteRecord::view("/sign", Arc::new(SignPdfView)),
            RouteRecord::view("/convert", Arc::new(ConvertDocumentView)),
        ]
    }

    #[test]
    fn test_root_redirects_to_sign() {
        let router = Router::new(table()).unwrap();
        let route = router.resolve("/").unwrap().into_matched().unwrap();

        assert_eq!(route.location.path(), "/sign");
        assert_eq!(route.matched, "/sign");
        assert_eq!(route.view.name(), "sign-pdf");
        assert_eq!(route.redirected_from, Some(Location::root()));
    }

    #[test]
    fn test_direct_views() {
        let router = Router::new(table()).unwrap();

        let sign = router.resolve("/sign").unwrap().into_matched().unwrap();
        assert_eq!(sign.view.name(), "sign-pdf");
        assert!(!sign.is_redirect());

        let convert = router.resolve("/convert").unwrap().into_matched().unwrap();
        assert_eq!(convert.view.name(), "convert-document");
        assert!(!convert.is_redirect());
    }

    #[test]
    fn test_unmatched_is_explicit() {
        let router = Router::new(table()).unwrap();
        match router.resolve("/missing?x=1").unwrap() {
            Resolution::Unmatched(loc) => assert_eq!(loc.to_string(), "/missing?x=1"),
            other => panic!("expected no match, got {:?}", other),
        }
    }

    #[test]
    fn test_redirect_carries_query_and_fragment() {
        let router = Router::new(table()).unwrap();
        let route = router.resolve("/?doc=3#p2").unwrap().into_matched().unwrap();
        assert_eq!(route.location.to_string(), "/sign?doc=3#p2");
    }

    #[test]
    fn test_lookup_does_not_follow_redirects() {
        let router = Router::new(table()).unwrap();
        let record = router.lookup("/").unwrap().unwrap();
        assert_eq!(record.redirect_target(), Some("/sign"));
        assert!(router.lookup("/nope").unwrap().is_none());
    }

    #[test]
    fn test_routes_keep_declaration_order() {
        let router = Router::new(table()).unwrap();
        let paths: Vec<_> = router.routes().map(|r| r.path()).collect();
        assert_eq!(paths, ["/", "/sign", "/convert"]);
    }

    #[test]
    fn test_duplicate_paths_rejected() {
        let mut records = table();
        records.push(RouteRecord::view("/Sign/", Arc::new(SignPdfView)));
        assert_eq!(
            Router::new(records).unwrap_err(),
            RouteError::DuplicatePath {
                path: "/Sign/".into(),
                existing: "/sign".into(),
            }
        );
    }

    #[test]
    fn test_case_variants_distinct_when_sensitive() {
        let mut records = table();
        records.push(RouteRecord::view("/Sign", Arc::new(SignPdfView)));
        let options = MatchOptions {
            sensitive: true,
            strict: false,
        };
        assert!(Router::with_options(records, options).is_ok());
    }

    #[test]
    fn test_relative_path_rejected() {
        let records = vec![RouteRecord::view("sign", Arc::new(SignPdfView))];
        assert!(matches!(
            Router::new(records),
            Err(RouteError::NotAbsolute { .. })
        ));
    }

    #[test]
    fn test_dangling_redirect_rejected() {
        let records = vec![
            RouteRecord::redirect("/", "/nowhere"),
            RouteRecord::view("/sign", Arc::new(SignPdfView)),
        ];
        assert_eq!(
            Router::new(records).unwrap_err(),
            RouteError::DanglingRedirect {
                from: "/".into(),
                to: "/nowhere".into(),
            }
        );
    }

    #[test]
    fn test_redirect_loop_rejected() {
        let records = vec![
            RouteRecord::redirect("/a", "/b"),
            RouteRecord::redirect("/b", "/a"),
        ];
        assert!(matches!(
            Router::new(records),
            Err(RouteError::RedirectLoop { .. })
        ));
    }

    #[test]
    fn test_redirect_chain_followed() {
        let records = vec![
            RouteRecord::redirect("/", "/home"),
            RouteRecord::redirect("/home", "/sign"),
            RouteRecord::view("/sign", Arc::new(SignPdfView)),
        ];
        let router = Router::new(records).unwrap();
        let route = router.resolve("/").unwrap().into_matched().unwrap();
        assert_eq!(route.matched, "/sign");
        assert_eq!(route.redirected_from.unwrap().path(), "/");
    }
}
