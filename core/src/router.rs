//! Route table and router
//!
//! The route table is built once at startup and never changes. The router
//! pairs it with the resolved [`BasePath`] and the guard chain.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::guard::{DocumentTitle, NavigationContext, NavigationGuard};
use crate::{BasePath, Error, Result};

/// Opaque handle to a renderable page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PageId {
    Home,
    TxtToEpubConverter,
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageId::Home => f.write_str("home"),
            PageId::TxtToEpubConverter => f.write_str("txt-to-epub"),
        }
    }
}

/// A path mapped to a named page and its title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    path: String,
    name: String,
    title: Option<String>,
    page: PageId,
}

impl Route {
    pub fn new(path: impl Into<String>, name: impl Into<String>, page: PageId) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            title: None,
            page,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Title, if present and non-empty
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    pub fn page(&self) -> PageId {
        self.page
    }
}

/// Paths every application table must serve
const REQUIRED_PATHS: [&str; 2] = ["/", "/txt-to-epub"];

/// Immutable, ordered set of routes with unique paths and names
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build a table, rejecting duplicate paths or names
    pub fn new(routes: Vec<Route>) -> Result<Self> {
        let mut paths = HashSet::new();
        let mut names = HashSet::new();

        for route in &routes {
            if !paths.insert(route.path.as_str()) {
                return Err(Error::DuplicateRoute {
                    field: "path",
                    value: route.path.clone(),
                });
            }
            if !names.insert(route.name.as_str()) {
                return Err(Error::DuplicateRoute {
                    field: "name",
                    value: route.name.clone(),
                });
            }
        }

        Ok(Self { routes })
    }

    /// The application's routes: home and the TXT to EPUB converter.
    ///
    /// There is no catch-all entry; unmatched paths surface as
    /// [`Error::RouteNotFound`].
    pub fn standard() -> Result<Self> {
        let table = Self::new(vec![
            Route::new("/", "Home", PageId::Home).with_title("線上 EPUB 編輯器"),
            Route::new("/txt-to-epub", "TxtToEpubConverter", PageId::TxtToEpubConverter)
                .with_title("簡易 TXT 生成 EPUB"),
        ])?;
        table.validate_required()?;
        Ok(table)
    }

    /// Check that the home and converter routes exist, each with a
    /// non-empty title distinct from the other.
    pub fn validate_required(&self) -> Result<()> {
        let mut titles = HashSet::new();

        for path in REQUIRED_PATHS {
            let route = self.resolve(path)?;
            let title = route.title().ok_or_else(|| Error::InvalidRoute {
                path: path.to_string(),
                reason: "title must not be empty",
            })?;
            if !titles.insert(title) {
                return Err(Error::InvalidRoute {
                    path: path.to_string(),
                    reason: "title must be distinct",
                });
            }
        }
        Ok(())
    }

    /// Match a route path by exact equality
    pub fn resolve(&self, path: &str) -> Result<&Route> {
        let path = if path.is_empty() { "/" } else { path };
        self.routes
            .iter()
            .find(|r| r.path == path)
            .ok_or_else(|| Error::RouteNotFound(path.to_string()))
    }

    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Routes in declaration order
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// A committed transition
#[derive(Debug, Clone, Copy)]
pub struct Navigation<'a> {
    pub to: &'a Route,
    pub from: Option<&'a Route>,
}

/// Route table bound to a base path and a guard chain
pub struct Router {
    base: BasePath,
    table: RouteTable,
    guards: Vec<Box<dyn NavigationGuard>>,
}

impl Router {
    pub fn new(base: BasePath, table: RouteTable) -> Self {
        Self {
            base,
            table,
            guards: Vec::new(),
        }
    }

    /// Register a guard. Guards run in registration order.
    pub fn before_each(mut self, guard: impl NavigationGuard + 'static) -> Self {
        tracing::debug!(guard = guard.name(), "Registering navigation guard");
        self.guards.push(Box::new(guard));
        self
    }

    pub fn base(&self) -> &BasePath {
        &self.base
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn guard_count(&self) -> usize {
        self.guards.len()
    }

    /// Base-prefixed URL of a named route
    pub fn href(&self, name: &str) -> Option<String> {
        self.table.by_name(name).map(|r| self.base.href(&r.path))
    }

    /// Match a full URL path (including the base) without running guards
    pub fn resolve_location(&self, url_path: &str) -> Result<&Route> {
        let path = self
            .base
            .strip(url_path)
            .ok_or_else(|| Error::RouteNotFound(url_path.to_string()))?;
        self.table.resolve(path)
    }

    /// Resolve a URL path and run the guard chain
    pub fn navigate<'a>(
        &'a self,
        url_path: &str,
        from: Option<&'a Route>,
        document: &mut dyn DocumentTitle,
    ) -> Result<Navigation<'a>> {
        let to = self.resolve_location(url_path)?;
        self.transition(to, from, document)
    }

    /// Run the guard chain for an already resolved target
    pub fn transition<'a>(
        &self,
        to: &'a Route,
        from: Option<&'a Route>,
        document: &mut dyn DocumentTitle,
    ) -> Result<Navigation<'a>> {
        let ctx = NavigationContext { to, from };

        for guard in &self.guards {
            let mut proceeded = 0usize;
            guard.before_each(&ctx, document, &mut || proceeded += 1);

            match proceeded {
                0 => {
                    tracing::debug!(guard = guard.name(), to = %to.path, "Navigation cancelled");
                    return Err(Error::NavigationAborted(to.path.clone()));
                }
                1 => {}
                n => tracing::warn!(guard = guard.name(), calls = n, "Guard called next more than once"),
            }
        }

        tracing::debug!(
            to = %to.name,
            from = from.map(|r| r.name.as_str()).unwrap_or("-"),
            "Navigation committed"
        );
        Ok(Navigation { to, from })
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("base", &self.base)
            .field("routes", &self.table.len())
            .field("guards", &self.guards.len())
            .finish()
    }
}
