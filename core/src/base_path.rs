//! Base path resolution
//!
//! The base path is the URL prefix under which the application and its
//! assets are published. It is resolved once at startup from the
//! [`Environment`] and injected into the router; nothing below the router
//! branches on the environment again.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{BuildCommand, Environment, EnvironmentMode, Error, Result};

/// Sub-path the production build is published under
pub const DEFAULT_DEPLOY_PATH: &str = "/epubCreator/simple-epub-creator/";

/// Normalized URL prefix. Always starts and ends with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BasePath(String);

impl BasePath {
    /// The development base path, `/`
    pub fn root() -> Self {
        BasePath("/".to_string())
    }

    /// Validate and normalize a base path. A missing trailing slash is added.
    pub fn parse(path: &str) -> Result<Self> {
        let invalid = |reason| Error::InvalidBasePath {
            path: path.to_string(),
            reason,
        };

        if path.is_empty() {
            return Err(invalid("must not be empty"));
        }
        if !path.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }
        if path.contains("//") {
            return Err(invalid("must not contain empty segments"));
        }
        if path
            .chars()
            .any(|c| c.is_whitespace() || c == '?' || c == '#')
        {
            return Err(invalid("must not contain whitespace, query or fragment"));
        }
        if path.contains(['{', '}']) {
            return Err(invalid("must not contain braces"));
        }
        if path
            .split('/')
            .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
        {
            return Err(invalid("segments must not start with ':' or '*'"));
        }

        let mut normalized = path.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        Ok(BasePath(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Prefix a route path (`/`, `/txt-to-epub`) with this base
    pub fn href(&self, route_path: &str) -> String {
        let relative = route_path.trim_start_matches('/');
        format!("{}{}", self.0, relative)
    }

    /// Strip this base from an incoming URL path.
    ///
    /// Returns the route path (always starting with `/`), or `None` when the
    /// URL lies outside the base.
    pub fn strip<'a>(&self, url_path: &'a str) -> Option<&'a str> {
        if url_path.starts_with(self.0.as_str()) {
            // Keep the base's trailing slash as the route's leading slash
            return Some(&url_path[self.0.len() - 1..]);
        }
        if url_path == self.0.trim_end_matches('/') {
            return Some("/");
        }
        None
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Map a mode to its base path: production gets the deployment path, every
/// other mode gets `/`.
pub fn resolve_base_path(mode: EnvironmentMode, deploy_path: &BasePath) -> BasePath {
    match mode {
        EnvironmentMode::Production => deploy_path.clone(),
        EnvironmentMode::Development => BasePath::root(),
    }
}

/// What decides whether the deployment path is used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Deployment path when the mode is production
    #[default]
    Mode,
    /// Deployment path when the build command is `build`
    Command,
}

impl Trigger {
    /// Parse a trigger flag. Unknown values fall back to [`Trigger::Mode`].
    pub fn from_flag(flag: &str) -> Self {
        match flag.trim().to_ascii_lowercase().as_str() {
            "command" => Trigger::Command,
            "mode" => Trigger::Mode,
            other => {
                tracing::warn!(trigger = %other, "Unrecognized base path trigger, using mode");
                Trigger::Mode
            }
        }
    }
}

/// Base path policy: the trigger and the deployment path are configured
/// independently of each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePathPolicy {
    pub trigger: Trigger,
    pub deploy_path: BasePath,
}

impl BasePathPolicy {
    pub fn new(trigger: Trigger, deploy_path: &str) -> Result<Self> {
        Ok(Self {
            trigger,
            deploy_path: BasePath::parse(deploy_path)?,
        })
    }

    /// Resolve the base path for an environment
    pub fn resolve(&self, env: &Environment) -> BasePath {
        let mode = match self.trigger {
            Trigger::Mode => env.mode,
            Trigger::Command => match env.command {
                BuildCommand::Build => EnvironmentMode::Production,
                BuildCommand::Serve => EnvironmentMode::Development,
            },
        };

        let base = resolve_base_path(mode, &self.deploy_path);
        tracing::debug!(
            trigger = ?self.trigger,
            mode = %env.mode,
            command = %env.command,
            base_path = %base,
            "Resolved base path"
        );
        base
    }
}

impl Default for BasePathPolicy {
    fn default() -> Self {
        Self {
            trigger: Trigger::Mode,
            deploy_path: BasePath(DEFAULT_DEPLOY_PATH.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deploy() -> BasePath {
        BasePath::parse(DEFAULT_DEPLOY_PATH).unwrap()
    }

    #[test]
    fn test_resolve_by_mode() {
        let prod = resolve_base_path(EnvironmentMode::Production, &deploy());
        assert_eq!(prod.as_str(), DEFAULT_DEPLOY_PATH);

        let dev = resolve_base_path(EnvironmentMode::Development, &deploy());
        assert_eq!(dev.as_str(), "/");

        for mode in [EnvironmentMode::Production, EnvironmentMode::Development] {
            assert!(resolve_base_path(mode, &deploy()).as_str().starts_with('/'));
        }
    }

    #[test]
    fn test_unknown_mode_fails_closed() {
        let mode = EnvironmentMode::from_flag("prodution");
        assert_eq!(resolve_base_path(mode, &deploy()).as_str(), "/");
    }

    #[test]
    fn test_parse_validation() {
        assert!(BasePath::parse("").is_err());
        assert!(BasePath::parse("repo/").is_err());
        assert!(BasePath::parse("/a//b/").is_err());
        assert!(BasePath::parse("/a b/").is_err());
        assert!(BasePath::parse("/a?x=1").is_err());

        // Segments the HTTP router would treat as captures or wildcards
        for path in ["/:repo/", "/epubCreator/*rest", "/{repo}/", "/repo}/", "/a/{b"] {
            assert!(
                matches!(BasePath::parse(path), Err(Error::InvalidBasePath { .. })),
                "{path} should be rejected"
            );
        }
        assert_eq!(BasePath::parse("/a:b/c*d/").unwrap().as_str(), "/a:b/c*d/");

        assert_eq!(BasePath::parse("/repo").unwrap().as_str(), "/repo/");
        assert_eq!(BasePath::parse("/").unwrap().as_str(), "/");
    }

    #[test]
    fn test_policy_trigger_is_independent_of_path() {
        let policy = BasePathPolicy::new(Trigger::Command, "/simple-epub-creator/").unwrap();

        let build = Environment::new(EnvironmentMode::Development, BuildCommand::Build);
        assert_eq!(policy.resolve(&build).as_str(), "/simple-epub-creator/");

        let serve = Environment::new(EnvironmentMode::Production, BuildCommand::Serve);
        assert_eq!(policy.resolve(&serve).as_str(), "/");

        let policy = BasePathPolicy::new(Trigger::Mode, "/simple-epub-creator/").unwrap();
        assert_eq!(policy.resolve(&build).as_str(), "/");
        assert_eq!(policy.resolve(&serve).as_str(), "/simple-epub-creator/");
    }

    #[test]
    fn test_href_and_strip() {
        let base = deploy();
        assert_eq!(base.href("/"), "/epubCreator/simple-epub-creator/");
        assert_eq!(
            base.href("/txt-to-epub"),
            "/epubCreator/simple-epub-creator/txt-to-epub"
        );

        for path in ["/", "/txt-to-epub"] {
            assert_eq!(base.strip(&base.href(path)), Some(path));
        }

        assert_eq!(base.strip("/epubCreator/simple-epub-creator"), Some("/"));
        assert_eq!(base.strip("/txt-to-epub"), None);

        let root = BasePath::root();
        assert_eq!(root.href("/txt-to-epub"), "/txt-to-epub");
        assert_eq!(root.strip("/txt-to-epub"), Some("/txt-to-epub"));
    }
}
