//! Per-URL handler dispatch.
//!
//! A [`Router`] maps a visited URL to a registered handler by path or regex.
//! Handlers are plain function values registered by name before any route
//! may reference them, so a route naming a missing handler fails at startup
//! instead of mid-crawl. Resolution is first-match-wins in registration
//! order.

use crate::url::PageUrl;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Routing-specific errors
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("Route '{route}' references unknown handler '{handler}'")]
    UnknownHandler { route: String, handler: String },

    #[error("Invalid route pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Handler '{0}' failed: {1}")]
    HandlerFailed(String, #[source] anyhow::Error),
}

/// How a route decides whether it matches a URL.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Exact path equality.
    Path(String),
    /// Regex search against the whole serialized URL.
    Regex(Regex),
}

impl Matcher {
    pub fn regex(pattern: &str) -> Result<Self, RouterError> {
        Ok(Self::Regex(Regex::new(pattern)?))
    }

    pub fn matches(&self, url: &PageUrl) -> bool {
        match self {
            Self::Path(path) => url.path() == path,
            Self::Regex(pattern) => url.matches(pattern),
        }
    }
}

/// An immutable (matcher, handler-name) pair.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    matcher: Matcher,
    handler: String,
}

impl Route {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handler(&self) -> &str {
        &self.handler
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }
}

type Handler<T> = Box<dyn FnMut(&mut T, &PageUrl, &Route) -> anyhow::Result<()> + Send>;

/// First-match-wins URL dispatcher over a registered-handler map.
///
/// `T` is the target the handlers operate on, typically the session's page
/// driver.
pub struct Router<T> {
    routes: Vec<Route>,
    handlers: HashMap<String, Handler<T>>,
}

impl<T> fmt::Debug for Router<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("handlers", &self.handlers.keys())
            .finish()
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            handlers: HashMap::new(),
        }
    }

    /// Registers a handler under a name. Routes added afterwards may
    /// reference it.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: FnMut(&mut T, &PageUrl, &Route) -> anyhow::Result<()> + Send + 'static,
    {
        self.handlers.insert(name.into(), Box::new(handler));
    }

    /// Adds a route. Fails when the named handler has not been registered,
    /// so typos surface at startup.
    pub fn route(
        &mut self,
        name: impl Into<String>,
        matcher: Matcher,
        handler: impl Into<String>,
    ) -> Result<(), RouterError> {
        let name = name.into();
        let handler = handler.into();

        if !self.handlers.contains_key(&handler) {
            return Err(RouterError::UnknownHandler {
                route: name,
                handler,
            });
        }

        self.routes.push(Route {
            name,
            matcher,
            handler,
        });
        Ok(())
    }

    pub fn has_routes(&self) -> bool {
        !self.routes.is_empty()
    }

    /// Resolves a URL against the routes in registration order and invokes
    /// the handler of the first match only.
    ///
    /// Returns the matched route's name, or `None` when nothing matched.
    /// Handler failures are reported but by contract never abort a crawl.
    pub fn resolve(&mut self, target: &mut T, url: &PageUrl) -> Result<Option<&str>, RouterError> {
        for route in &self.routes {
            if !route.matcher.matches(url) {
                continue;
            }

            tracing::info!("Routing {} to '{}'", url, route.handler);
            let handler = self
                .handlers
                .get_mut(&route.handler)
                .expect("handler existence checked at registration");

            handler(target, url, route)
                .map_err(|e| RouterError::HandlerFailed(route.handler.clone(), e))?;

            return Ok(Some(route.name.as_str()));
        }

        Ok(None)
    }
}
