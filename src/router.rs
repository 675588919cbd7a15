//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup via [`matchit`]. Route
//! values are [`Pipeline`]s — a bare handler is just a pipeline with no
//! stages. The router also owns the one piece of pipeline-wide configuration:
//! whether request bodies are buffered for replay.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::handler::Handler;
use crate::middleware::Pipeline;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Registration methods return `self` so calls chain naturally.
///
/// ```rust,no_run
/// use arbor::middleware::{Pipeline, auth::{OptionalAuth, Provider}};
/// use arbor::{Method, Request, Response, Router};
///
/// # async fn open(_: Request) -> Response { Response::text("") }
/// # async fn guarded(_: Request) -> Response { Response::text("") }
/// let app = Router::new()
///     .buffer_bodies()
///     .on(Method::POST, "/", open)
///     .pipe(
///         Method::POST,
///         "/oauth",
///         Pipeline::new(guarded).stage(OptionalAuth::new(Provider::named("dummy"))),
///     );
/// ```
pub struct Router {
    routes: HashMap<Method, MatchitRouter<Arc<Pipeline>>>,
    buffer_bodies: bool,
}

impl Router {
    /// An empty router. Bodies are single-read until
    /// [`buffer_bodies`](Router::buffer_bodies) is called.
    pub fn new() -> Self {
        Self { routes: HashMap::new(), buffer_bodies: false }
    }

    /// Registers a bare handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves them.
    pub fn on(self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.pipe(method, path, Pipeline::new(handler))
    }

    /// Registers a staged route.
    pub fn pipe(mut self, method: Method, path: &str, pipeline: Pipeline) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, Arc::new(pipeline))
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Enables replay buffering: every request body this router dispatches is
    /// captured on first read and served from the buffer afterwards, so any
    /// number of stages can read it.
    ///
    /// Off by default — without it a second body read fails with
    /// [`BodyError::Consumed`](crate::BodyError::Consumed).
    pub fn buffer_bodies(mut self) -> Self {
        self.buffer_bodies = true;
        self
    }

    pub(crate) fn buffers_bodies(&self) -> bool {
        self.buffer_bodies
    }

    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(Arc<Pipeline>, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let pipeline = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((pipeline, params))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
