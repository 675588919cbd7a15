//! Middleware layer: the staged request pipeline.
//!
//! A route is a [`Pipeline`]: an ordered list of [`Stage`]s terminated by a
//! handler. Each stage receives the request by value plus a [`Next`]
//! continuation and decides what happens:
//!
//! - pass through — `next.run(req).await`, possibly after mutating the
//!   request (attach a principal, inspect the body);
//! - short-circuit — return its own [`Response`] without calling `next`;
//! - wrap — run `next` and post-process the response (latency logging).
//!
//! Stages run in registration order; the handler runs last. Any stage may
//! read the request body — whether a *later* read still succeeds is governed
//! by the router's buffering mode, not by the pipeline. See
//! [`Body`](crate::Body).
//!
//! Built-in stages:
//! - [`auth::OptionalAuth`] — best-effort credential extraction, never rejects
//! - [`trace::Trace`] — per-request log line with method, path, status, latency

pub mod auth;
pub mod trace;

use std::sync::Arc;

use async_trait::async_trait;

use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

/// One ordered unit of request processing, executed before the handler.
///
/// Implemented with `async_trait` so stages stay plain structs:
///
/// ```rust
/// use arbor::middleware::{Next, Stage};
/// use arbor::{Request, Response};
/// use async_trait::async_trait;
///
/// struct RequireHeader;
///
/// #[async_trait]
/// impl Stage for RequireHeader {
///     fn name(&self) -> &str { "require-header" }
///
///     async fn handle(&self, req: Request, next: Next<'_>) -> Response {
///         if req.header("x-api-key").is_none() {
///             return Response::status(arbor::StatusCode::UNAUTHORIZED);
///         }
///         next.run(req).await
///     }
/// }
/// ```
#[async_trait]
pub trait Stage: Send + Sync + 'static {
    /// Stable name, used in pipeline logs.
    fn name(&self) -> &str;

    /// Processes one request. Call `next.run(req)` to continue the pipeline,
    /// or return a response to short-circuit.
    async fn handle(&self, req: Request, next: Next<'_>) -> Response;
}

/// A type-erased stage shared across concurrent requests.
pub(crate) type BoxedStage = Arc<dyn Stage>;

/// The rest of the pipeline, from a stage's point of view.
pub struct Next<'a> {
    stages: &'a [BoxedStage],
    handler: &'a BoxedHandler,
}

impl Next<'_> {
    /// Runs the remaining stages in order, then the terminal handler.
    pub async fn run(self, req: Request) -> Response {
        match self.stages.split_first() {
            Some((stage, rest)) => {
                stage.handle(req, Next { stages: rest, handler: self.handler }).await
            }
            None => self.handler.call(req).await,
        }
    }
}

/// An ordered stage list plus its terminal handler — the value the router
/// dispatches to.
///
/// ```rust,no_run
/// use arbor::middleware::{Pipeline, auth::{OptionalAuth, Provider}};
/// # use arbor::{Request, Response};
/// # async fn submit(_req: Request) -> Response { Response::text("") }
///
/// let route = Pipeline::new(submit).stage(OptionalAuth::new(Provider::named("dummy")));
/// ```
pub struct Pipeline {
    stages: Vec<BoxedStage>,
    handler: BoxedHandler,
}

impl Pipeline {
    /// A pipeline with no stages — the handler alone.
    pub fn new(handler: impl Handler) -> Self {
        Self { stages: Vec::new(), handler: handler.into_boxed_handler() }
    }

    /// Appends a stage. Stages run in the order they were appended.
    pub fn stage(mut self, stage: impl Stage) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub(crate) async fn run(&self, req: Request) -> Response {
        Next { stages: &self.stages, handler: &self.handler }.run(req).await
    }
}
