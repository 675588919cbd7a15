//! Per-request trace logging stage.

use std::time::Instant;

use async_trait::async_trait;
use tracing::info;

use crate::middleware::{Next, Stage};
use crate::request::Request;
use crate::response::Response;

/// Logs one line per request: method, path, status, latency.
///
/// Register it first so the measured latency covers the whole pipeline:
///
/// ```rust,no_run
/// use arbor::middleware::{Pipeline, trace::Trace};
/// # use arbor::{Request, Response};
/// # async fn submit(_req: Request) -> Response { Response::text("") }
/// let route = Pipeline::new(submit).stage(Trace);
/// ```
pub struct Trace;

#[async_trait]
impl Stage for Trace {
    fn name(&self) -> &str {
        "trace"
    }

    async fn handle(&self, req: Request, next: Next<'_>) -> Response {
        let method = req.method().clone();
        let path = req.path().to_owned();
        let start = Instant::now();

        let res = next.run(req).await;

        info!(
            %method,
            %path,
            status = res.status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "request"
        );
        res
    }
}
