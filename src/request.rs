//! Incoming HTTP request type.

use std::collections::HashMap;

use http::{HeaderMap, Method};

use crate::body::Body;
use crate::middleware::auth::Principal;

/// An incoming HTTP request, as seen by pipeline stages and handlers.
///
/// The request travels through the pipeline by value: each stage receives it,
/// may mutate it (attach a [`Principal`], read the body), and hands it to the
/// next stage. The body is a [`Body`] handle, not raw bytes — whether it can
/// be read more than once is decided by the router's buffering mode.
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
    params: HashMap<String, String>,
    body: Body,
    principal: Option<Principal>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        headers: HeaderMap,
        params: HashMap<String, String>,
        body: Body,
    ) -> Self {
        Self { method, path, headers, params, body, principal: None }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &Body { &self.body }

    /// Case-insensitive header lookup. Returns `None` for absent headers and
    /// for values that are not valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The `content-type` header, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The principal attached by an authentication stage, if any ran and
    /// found credentials.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Attaches a principal. Called by authentication stages.
    pub fn set_principal(&mut self, principal: Principal) {
        self.principal = Some(principal);
    }
}
