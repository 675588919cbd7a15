//! Optional authentication stage.
//!
//! [`OptionalAuth`] attempts credential extraction and **never rejects**: a
//! request without credentials, with malformed credentials, or whose body
//! cannot be read simply continues to the next stage without a principal.
//! Route handlers decide what an anonymous request is allowed to do.
//!
//! Extraction looks in two places, in order:
//!
//! 1. an `Authorization: Bearer <token>` header;
//! 2. for form-encoded POSTs, an `access_token` form field — which means
//!    this stage *reads the request body*. On a router without
//!    [`buffer_bodies`](crate::Router::buffer_bodies) that read drains the
//!    stream, and a handler reading the body afterwards gets the consumed
//!    error. That interaction is exactly what the pipeline's buffering mode
//!    exists to resolve.
//!
//! Token *validation* is out of scope — the stage accepts whatever it finds
//! and attaches it as a [`Principal`]. The [`Provider`] record only describes
//! where real credentials would come from.

use async_trait::async_trait;

use http::Method;
use tracing::debug;

use crate::middleware::{Next, Stage};
use crate::request::Request;
use crate::response::Response;

/// Settings of the identity provider this stage extracts credentials for.
///
/// Descriptive only: the stage never calls these endpoints.
pub struct Provider {
    pub name: String,
    pub client_id: String,
    pub client_secret: String,
    pub authorize_url: String,
    pub token_url: String,
    pub callback_url: String,
}

impl Provider {
    /// A provider with the given name and every endpoint left empty. Fill in
    /// the rest with struct update syntax.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            client_id: String::new(),
            client_secret: String::new(),
            authorize_url: String::new(),
            token_url: String::new(),
            callback_url: String::new(),
        }
    }
}

/// Credentials extracted from a request, attached by [`OptionalAuth`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    token: String,
}

impl Principal {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// The pass-through authentication stage.
pub struct OptionalAuth {
    provider: Provider,
}

impl OptionalAuth {
    pub fn new(provider: Provider) -> Self {
        Self { provider }
    }

    async fn extract(&self, req: &Request) -> Option<Principal> {
        if let Some(value) = req.header("authorization") {
            if let Some(token) = value.strip_prefix("Bearer ") {
                return Some(Principal::bearer(token));
            }
        }

        let is_form = req
            .content_type()
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));
        if req.method() == Method::POST && is_form {
            match req.body().form().await {
                Ok(fields) => {
                    return fields
                        .into_iter()
                        .find(|(key, _)| key == "access_token")
                        .map(|(_, token)| Principal::bearer(token));
                }
                Err(e) => debug!(provider = %self.provider.name, "credential extraction failed: {e}"),
            }
        }

        None
    }
}

#[async_trait]
impl Stage for OptionalAuth {
    fn name(&self) -> &str {
        "optional-auth"
    }

    async fn handle(&self, mut req: Request, next: Next<'_>) -> Response {
        match self.extract(&req).await {
            Some(principal) => {
                debug!(provider = %self.provider.name, "credentials extracted");
                req.set_principal(principal);
            }
            None => debug!(provider = %self.provider.name, "no credentials, passing through"),
        }
        next.run(req).await
    }
}
