//! # arbor
//!
//! A minimal HTTP framework with a staged request pipeline and re-readable
//! request bodies.
//!
//! ## The contract
//!
//! A route is a pipeline: ordered stages (authentication, tracing, your own)
//! followed by one handler. Any stage may read the request body. The
//! framework guarantees that, with buffering enabled, every read observes the
//! content the first read saw — and that without buffering, a second read
//! fails loudly with a "body already consumed" error instead of silently
//! returning nothing. The one bug this design refuses to allow is the stream
//! that one stage drains and a later stage finds empty.
//!
//! Everything else is deliberately small: radix-tree routing via [`matchit`],
//! async I/O on tokio + hyper, graceful shutdown that drains in-flight
//! requests. TLS, rate limiting and body-size limits belong to the proxy in
//! front of you.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use arbor::middleware::{Pipeline, auth::{OptionalAuth, Provider}};
//! use arbor::{Method, Request, Response, Router, Server, StatusCode};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .buffer_bodies()
//!         .on(Method::POST, "/", echo)
//!         .pipe(
//!             Method::POST,
//!             "/submit",
//!             Pipeline::new(echo).stage(OptionalAuth::new(Provider::named("dummy"))),
//!         );
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! async fn echo(req: Request) -> Response {
//!     // The auth stage may already have read this body; with
//!     // `buffer_bodies()` on the router, the read below still succeeds.
//!     match req.body().text().await {
//!         Ok(payload) => Response::text(payload),
//!         Err(e) => Response::builder()
//!             .status(StatusCode::INTERNAL_SERVER_ERROR)
//!             .text(e.to_string()),
//!     }
//! }
//! ```

mod body;
mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod health;
pub mod middleware;

pub use body::{Body, BodyError};
pub use error::Error;
pub use handler::Handler;
pub use http::{Method, StatusCode};
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response};
pub use router::Router;
pub use server::Server;
