//! Minimal arbor example — a staged pipeline reading one body twice.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example echo
//!
//! Try:
//!   curl -X POST http://localhost:3000/ \
//!        -H 'content-type: application/x-www-form-urlencoded' -d 'foo=bar'
//!   curl -X POST http://localhost:3000/oauth \
//!        -H 'content-type: application/x-www-form-urlencoded' -d 'foo=bar'
//!   curl http://localhost:3000/healthz
//!
//! The `/oauth` POST works because the router buffers bodies: the auth stage
//! reads the form looking for credentials, and the handler reads it again to
//! echo it. Delete the `.buffer_bodies()` line and the same request comes
//! back as a 500 naming the consumed body.

use arbor::middleware::Pipeline;
use arbor::middleware::auth::{OptionalAuth, Provider};
use arbor::middleware::trace::Trace;
use arbor::{Handler, Method, Request, Response, Router, Server, StatusCode, health};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let app = Router::new()
        .buffer_bodies()
        .on(Method::GET, "/", get_route)
        .on(Method::POST, "/", post_route)
        .pipe(Method::GET, "/oauth", guarded(get_route))
        .pipe(Method::POST, "/oauth", guarded(post_route))
        .on(Method::GET, "/healthz", health::liveness)
        .on(Method::GET, "/readyz", health::readiness);

    Server::bind("0.0.0.0:3000")
        .serve(app)
        .await
        .expect("server error");
}

fn guarded(handler: impl Handler) -> Pipeline {
    let provider = Provider {
        client_id: "clientId".to_owned(),
        client_secret: "clientSecret".to_owned(),
        authorize_url: "http://localhost/authorize".to_owned(),
        token_url: "http://localhost/token".to_owned(),
        callback_url: "http://localhost:3000/callback".to_owned(),
        ..Provider::named("dummy")
    };
    Pipeline::new(handler)
        .stage(Trace)
        .stage(OptionalAuth::new(provider))
}

async fn get_route(req: Request) -> Response {
    Response::text(format!("GET {}", req.path()))
}

async fn post_route(req: Request) -> Response {
    let content_type = req.content_type().unwrap_or("none").to_owned();
    match req.body().text().await {
        Ok(payload) => {
            Response::text(format!("POST {} - {} - {}", req.path(), content_type, payload))
        }
        Err(e) => Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .text(format!("POST {} - {} - {}", req.path(), content_type, e)),
    }
}
