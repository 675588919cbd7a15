//! Shared test fixtures: an in-process server and the two-route echo app.

use std::net::SocketAddr;

use arbor::middleware::Pipeline;
use arbor::middleware::auth::{OptionalAuth, Provider};
use arbor::{Method, Request, Response, Router, Server, StatusCode, health};
use tokio::net::TcpListener;

/// Binds port 0, spawns the server, returns the address to aim a client at.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let addr = listener.local_addr().expect("read local addr");
    tokio::spawn(Server::from_listener(listener).serve(app));
    addr
}

/// The echo app: an open route at `/` and a route at `/oauth` behind an
/// optional authentication stage. Both answer GET with an acknowledgment and
/// POST with `POST <path> - <content-type> - <body>`; the guarded POST
/// handler converts a failed body read into a 500 carrying the error text.
pub fn echo_app(buffer_bodies: bool) -> Router {
    let router = Router::new()
        .on(Method::GET, "/", get_route)
        .on(Method::POST, "/", post_route)
        .pipe(Method::GET, "/oauth", guarded(get_route))
        .pipe(Method::POST, "/oauth", guarded(post_route))
        .on(Method::GET, "/healthz", health::liveness)
        .on(Method::GET, "/readyz", health::readiness);
    if buffer_bodies { router.buffer_bodies() } else { router }
}

fn guarded(handler: impl arbor::Handler) -> Pipeline {
    let provider = Provider {
        client_id: "clientId".to_owned(),
        client_secret: "clientSecret".to_owned(),
        authorize_url: "http://localhost/authorize".to_owned(),
        token_url: "http://localhost/token".to_owned(),
        callback_url: "http://localhost:8080/callback".to_owned(),
        ..Provider::named("dummy")
    };
    Pipeline::new(handler).stage(OptionalAuth::new(provider))
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
