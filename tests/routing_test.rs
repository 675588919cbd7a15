//! HTTP-level routing tests: acknowledgments, misses, params, health.

mod common;

use arbor::{Method, Request, Response, Router};

#[tokio::test]
async fn get_routes_acknowledge_with_their_path() {
    let addr = common::serve(common::echo_app(true)).await;
    let client = reqwest::Client::new();

    for path in ["/", "/oauth"] {
        let res = client
            .get(format!("http://{addr}{path}"))
            .send()
            .await
            .expect("send request");

        assert_eq!(res.status().as_u16(), 200);
        assert_eq!(res.text().await.expect("read body"), format!("GET {path}"));
    }
}

#[tokio::test]
async fn unknown_path_is_404() {
    let addr = common::serve(common::echo_app(true)).await;

    let res = reqwest::Client::new()
        .get(format!("http://{addr}/missing"))
        .send()
        .await
        .expect("send request");

    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn method_mismatch_is_404() {
    let addr = common::serve(common::echo_app(true)).await;

    let res = reqwest::Client::new()
        .delete(format!("http://{addr}/"))
        .send()
        .await
        .expect("send request");

    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn path_params_reach_the_handler() {
    async fn get_user(req: Request) -> Response {
        Response::text(req.param("id").unwrap_or("unknown").to_owned())
    }

    let app = Router::new().on(Method::GET, "/users/{id}", get_user);
    let addr = common::serve(app).await;

    let res = reqwest::Client::new()
        .get(format!("http://{addr}/users/42"))
        .send()
        .await
        .expect("send request");

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.text().await.expect("read body"), "42");
}

#[tokio::test]
async fn health_probes_answer() {
    let addr = common::serve(common::echo_app(true)).await;
    let client = reqwest::Client::new();

    let live = client
        .get(format!("http://{addr}/healthz"))
        .send()
        .await
        .expect("send request");
    assert_eq!(live.status().as_u16(), 200);
    assert_eq!(live.text().await.expect("read body"), "ok");

    let ready = client
        .get(format!("http://{addr}/readyz"))
        .send()
        .await
        .expect("send request");
    assert_eq!(ready.status().as_u16(), 200);
    assert_eq!(ready.text().await.expect("read body"), "ready");
}
