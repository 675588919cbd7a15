//! HTTP-level tests of the body-read contract across pipeline stages.
//!
//! The guarded `/oauth` route runs an optional authentication stage that
//! reads form-encoded bodies before the handler does. With buffering enabled
//! the handler's read must observe the same content; without it, the read
//! must fail with an explicit consumed-body error surfaced as a 500.

mod common;

use arbor::{Method, Request, Response, Router};

const FORM: &str = "application/x-www-form-urlencoded";

#[tokio::test]
async fn post_open_route_echoes_form_body() {
    let addr = common::serve(common::echo_app(true)).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .header("content-type", FORM)
        .body("foo=bar")
        .send()
        .await
        .expect("send request");

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(
        res.text().await.expect("read body"),
        "POST / - application/x-www-form-urlencoded - foo=bar"
    );
}

#[tokio::test]
async fn buffered_guarded_route_matches_open_route() {
    let addr = common::serve(common::echo_app(true)).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/oauth"))
        .header("content-type", FORM)
        .body("foo=bar")
        .send()
        .await
        .expect("send request");

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(
        res.text().await.expect("read body"),
        "POST /oauth - application/x-www-form-urlencoded - foo=bar"
    );
}

#[tokio::test]
async fn unbuffered_guarded_route_reports_consumed_body() {
    let addr = common::serve(common::echo_app(false)).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/oauth"))
        .header("content-type", FORM)
        .body("foo=bar")
        .send()
        .await
        .expect("send request");

    assert_eq!(res.status().as_u16(), 500);
    let body = res.text().await.expect("read body");
    assert!(
        body.starts_with("POST /oauth - application/x-www-form-urlencoded - "),
        "got: {body}"
    );
    assert!(body.contains("already been consumed"), "got: {body}");
}

#[tokio::test]
async fn unbuffered_open_route_is_unaffected() {
    // Only one stage ever reads the open route's body, so the single-read
    // default is enough there.
    let addr = common::serve(common::echo_app(false)).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .header("content-type", FORM)
        .body("foo=bar")
        .send()
        .await
        .expect("send request");

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(
        res.text().await.expect("read body"),
        "POST / - application/x-www-form-urlencoded - foo=bar"
    );
}

#[tokio::test]
async fn text_plain_posts_succeed_on_both_routes() {
    let addr = common::serve(common::echo_app(true)).await;
    let client = reqwest::Client::new();

    for path in ["/", "/oauth"] {
        let res = client
            .post(format!("http://{addr}{path}"))
            .header("content-type", "text/plain")
            .body("foo")
            .send()
            .await
            .expect("send request");

        assert_eq!(res.status().as_u16(), 200);
        assert_eq!(
            res.text().await.expect("read body"),
            format!("POST {path} - text/plain - foo")
        );
    }
}

#[tokio::test]
async fn text_plain_does_not_trip_the_unbuffered_pipeline() {
    // The auth stage only reads form-encoded bodies, so a plain-text POST
    // passes through an unbuffered pipeline untouched.
    let addr = common::serve(common::echo_app(false)).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/oauth"))
        .header("content-type", "text/plain")
        .body("foo")
        .send()
        .await
        .expect("send request");

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.text().await.expect("read body"), "POST /oauth - text/plain - foo");
}

#[tokio::test]
async fn buffered_body_reads_are_idempotent_over_http() {
    async fn read_repeatedly(req: Request) -> Response {
        let first = match req.body().text().await {
            Ok(text) => text,
            Err(e) => return Response::text(format!("first read failed: {e}")),
        };
        for _ in 0..3 {
            match req.body().text().await {
                Ok(text) if text == first => {}
                Ok(text) => return Response::text(format!("diverged: {text}")),
                Err(e) => return Response::text(format!("re-read failed: {e}")),
            }
        }
        Response::text(first)
    }

    let app = Router::new()
        .buffer_bodies()
        .on(Method::POST, "/repeat", read_repeatedly);
    let addr = common::serve(app).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/repeat"))
        .header("content-type", "text/plain")
        .body("same every time")
        .send()
        .await
        .expect("send request");

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.text().await.expect("read body"), "same every time");
}
