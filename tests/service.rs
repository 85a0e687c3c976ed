//! hyper adaptor tests
//!
//! These tests call the `Router` through hyper's types, both via `Router::serve` and
//! via the `Service` returned by `Router::into_service`.

use hyper::service::Service;
use hyper::{Body, Method, StatusCode};
use pathrouter::{HandlerError, Request, Response, Router};

fn router() -> Router {
    Router::default()
        .middleware(|req: &mut Request, _: &mut Response| {
            req.headers.insert("x-middleware".into(), "seen".into());
        })
        .get("/hello/:user", |req: Request| -> Result<Response, HandlerError> {
            let user = req.param("user").ok_or("missing user")?;
            Ok(Response::new(format!("Hello, {}", user)).with_header("X-Greeting", "1"))
        })
        .post("/echo", |req: Request| {
            let mut accept = req.header("accept").unwrap_or_default().to_owned();
            if let Some(seen) = req.header("x-middleware") {
                accept.push('|');
                accept.push_str(seen);
            }
            Ok(Response::new(req.body).with_header("X-Accept", accept))
        })
        .get("/boom", |_: Request| Err(HandlerError::new("bad")))
}

async fn body_string(res: hyper::Response<Body>) -> String {
    let bytes = hyper::body::to_bytes(res.into_body()).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn serve_dispatches_with_params() {
    let req = hyper::Request::builder()
        .uri("http://localhost/hello/gordon?lang=en")
        .body(Body::empty())
        .unwrap();

    let res = router().serve(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-greeting"], "1");
    assert_eq!(body_string(res).await, "Hello, gordon");
}

#[tokio::test]
async fn serve_passes_body_and_headers() {
    let req = hyper::Request::builder()
        .method(Method::POST)
        .uri("/echo")
        .header("Accept", "text/plain")
        .header("Accept", "application/json")
        .body(Body::from("ping"))
        .unwrap();

    let res = router().serve(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()["x-accept"],
        "text/plain, application/json|seen"
    );
    assert_eq!(body_string(res).await, "ping");
}

#[tokio::test]
async fn serve_fallbacks() {
    let req = hyper::Request::builder()
        .uri("/nowhere")
        .body(Body::empty())
        .unwrap();
    let res = router().serve(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(body_string(res).await, r#"{"error": "Resource not found"}"#);

    let req = hyper::Request::builder()
        .method(Method::DELETE)
        .uri("/hello/gordon")
        .body(Body::empty())
        .unwrap();
    let res = router().serve(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body_string(res).await,
        r#"{"error": "Method not allowed for this resource"}"#
    );

    let req = hyper::Request::builder()
        .uri("/boom")
        .body(Body::empty())
        .unwrap();
    let res = router().serve(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(res).await, "Error: bad");
}

#[tokio::test]
async fn into_service_serves_requests() {
    let mut make_service = router().into_service();
    let mut service = make_service.call(()).await.unwrap();

    for user in &["ana", "bo"] {
        let req = hyper::Request::builder()
            .uri(format!("/hello/{}", user))
            .body(Body::empty())
            .unwrap();

        let res = service.call(req).await.unwrap();
        assert_eq!(body_string(res).await, format!("Hello, {}", user));
    }
}
