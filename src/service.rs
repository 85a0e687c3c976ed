//! Serving a [`Router`](crate::Router) with hyper.
//!
//! The router works on its own [`Request`] and [`Response`] values. This module
//! converts hyper's types to and from them so a router can be handed directly to
//! `hyper::Server`.
use crate::request::{Request, Response};
use crate::router::Router;

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::future;
use hyper::header::{HeaderMap, HeaderName, HeaderValue};
use hyper::service::Service;
use hyper::Body;

#[doc(hidden)]
pub struct MakeRouterService(RouterService);

impl<T> Service<T> for MakeRouterService {
    type Response = RouterService;
    type Error = hyper::Error;
    type Future = future::Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _: T) -> Self::Future {
        let service = self.0.clone();
        future::ok(service)
    }
}

#[doc(hidden)]
#[derive(Clone)]
pub struct RouterService(Arc<Router>);

impl RouterService {
    fn new(router: Router) -> Self {
        RouterService(Arc::new(router))
    }
}

pub type ResponseFut =
    Pin<Box<dyn Future<Output = hyper::Result<hyper::Response<Body>>> + Send + 'static>>;

impl Service<hyper::Request<Body>> for RouterService {
    type Response = hyper::Response<Body>;
    type Error = hyper::Error;
    type Future = ResponseFut;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: hyper::Request<Body>) -> Self::Future {
        let router = self.0.clone();
        Box::pin(async move { router.serve(req).await })
    }
}

impl Router {
    /// Converts the `Router` into a `Service` which you can serve directly with `Hyper`.
    /// If you have an existing `Service` that you want to incorporate a `Router` into, see
    /// [`Router::serve`](crate::Router::serve).
    /// ```rust,no_run
    /// # use pathrouter::{Request, Response, Router};
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// // Our router...
    /// let router = Router::default()
    ///     .get("/", |_: Request| Ok(Response::new("Hello, World!")));
    ///
    /// // Convert it into a service...
    /// let service = router.into_service();
    ///
    /// // Serve with hyper
    /// hyper::Server::bind(&([127, 0, 0, 1], 3030).into())
    ///     .serve(service)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn into_service(self) -> MakeRouterService {
        MakeRouterService(RouterService::new(self))
    }

    /// An asynchronous function from a hyper `Request` to a hyper `Response`.
    ///
    /// The body is collected and decoded as lossy UTF-8, header values that are not
    /// valid UTF-8 are dropped and repeated headers are joined with `", "`. The
    /// request is then dispatched with [`Router::route`]. Response headers that hyper
    /// cannot represent are skipped, and the response's `status_text` is not sent:
    /// hyper writes the canonical reason phrase for the status.
    ///
    /// The only error is a failure to read the request body.
    /// ```rust,no_run
    /// # use pathrouter::Router;
    /// # use hyper::service::{make_service_fn, service_fn};
    /// # use hyper::{Request, Body, Server};
    /// # use std::convert::Infallible;
    /// # use std::sync::Arc;
    ///
    /// # async fn run() {
    /// let router = Arc::new(Router::default());
    ///
    /// let make_svc = make_service_fn(move |_| {
    ///     let router = router.clone();
    ///     async move {
    ///         Ok::<_, Infallible>(service_fn(move |req: Request<Body>| {
    ///             let router = router.clone();
    ///             async move { router.serve(req).await }
    ///         }))
    ///     }
    /// });
    ///
    /// let server = Server::bind(&([127, 0, 0, 1], 3000).into())
    ///     .serve(make_svc)
    ///     .await;
    /// # }
    /// ```
    pub async fn serve(&self, req: hyper::Request<Body>) -> hyper::Result<hyper::Response<Body>> {
        let (parts, body) = req.into_parts();
        let headers = from_header_map(&parts.headers);
        let body = hyper::body::to_bytes(body).await?;

        let mut request = Request {
            method: parts.method,
            path: parts.uri.path().to_owned(),
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
            path_params: HashMap::new(),
        };

        Ok(into_hyper(self.route(&mut request)))
    }
}

fn from_header_map(map: &HeaderMap) -> HashMap<String, String> {
    let mut headers: HashMap<String, String> = HashMap::with_capacity(map.keys_len());
    for (name, value) in map {
        let value = match value.to_str() {
            Ok(value) => value,
            Err(_) => {
                tracing::trace!(header = %name, "dropping non UTF-8 request header");
                continue;
            }
        };

        headers
            .entry(name.as_str().to_owned())
            .and_modify(|joined| {
                joined.push_str(", ");
                joined.push_str(value);
            })
            .or_insert_with(|| value.to_owned());
    }
    headers
}

fn into_hyper(response: Response) -> hyper::Response<Body> {
    let mut res = hyper::Response::new(Body::from(response.body));
    *res.status_mut() = response.status;

    for (name, value) in response.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                res.headers_mut().insert(name, value);
            }
            _ => tracing::warn!(header = %name, "skipping invalid response header"),
        }
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::StatusCode;

    #[test]
    fn request_headers_are_joined() {
        let mut map = HeaderMap::new();
        map.append("accept", HeaderValue::from_static("text/html"));
        map.append("accept", HeaderValue::from_static("application/json"));
        map.insert("x-raw", HeaderValue::from_bytes(b"\xff").unwrap());

        let headers = from_header_map(&map);
        assert_eq!(headers["accept"], "text/html, application/json");
        assert!(!headers.contains_key("x-raw"));
    }

    #[test]
    fn invalid_response_headers_are_skipped() {
        let response = Response::new("ok")
            .status(StatusCode::ACCEPTED)
            .with_header("X-Good", "yes")
            .with_header("Bad Name", "value")
            .with_header("X-Bad-Value", "line\nbreak");

        let res = into_hyper(response);
        assert_eq!(res.status(), StatusCode::ACCEPTED);
        assert_eq!(res.headers().len(), 1);
        assert_eq!(res.headers()["x-good"], "yes");
    }
}
