//! # PathRouter
//!
//! PathRouter is a small HTTP request router with path parameters and middleware.
//!
//! Routes are matched against the request method and the full request path. They are
//! tried in the order they were registered and the first match wins, so overlapping
//! patterns are allowed and resolved predictably: register the more specific route
//! first.
//!
//! ## Features
//!
//! **Parameters in your routing pattern:** Give a path segment a name with `:name` and
//! the router delivers the matched value in `Request::path_params`.
//!
//! **Literal paths stay literal:** Everything outside a `:name` token is matched
//! exactly, including characters such as `.`, `+` or `(`.
//!
//! **Middleware:** Functions registered with [`Router::middleware`] run on every request
//! before routing and can annotate it for the handlers downstream.
//!
//! **Predictable fallbacks:** Unroutable requests get a JSON `404 Not Found`, or a
//! JSON `405 Method Not Allowed` if the path exists under another method. A handler
//! that fails with [`HandlerError`] produces a `500 Internal Server Error` instead of
//! tearing down the caller.
//!
//! ## Usage
//!
//! Here is a simple example:
//!
//! ```rust
//! use pathrouter::{HandlerError, Request, Response, Router};
//! use hyper::{Method, StatusCode};
//!
//! fn index(_: Request) -> Result<Response, HandlerError> {
//!     Ok(Response::new("Hello, World!"))
//! }
//!
//! fn hello(req: Request) -> Result<Response, HandlerError> {
//!     let user = req.param("user").ok_or("missing user")?;
//!     Ok(Response::new(format!("Hello, {}", user)))
//! }
//!
//! let router = Router::default()
//!     .get("/", index)
//!     .get("/hello/:user", hello);
//!
//! let res = router.route(&mut Request::new(Method::GET, "/hello/gordon"));
//! assert_eq!(res.status, StatusCode::OK);
//! assert_eq!(res.body, "Hello, gordon");
//! ```
//!
//! ### Named parameters
//!
//! As you can see, `:user` is a *named parameter*. The values are accessible via
//! `req.path_params` or [`Request::param`].
//!
//! Named parameters only match a single, non-empty path segment:
//!
//! ```ignore
//! Pattern: /user/:user
//!
//!  /user/gordon              match
//!  /user/you                 match
//!  /user/gordon/profile      no match
//!  /user/                    no match
//! ```
//!
//! A `:` that is not followed by a letter, digit or underscore is matched literally.
//!
//! ### Middleware
//!
//! Middleware receives the request and a scratch response. Only changes to the request
//! are reliably observed downstream; see [`Router::middleware`].
//!
//! ```rust
//! use pathrouter::{Request, Response, Router};
//! use hyper::Method;
//!
//! let router = Router::default()
//!     .middleware(|req: &mut Request, _: &mut Response| {
//!         tracing::info!(method = %req.method, path = %req.path, "request");
//!     });
//!
//! let res = router.route(&mut Request::new(Method::GET, "/"));
//! assert_eq!(res.body, r#"{"error": "Resource not found"}"#);
//! ```
//!
//! ### Serving with hyper
//!
//! ```rust,no_run
//! use pathrouter::{Request, Response, Router};
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = Router::default()
//!         .get("/", |_: Request| Ok(Response::new("Hello, World!")));
//!
//!     hyper::Server::bind(&([127, 0, 0, 1], 3000).into())
//!         .serve(router.into_service())
//!         .await;
//! }
//! ```
//!
//! ## Logging
//!
//! The router emits [`tracing`](https://docs.rs/tracing) events: route registration
//! at `trace` level, dispatch decisions and handler failures at `debug` level. It
//! never installs a subscriber.

#![forbid(unsafe_code)]

pub mod error;
pub mod path;
pub mod request;

#[doc(hidden)]
pub mod router;

pub mod service;

#[doc(inline)]
pub use error::{HandlerError, PatternError};

#[doc(inline)]
pub use path::Params;

#[doc(inline)]
pub use request::{Request, Response};

#[doc(inline)]
pub use router::{Handler, Match, Middleware, Router};

// test the code examples in README.md
#[cfg(doctest)]
mod test_readme {
  macro_rules! doc_comment {
    ($x:expr) => {
        #[doc = $x]
        extern {}
    };
  }

  doc_comment!(include_str!("../README.md"));
}
