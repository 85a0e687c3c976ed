//! [`Router`](crate::Router) is a small first-match HTTP request router.
//!
//! Routes are kept in registration order and tried one after another. A route matches
//! when its method equals the request method and its template matches the whole
//! request path. The first such route wins, so a later route with an overlapping
//! template is only reached for paths the earlier one rejects:
//!
//! ```rust
//! use pathrouter::{Request, Response, Router, HandlerError};
//! use hyper::Method;
//!
//! fn new_user(_: Request) -> Result<Response, HandlerError> {
//!     Ok(Response::new("new user form"))
//! }
//!
//! fn show_user(req: Request) -> Result<Response, HandlerError> {
//!     Ok(Response::new(format!("user {}", req.param("id").unwrap_or_default())))
//! }
//!
//! let router = Router::default()
//!     .get("/users/new", new_user)
//!     .get("/users/:id", show_user);
//!
//! let res = router.route(&mut Request::new(Method::GET, "/users/new"));
//! assert_eq!(res.body, "new user form");
//!
//! let res = router.route(&mut Request::new(Method::GET, "/users/42"));
//! assert_eq!(res.body, "user 42");
//! ```
//!
//! Requests that match no route are answered with a JSON `404 Not Found`, or with
//! `405 Method Not Allowed` when the path is registered under a different method.
use crate::error::{HandlerError, PatternError};
use crate::path::{Params, Pattern};
use crate::request::{Request, Response};

use std::fmt;

use hyper::{Method, StatusCode};

/// Router dispatches requests to different handlers via configurable routes.
pub struct Router {
    routes: Vec<Route>,
    middleware: Vec<Box<dyn Middleware>>,
    handle_method_not_allowed: bool,
}

struct Route {
    method: Method,
    pattern: Pattern,
    handler: Box<dyn Handler>,
}

/// A route selected by [`Router::lookup`].
pub struct Match<'a> {
    pub handler: &'a dyn Handler,
    pub template: &'a str,
    pub params: Params<'a>,
}

impl Router {
    /// Insert a handler into the router for a specific path at the specified method.
    ///
    /// Any string is accepted as a template. Registration never deduplicates, so a
    /// route identical to an earlier one is unreachable.
    /// ```rust
    /// use pathrouter::{Request, Response, Router};
    /// use hyper::Method;
    ///
    /// let router = Router::default()
    ///     .handle("/teapot", Method::GET, |_: Request| Ok(Response::new("I am a teapot!")));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the template compiles to a matcher that is too large for the regex
    /// engine. Use [`Router::try_handle`] to get the error instead.
    pub fn handle(self, path: &str, method: Method, handler: impl Handler + 'static) -> Self {
        match self.try_handle(path, method, handler) {
            Ok(router) => router,
            Err(err) => panic!("{}", err),
        }
    }

    /// Like [`Router::handle`], but returns an error instead of panicking.
    pub fn try_handle(
        mut self,
        path: &str,
        method: Method,
        handler: impl Handler + 'static,
    ) -> Result<Self, PatternError> {
        let pattern = Pattern::compile(path)?;

        tracing::trace!(
            method = %method,
            template = path,
            params = ?pattern.param_names(),
            "registered route"
        );

        self.routes.push(Route {
            method,
            pattern,
            handler: Box::new(handler),
        });

        Ok(self)
    }

    /// Register a handler for `GET` requests
    pub fn get(self, path: &str, handler: impl Handler + 'static) -> Self {
        self.handle(path, Method::GET, handler)
    }

    /// Register a handler for `HEAD` requests
    pub fn head(self, path: &str, handler: impl Handler + 'static) -> Self {
        self.handle(path, Method::HEAD, handler)
    }

    /// Register a handler for `OPTIONS` requests
    pub fn options(self, path: &str, handler: impl Handler + 'static) -> Self {
        self.handle(path, Method::OPTIONS, handler)
    }

    /// Register a handler for `POST` requests
    pub fn post(self, path: &str, handler: impl Handler + 'static) -> Self {
        self.handle(path, Method::POST, handler)
    }

    /// Register a handler for `PUT` requests
    pub fn put(self, path: &str, handler: impl Handler + 'static) -> Self {
        self.handle(path, Method::PUT, handler)
    }

    /// Register a handler for `PATCH` requests
    pub fn patch(self, path: &str, handler: impl Handler + 'static) -> Self {
        self.handle(path, Method::PATCH, handler)
    }

    /// Register a handler for `DELETE` requests
    pub fn delete(self, path: &str, handler: impl Handler + 'static) -> Self {
        self.handle(path, Method::DELETE, handler)
    }

    /// Appends a middleware that runs on every request, in registration order, before
    /// any route is matched.
    ///
    /// Middleware sees the caller's request and a fresh response. Changes to the
    /// request reach the handler. Changes to the response are discarded whenever a
    /// handler succeeds or a 404/405 is produced; they only carry over into the
    /// `500` response built when a handler fails.
    /// ```rust
    /// use pathrouter::{Request, Response, Router};
    /// use hyper::Method;
    ///
    /// let router = Router::default()
    ///     .middleware(|req: &mut Request, _: &mut Response| {
    ///         req.headers.insert("X-User".into(), "gordon".into());
    ///     })
    ///     .get("/whoami", |req: Request| {
    ///         Ok(Response::new(req.header("X-User").unwrap_or("anonymous").to_owned()))
    ///     });
    ///
    /// let res = router.route(&mut Request::new(Method::GET, "/whoami"));
    /// assert_eq!(res.body, "gordon");
    /// ```
    pub fn middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Box::new(middleware));
        self
    }

    /// If enabled, the router checks whether the path is registered under another
    /// method when a request cannot be routed, and if so answers with
    /// `405 Method Not Allowed`. If disabled, every unroutable request gets
    /// `404 Not Found`. Enabled by default.
    pub fn handle_method_not_allowed(mut self, enabled: bool) -> Self {
        self.handle_method_not_allowed = enabled;
        self
    }

    /// Finds the first route registered for `method` whose template matches `path`,
    /// without running anything.
    /// ```rust
    /// use pathrouter::{Request, Response, Router};
    /// use hyper::Method;
    ///
    /// let router = Router::default()
    ///     .get("/home/:section", |_: Request| Ok(Response::new("Welcome!")));
    ///
    /// let found = router.lookup(&Method::GET, "/home/news").unwrap();
    /// assert_eq!(found.template, "/home/:section");
    /// assert_eq!(found.params.get("section"), Some("news"));
    /// assert!(router.lookup(&Method::POST, "/home/news").is_none());
    /// ```
    pub fn lookup<'a>(&'a self, method: &Method, path: &'a str) -> Option<Match<'a>> {
        self.routes
            .iter()
            .filter(|route| route.method == *method)
            .find_map(|route| {
                route.pattern.at(path).map(|params| Match {
                    handler: &*route.handler,
                    template: route.pattern.template(),
                    params,
                })
            })
    }

    /// Returns the distinct methods, in registration order, of the routes whose
    /// templates match `path`.
    /// ```rust
    /// use pathrouter::{Request, Response, Router};
    /// use hyper::Method;
    ///
    /// let router = Router::default()
    ///     .get("/home", |_: Request| Ok(Response::new("Welcome!")))
    ///     .post("/home", |_: Request| Ok(Response::new("Welcome!")));
    ///
    /// assert_eq!(router.allowed("/home"), [&Method::GET, &Method::POST]);
    /// assert!(router.allowed("/away").is_empty());
    /// ```
    pub fn allowed(&self, path: &str) -> Vec<&Method> {
        let mut allowed: Vec<&Method> = Vec::new();
        for route in self.routes.iter().filter(|route| route.pattern.is_match(path)) {
            if !allowed.contains(&&route.method) {
                allowed.push(&route.method);
            }
        }
        allowed
    }

    /// Dispatches a request and returns the response.
    ///
    /// Middleware runs first against `req` itself, so its changes remain visible to the
    /// caller. The matched handler receives a copy of the request with the route's
    /// path parameters added to `path_params`. A [`HandlerError`] becomes a
    /// `500 Internal Server Error` whose body is `Error: ` followed by the message.
    /// ```rust
    /// use pathrouter::{Request, Response, Router};
    /// use hyper::{Method, StatusCode};
    ///
    /// let router = Router::default()
    ///     .get("/users/:id", |req: Request| Ok(Response::new(req.path_params["id"].clone())));
    ///
    /// let res = router.route(&mut Request::new(Method::GET, "/users/42"));
    /// assert_eq!(res.body, "42");
    ///
    /// let res = router.route(&mut Request::new(Method::POST, "/users/42"));
    /// assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
    ///
    /// let res = router.route(&mut Request::new(Method::GET, "/missing"));
    /// assert_eq!(res.status, StatusCode::NOT_FOUND);
    /// ```
    pub fn route(&self, req: &mut Request) -> Response {
        let mut response = Response::default();
        for middleware in &self.middleware {
            middleware.call(req, &mut response);
        }

        if let Some(found) = self.lookup(&req.method, &req.path) {
            tracing::debug!(
                method = %req.method,
                path = %req.path,
                template = found.template,
                "dispatching to route"
            );

            let mut matched = req.clone();
            for (name, value) in found.params.iter() {
                matched
                    .path_params
                    .insert(name.to_owned(), value.to_owned());
            }

            return match found.handler.handle(matched) {
                Ok(res) => res,
                Err(err) => {
                    tracing::debug!(
                        method = %req.method,
                        path = %req.path,
                        error = %err,
                        "handler failed"
                    );

                    response.status = StatusCode::INTERNAL_SERVER_ERROR;
                    response.status_text = "Internal Server Error".to_owned();
                    response.body = format!("Error: {}", err);
                    response
                }
            };
        }

        if self.handle_method_not_allowed
            && self
                .routes
                .iter()
                .any(|route| route.pattern.is_match(&req.path))
        {
            tracing::debug!(method = %req.method, path = %req.path, "method not allowed");
            return Response::method_not_allowed();
        }

        tracing::debug!(method = %req.method, path = %req.path, "no route matched");
        Response::not_found()
    }
}

/// The default router configuration
impl Default for Router {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            middleware: Vec::new(),
            handle_method_not_allowed: true,
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field(
                "routes",
                &self
                    .routes
                    .iter()
                    .map(|route| (route.method.as_str(), route.pattern.template()))
                    .collect::<Vec<_>>(),
            )
            .field("middleware", &self.middleware.len())
            .field("handle_method_not_allowed", &self.handle_method_not_allowed)
            .finish()
    }
}

/// Represents a HTTP handler function.
/// This trait is implemented for functions that take a `Request` and return a
/// `Result<Response, HandlerError>`
/// ```rust
/// # use pathrouter::{Handler, HandlerError, Request, Response};
/// fn hello(_: Request) -> Result<Response, HandlerError> {
///     Ok(Response::new("hello"))
/// }
///
/// let handler: Box<dyn Handler> = Box::new(hello);
/// ```
pub trait Handler: Send + Sync {
    fn handle(&self, req: Request) -> Result<Response, HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(Request) -> Result<Response, HandlerError> + Send + Sync,
{
    fn handle(&self, req: Request) -> Result<Response, HandlerError> {
        self(req)
    }
}

/// A hook run on every request before routing.
///
/// Implemented for functions taking `(&mut Request, &mut Response)`.
/// ```rust
/// # use pathrouter::{Middleware, Request, Response};
/// fn stamp(req: &mut Request, _: &mut Response) {
///     req.headers.insert("X-Seen".into(), "1".into());
/// }
///
/// let middleware: Box<dyn Middleware> = Box::new(stamp);
/// ```
pub trait Middleware: Send + Sync {
    fn call(&self, req: &mut Request, res: &mut Response);
}

impl<F> Middleware for F
where
    F: Fn(&mut Request, &mut Response) + Send + Sync,
{
    fn call(&self, req: &mut Request, res: &mut Response) {
        self(req, res)
    }
}
