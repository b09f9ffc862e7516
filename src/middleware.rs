use std::rc::Rc;

use actix_utils::future::{ok, Ready};
use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{
        header::{self, HeaderValue},
        Method,
    },
    Error, HttpResponse,
};
use futures_util::future::{FutureExt as _, LocalBoxFuture};
use log::{debug, warn};
use once_cell::sync::Lazy;

use crate::config::CorsConfig;

static ALLOW_HEADERS: Lazy<HeaderValue> = Lazy::new(|| {
    HeaderValue::from_static(
        "Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization, accept, \
         origin, Cache-Control, X-Requested-With",
    )
});

static ALLOW_METHODS: Lazy<HeaderValue> =
    Lazy::new(|| HeaderValue::from_static("POST, OPTIONS, GET, PUT, DELETE"));

#[derive(Debug)]
pub(crate) struct Inner {
    pub(crate) enabled: bool,
    pub(crate) allow_origin: HeaderValue,
}

impl Inner {
    fn new(config: CorsConfig) -> Inner {
        let allow_origin = match HeaderValue::from_str(&config.allowed_origin) {
            Ok(origin) => origin,
            Err(_) => {
                warn!(
                    "configured origin {:?} is not a valid header value; using \"*\"",
                    config.allowed_origin
                );
                HeaderValue::from_static("*")
            }
        };

        Inner {
            enabled: config.enabled,
            allow_origin,
        }
    }
}

/// Middleware factory for environment-gated CORS support.
///
/// Construct with [`Cors::from_env`] (or [`Cors::new`] for explicit values)
/// and pass to Actix Web's `App::wrap()`, `Scope::wrap()`, or
/// `Resource::wrap()`. Configuration is resolved once at construction; the
/// resulting middleware holds only immutable state and is freely cloneable
/// across workers.
#[derive(Debug, Clone)]
pub struct Cors {
    inner: Rc<Inner>,
}

impl Cors {
    /// Build the middleware from the process environment.
    ///
    /// Reads [`ENABLE_VAR`](crate::ENABLE_VAR) and
    /// [`ALLOW_ORIGIN_VAR`](crate::ALLOW_ORIGIN_VAR). Missing or malformed
    /// values fall back to the documented defaults (disabled; wildcard
    /// origin) rather than failing.
    pub fn from_env() -> Cors {
        Cors::from_config(CorsConfig::from_env())
    }

    /// Build the middleware from explicit values, bypassing the environment.
    pub fn new(enabled: bool, allowed_origin: impl Into<String>) -> Cors {
        Cors::from_config(CorsConfig::new(enabled, allowed_origin))
    }

    /// Build the middleware from an already-resolved [`CorsConfig`].
    pub fn from_config(config: CorsConfig) -> Cors {
        Cors {
            inner: Rc::new(Inner::new(config)),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Cors
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CorsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(CorsMiddleware {
            service,
            inner: Rc::clone(&self.inner),
        })
    }
}

/// Service wrapper produced by [`Cors`].
#[doc(hidden)]
#[derive(Debug, Clone)]
pub struct CorsMiddleware<S> {
    pub(crate) service: S,
    pub(crate) inner: Rc<Inner>,
}

impl<S> CorsMiddleware<S> {
    /// Answer a preflight request without invoking the wrapped service.
    fn handle_preflight(inner: &Inner, req: ServiceRequest) -> ServiceResponse {
        let mut res = HttpResponse::NoContent();
        res.insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, inner.allow_origin.clone()))
            .insert_header((
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            ))
            .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS.clone()))
            .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS.clone()));

        let res = res.finish();
        req.into_response(res)
    }

    fn augment_response<B>(inner: &Inner, mut res: ServiceResponse<B>) -> ServiceResponse<B> {
        let headers = res.headers_mut();

        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            inner.allow_origin.clone(),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS.clone());
        headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS.clone());

        res
    }
}

impl<S, B> Service<ServiceRequest> for CorsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // checked before anything else so a disabled middleware has zero
        // observable effect on the request or response
        if !self.inner.enabled {
            let fut = self.service.call(req);
            return async move { fut.await.map(|res| res.map_into_left_body()) }.boxed_local();
        }

        if req.method() == Method::OPTIONS {
            debug!("answering preflight for {}", req.path());
            let res = Self::handle_preflight(&self.inner, req);
            return ok(res.map_into_right_body()).boxed_local();
        }

        let inner = Rc::clone(&self.inner);
        let fut = self.service.call(req);

        async move {
            let res = fut.await?;
            Ok(Self::augment_response(&inner, res).map_into_left_body())
        }
        .boxed_local()
    }
}
