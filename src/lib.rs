//! Environment-gated Cross-Origin Resource Sharing (CORS) middleware for Actix Web.
//!
//! The middleware is switched on and configured entirely through process
//! environment variables, resolved once when the middleware is constructed:
//!
//! - `ENABLE_CORS` — header injection happens only when this is exactly
//!   `"true"`; any other value (including unset) leaves every request
//!   untouched.
//! - `FABRIC_ALLOW_ORIGIN` — sent verbatim as `Access-Control-Allow-Origin`;
//!   unset or empty falls back to `"*"`.
//!
//! When enabled, every response carries a fixed set of CORS headers and
//! `OPTIONS` preflight requests are answered immediately with `204 No Content`
//! without reaching the wrapped service.
//!
//! # Example
//! ```no_run
//! use actix_web::{web, App, HttpServer};
//! use fabric_cors::Cors;
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     HttpServer::new(|| {
//!         App::new()
//!             .wrap(Cors::from_env())
//!             .default_service(web::to(|| async { "Hello, cross-origin world!" }))
//!     })
//!     .bind(("127.0.0.1", 8080))?
//!     .run()
//!     .await
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(future_incompatible, missing_docs, missing_debug_implementations)]

mod config;
mod middleware;

pub use crate::{
    config::{CorsConfig, ALLOW_ORIGIN_VAR, ENABLE_VAR},
    middleware::{Cors, CorsMiddleware},
};
