use std::env;

/// Environment variable that switches the middleware on.
///
/// Only the exact string `"true"` enables it.
pub const ENABLE_VAR: &str = "ENABLE_CORS";

/// Environment variable holding the allowed origin.
///
/// Sent verbatim as `Access-Control-Allow-Origin`. Unset or empty falls back
/// to the wildcard `"*"`.
pub const ALLOW_ORIGIN_VAR: &str = "FABRIC_ALLOW_ORIGIN";

const WILDCARD: &str = "*";

/// Resolved CORS configuration.
///
/// Both fields are fixed for the lifetime of any middleware constructed from
/// them; re-reading the environment per request is deliberately not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Whether CORS headers are injected at all.
    pub enabled: bool,

    /// Value of the `Access-Control-Allow-Origin` response header.
    pub allowed_origin: String,
}

impl CorsConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> CorsConfig {
        let enable = env::var(ENABLE_VAR).ok();
        let origin = env::var(ALLOW_ORIGIN_VAR).ok();
        CorsConfig::resolve(enable.as_deref(), origin.as_deref())
    }

    /// Build configuration from explicit values.
    ///
    /// Applies the same defaulting as [`CorsConfig::from_env`]: an empty
    /// origin becomes the wildcard.
    pub fn new(enabled: bool, allowed_origin: impl Into<String>) -> CorsConfig {
        let allowed_origin = allowed_origin.into();

        CorsConfig {
            enabled,
            allowed_origin: if allowed_origin.is_empty() {
                WILDCARD.to_owned()
            } else {
                allowed_origin
            },
        }
    }

    fn resolve(enable: Option<&str>, origin: Option<&str>) -> CorsConfig {
        CorsConfig::new(enable == Some("true"), origin.unwrap_or(""))
    }
}
