//! Client configuration and per-call option layering.
//!
//! Configuration (environment variables, see [`ClientOptions::from_env`]):
//!   BRANTA_BASE_URL     - API origin, e.g. `https://api.example.com`
//!   BRANTA_API_KEY      - Bearer key for mutating calls
//!   BRANTA_HMAC_SECRET  - Shared secret for request signing (optional)
//!
//! Precedence, per field: explicit per-call value, else client default,
//! else absent. An empty string counts as absent.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Local development server.
pub const LOCALHOST_URL: &str = "http://localhost:3000";

pub const ENV_BASE_URL: &str = "BRANTA_BASE_URL";
pub const ENV_API_KEY: &str = "BRANTA_API_KEY";
pub const ENV_HMAC_SECRET: &str = "BRANTA_HMAC_SECRET";

/// Explicit wins, else default.
pub fn resolve<'a, T: ?Sized>(explicit: Option<&'a T>, default: Option<&'a T>) -> Option<&'a T> {
    explicit.or(default)
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOptions {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub default_api_key: Option<String>,
    #[serde(default)]
    pub hmac_secret: Option<String>,
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read options from `BRANTA_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build options from any variable lookup (tests, config maps).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        Self {
            base_url: get(ENV_BASE_URL),
            default_api_key: get(ENV_API_KEY),
            hmac_secret: get(ENV_HMAC_SECRET),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.default_api_key = Some(key.into());
        self
    }

    pub fn with_hmac_secret(mut self, secret: impl Into<String>) -> Self {
        self.hmac_secret = Some(secret.into());
        self
    }

    /// Layer `self` (explicit) over `defaults`, field by field.
    pub fn merged_over(&self, defaults: &ClientOptions) -> ClientOptions {
        let pick = |explicit: &Option<String>, default: &Option<String>| {
            resolve(non_empty(explicit), non_empty(default)).map(str::to_string)
        };
        ClientOptions {
            base_url: pick(&self.base_url, &defaults.base_url),
            default_api_key: pick(&self.default_api_key, &defaults.default_api_key),
            hmac_secret: pick(&self.hmac_secret, &defaults.hmac_secret),
        }
    }

    pub fn base_url(&self) -> Option<&str> {
        non_empty(&self.base_url)
    }

    pub fn api_key(&self) -> Option<&str> {
        non_empty(&self.default_api_key)
    }

    pub fn hmac_secret(&self) -> Option<&str> {
        non_empty(&self.hmac_secret)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("ClientOptions")
            .field("base_url", &self.base_url)
            .field("default_api_key", &redact(&self.default_api_key))
            .field("hmac_secret", &redact(&self.hmac_secret))
            .finish()
    }
}
