//! Checkout gateway configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use bff_http::{DEFAULT_MAX_BODY_SIZE, HttpClientConfig, TransportSecurity};
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Prefix of environment variables overriding file settings, e.g. `CHECKOUT_BFF__BASE_URL`.
pub const ENV_PREFIX: &str = "CHECKOUT_BFF__";

pub const DEFAULT_USER_AGENT: &str = concat!("checkout-bff/", env!("CARGO_PKG_VERSION"));

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckoutBffConfig {
    /// Root URL of the checkout (orders) service; routes are resolved against it.
    pub base_url: Url,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Accept `http://` base URLs. Only for local services and tests.
    #[serde(default)]
    pub allow_insecure_http: bool,
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_max_body_size() -> usize {
    DEFAULT_MAX_BODY_SIZE
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_owned()
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("invalid checkout_bff configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

impl CheckoutBffConfig {
    /// Configuration with defaults for everything except the base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            user_agent: default_user_agent(),
            allow_insecure_http: false,
        }
    }

    /// Load from an optional YAML file, then `CHECKOUT_BFF__*` environment variables.
    ///
    /// # Errors
    /// `ConfigError::FileNotFound` when `path` is given but missing,
    /// `ConfigError::Invalid` when the merged values do not form a valid config
    /// (for example no `base_url`)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            figment = figment.merge(Yaml::file(path));
        }
        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extract from a caller-assembled figment, e.g. a section of a larger app config.
    ///
    /// # Errors
    /// `ConfigError::Invalid` when the figment does not hold a valid config
    pub fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment.extract().map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Settings for the underlying HTTP client.
    #[must_use]
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            request_timeout: self.request_timeout(),
            max_body_size: self.max_body_size,
            user_agent: self.user_agent.clone(),
            transport: if self.allow_insecure_http {
                TransportSecurity::AllowInsecureHttp
            } else {
                TransportSecurity::TlsOnly
            },
            ..HttpClientConfig::default()
        }
    }
}
