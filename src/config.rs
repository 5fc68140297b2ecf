//! Service configuration.
//!
//! [`ServiceConfig`] carries the values that shape the public surface: where
//! the routes are mounted, which port the documented server listens on, and
//! the pagination defaults and ceiling. Build it with
//! [`ServiceConfigBuilder`] or load it from the environment.

use crate::error::{BuildError, BuildResult};

/// Default mount path of the registration routes.
pub const DEFAULT_MOUNT_PATH: &str = "/api/registrations";
/// Default port advertised in the API documentation.
pub const DEFAULT_PORT: u16 = 6969;
/// Page size used when the client sends no `limit`.
pub const DEFAULT_LIMIT: usize = 10;
/// Largest `limit` a client may request.
pub const DEFAULT_MAX_LIMIT: usize = 100;

pub const ENV_PORT: &str = "SERVE_PORT";
pub const ENV_MOUNT_PATH: &str = "REGISTRATION_MOUNT_PATH";
pub const ENV_DEFAULT_LIMIT: &str = "REGISTRATION_DEFAULT_LIMIT";
pub const ENV_MAX_LIMIT: &str = "REGISTRATION_MAX_LIMIT";

/// Configuration for the registration service and its routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Path the registration routes are mounted under, e.g. `/api/registrations`.
    pub mount_path: String,

    /// Port the hosting HTTP server listens on.
    pub port: u16,

    /// Page size when the client does not send `limit`.
    pub default_limit: usize,

    /// Upper bound for `limit`; larger requests are rejected.
    pub max_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            mount_path: DEFAULT_MOUNT_PATH.to_string(),
            port: DEFAULT_PORT,
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

impl ServiceConfig {
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::new()
    }

    /// Load configuration from the process environment.
    ///
    /// Unset variables keep their defaults; set but unparsable ones are an error.
    pub fn from_env() -> BuildResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> BuildResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ServiceConfigBuilder::new();

        if let Some(path) = lookup(ENV_MOUNT_PATH) {
            builder = builder.mount_path(path);
        }
        if let Some(port) = lookup(ENV_PORT) {
            builder = builder.port(parse_env(ENV_PORT, &port)?);
        }
        if let Some(limit) = lookup(ENV_DEFAULT_LIMIT) {
            builder = builder.default_limit(parse_env(ENV_DEFAULT_LIMIT, &limit)?);
        }
        if let Some(limit) = lookup(ENV_MAX_LIMIT) {
            builder = builder.max_limit(parse_env(ENV_MAX_LIMIT, &limit)?);
        }

        builder.build()
    }

    /// Base URL of the API as documented, e.g. `http://localhost:6969/api`.
    ///
    /// This is the mount path minus its final segment, which names the
    /// registration collection itself.
    pub fn server_url(&self) -> String {
        let api_root = self
            .mount_path
            .rsplit_once('/')
            .map(|(root, _)| root)
            .unwrap_or("");
        format!("http://localhost:{}{}", self.port, api_root)
    }
}

fn parse_env<T: std::str::FromStr>(variable: &str, value: &str) -> BuildResult<T> {
    value.trim().parse().map_err(|_| BuildError::InvalidEnvironment {
        variable: variable.to_string(),
        value: value.to_string(),
    })
}

/// Builder for [`ServiceConfig`].
#[derive(Debug, Clone, Default)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mount path. A trailing `/` is dropped.
    pub fn mount_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.config.mount_path = path.trim_end_matches('/').to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn default_limit(mut self, limit: usize) -> Self {
        self.config.default_limit = limit;
        self
    }

    pub fn max_limit(mut self, limit: usize) -> Self {
        self.config.max_limit = limit;
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> BuildResult<ServiceConfig> {
        let config = self.config;

        if !config.mount_path.starts_with('/') {
            return Err(BuildError::InvalidConfiguration {
                message: format!("mount path '{}' must start with '/'", config.mount_path),
            });
        }
        if config.default_limit == 0 {
            return Err(BuildError::InvalidConfiguration {
                message: "default limit must be at least 1".to_string(),
            });
        }
        if config.max_limit < config.default_limit {
            return Err(BuildError::InvalidConfiguration {
                message: format!(
                    "max limit {} is below the default limit {}",
                    config.max_limit, config.default_limit
                ),
            });
        }

        Ok(config)
    }
}
