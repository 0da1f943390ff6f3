use std::env;

/// Bind host when `HOST` is unset.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Bind port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8000;

/// OpenAPI document path when `OPENAPI_PATH` is unset.
pub const DEFAULT_OPENAPI_PATH: &str = "openapi.json";

/// Server configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind host (`HOST`).
    pub host: String,
    /// Bind port (`PORT`).
    pub port: u16,
    /// Path to the OpenAPI document loaded at startup (`OPENAPI_PATH`).
    pub spec_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            spec_path: DEFAULT_OPENAPI_PATH.to_string(),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from the environment, falling back to the
    /// documented defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            spec_path: env::var("OPENAPI_PATH").unwrap_or(defaults.spec_path),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
