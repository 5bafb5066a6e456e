//! Server configuration read from the environment.

use std::net::SocketAddr;

use crate::error::AppError;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable multi-line output for local development.
    Pretty,
}

/// Runtime configuration for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Log output format.
    pub log_format: LogFormat,
    /// `EnvFilter` directives.
    pub log_filter: String,
    /// OTLP collector endpoint; span export is off when `None`.
    pub otlp_endpoint: Option<String>,
    /// Allowed CORS origins; any origin is allowed when empty.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 3000,
            log_format: LogFormat::Json,
            log_filter: "info".to_owned(),
            otlp_endpoint: None,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but malformed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, treating blank values as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` is not a valid u16 or
    /// `LOG_FORMAT` is not `json` or `pretty`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => defaults.port,
        };

        let log_format = match get("LOG_FORMAT").as_deref().map(str::to_ascii_lowercase) {
            None => defaults.log_format,
            Some(f) if f == "json" => LogFormat::Json,
            Some(f) if f == "pretty" => LogFormat::Pretty,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "LOG_FORMAT must be `json` or `pretty`, got `{other}`"
                )));
            }
        };

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            log_format,
            log_filter: get("RUST_LOG").unwrap_or(defaults.log_filter),
            otlp_endpoint: get("OTEL_EXPORTER_OTLP_ENDPOINT"),
            cors_allowed_origins,
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
