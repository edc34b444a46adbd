//! Environment-driven server configuration.

use std::net::SocketAddr;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_SERVICE_NAME: &str = "confreview-api";

/// Settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// `PostgreSQL` connection string.
    pub database_url: String,
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Upper bound on pooled database connections.
    pub database_max_connections: u32,
    /// OTLP/gRPC collector endpoint. Span export is off when unset.
    pub otlp_endpoint: Option<String>,
    /// Service name reported to the collector.
    pub service_name: String,
}

impl ApiConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a numeric
    /// variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of
    /// a variable if it is set.
    ///
    /// # Errors
    ///
    /// Same as [`ApiConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let set = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = set("DATABASE_URL").ok_or_else(|| {
            AppError::Config("DATABASE_URL environment variable must be set".to_owned())
        })?;
        let host = set("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match set("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let database_max_connections = match set("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse().map_err(|e| {
                AppError::Config(format!("DATABASE_MAX_CONNECTIONS must be a valid u32: {e}"))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            host,
            port,
            database_max_connections,
            otlp_endpoint: set("OTEL_EXPORTER_OTLP_ENDPOINT"),
            service_name: set("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_owned()),
        })
    }

    /// Returns the socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host` and `port` do not form a valid
    /// socket address.
    pub fn listen_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
