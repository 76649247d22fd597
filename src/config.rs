//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;

use crate::error::{Result, ServiceError};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Logging ===
    /// Log filter (trace, debug, info, warn, error or a full directive).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit log lines as JSON.
    #[serde(default)]
    pub log_json: bool,

    // === Optional Surfaces ===
    /// Serve Swagger UI and the OpenAPI document.
    #[serde(default = "default_true")]
    pub enable_docs: bool,

    /// Install the Prometheus recorder and serve `/metrics`.
    #[serde(default = "default_true")]
    pub enable_metrics: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            rust_log: default_log_level(),
            log_json: false,
            enable_docs: true,
            enable_metrics: true,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(ServiceError::InvalidConfig("PORT must be non-zero".to_string()));
        }

        if self.host.parse::<IpAddr>().is_err() {
            return Err(ServiceError::InvalidConfig(format!(
                "HOST must be an IP address, got {:?}",
                self.host
            )));
        }

        if self.rust_log.trim().is_empty() {
            return Err(ServiceError::InvalidConfig("RUST_LOG must not be empty".to_string()));
        }

        Ok(())
    }

    /// Validate, then describe the effective settings one line each.
    pub fn summary(&self) -> Result<Vec<String>> {
        self.validate()?;

        let enabled = |on: bool| if on { "Enabled" } else { "Disabled" };
        Ok(vec![
            format!("Listen Address: {}", self.bind_addr()?),
            format!("Log Filter: {}", self.rust_log),
            format!("Log Format: {}", if self.log_json { "JSON" } else { "Text" }),
            format!("Docs: {}", enabled(self.enable_docs)),
            format!("Metrics: {}", enabled(self.enable_metrics)),
        ])
    }

    /// Socket address the server listens on.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ServiceError::InvalidConfig(format!("invalid HOST {:?}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
