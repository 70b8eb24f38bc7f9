//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the server configuration and the cost calculator.

use anyhow::Context;
use cost_core::OrderCostCalculator;
use serde::Deserialize;
use std::net::SocketAddr;

/// Config file searched when `ORDER_COST_CONFIG` is not set
const CONFIG_PATHS: [&str; 3] = [
    "config/order-cost.toml",
    "../config/order-cost.toml",
    "../../config/order-cost.toml",
];

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Largest request body accepted, in bytes
    pub max_body_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            environment: "development".to_string(),
            max_body_bytes: 64 * 1024,
        }
    }
}

impl AppConfig {
    /// Load defaults, then the TOML file, then environment variables.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match std::env::var("ORDER_COST_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::from_default_paths()?,
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path))
    }

    fn from_default_paths() -> anyhow::Result<Self> {
        for path in CONFIG_PATHS {
            if std::path::Path::new(path).exists() {
                return Self::from_file(path);
            }
        }
        Ok(Self::default())
    }

    /// Override fields from environment-style lookups
    /// (`HOST`, `PORT`, `ENVIRONMENT`, `MAX_BODY_BYTES`).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("PORT must be a port number, got {:?}", port))?;
        }
        if let Some(environment) = lookup("ENVIRONMENT") {
            self.environment = environment;
        }
        if let Some(limit) = lookup("MAX_BODY_BYTES") {
            self.max_body_bytes = limit
                .parse()
                .with_context(|| format!("MAX_BODY_BYTES must be a byte count, got {:?}", limit))?;
        }
        Ok(())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// Cost pipeline
    pub calculator: OrderCostCalculator,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            calculator: OrderCostCalculator::default(),
        }
    }

    /// Create state from the layered configuration
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(AppConfig::load()?))
    }
}
