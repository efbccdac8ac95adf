use crate::assessment::WeightingConfig;
use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the calculator service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub weighting: WeightingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("AIHE_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("AIHE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("AIHE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("AIHE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let weighting = match env::var("AIHE_WEIGHTING_FILE") {
            Ok(path) if !path.trim().is_empty() => load_weighting(PathBuf::from(path.trim()))?,
            _ => WeightingConfig::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            weighting,
        })
    }
}

fn load_weighting(path: PathBuf) -> Result<WeightingConfig, ConfigError> {
    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::WeightingFile {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::WeightingFormat { path, source })
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    WeightingFile {
        path: PathBuf,
        source: std::io::Error,
    },
    WeightingFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "AIHE_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "AIHE_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::WeightingFile { path, .. } => {
                write!(f, "unable to read weighting config '{}'", path.display())
            }
            ConfigError::WeightingFormat { path, .. } => {
                write!(f, "weighting config '{}' is not valid JSON", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::WeightingFile { source, .. } => Some(source),
            ConfigError::WeightingFormat { source, .. } => Some(source),
        }
    }
}
