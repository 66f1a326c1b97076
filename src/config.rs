//! Service configuration.
//!
//! All settings come from the environment once at startup and travel as an
//! explicit [`AppConfig`] value, so tests can construct a configuration
//! against a scratch database without touching the process environment.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Image Brightness Analyzer";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: '{value}'")]
    InvalidVar { var: &'static str, value: String },
}

/// Runtime configuration, resolved once in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database file backing the result store.
    pub db_path: PathBuf,
    /// Directory annotated output images are written to.
    pub output_dir: PathBuf,
    pub bind_addr: SocketAddr,
    /// Base URL clients can reach the service under; used to build
    /// `processed_img_url` values in analyze responses.
    pub public_base_url: String,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// `BRIGHTSPOT_DB_PATH` is required — there is no baked-in default, so a
    /// missing database location fails loudly at startup instead of
    /// misbehaving later. The rest have documented defaults:
    /// `BRIGHTSPOT_OUTPUT_DIR` (`result`), `BRIGHTSPOT_BIND_ADDR`
    /// (`0.0.0.0:8000`) and `BRIGHTSPOT_PUBLIC_URL`
    /// (`http://localhost:<port>`).
    pub fn from_env() -> Result<Self, ConfigError> {
        let db_path = env::var("BRIGHTSPOT_DB_PATH")
            .map_err(|_| ConfigError::MissingVar("BRIGHTSPOT_DB_PATH"))?;

        let output_dir = env::var("BRIGHTSPOT_OUTPUT_DIR").unwrap_or_else(|_| "result".into());

        let bind_raw =
            env::var("BRIGHTSPOT_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
        let bind_addr: SocketAddr = bind_raw.parse().map_err(|_| ConfigError::InvalidVar {
            var: "BRIGHTSPOT_BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let public_base_url = env::var("BRIGHTSPOT_PUBLIC_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", bind_addr.port()));

        Ok(Self {
            db_path: PathBuf::from(db_path),
            output_dir: PathBuf::from(output_dir),
            bind_addr,
            public_base_url,
        })
    }
}
