// src/config.rs

use std::{env, fmt};

use dotenvy::dotenv;

/// Number of questions returned per page by every paginated listing.
pub const QUESTIONS_PER_PAGE: usize = 10;

const DEFAULT_PORT: u16 = 5000;

/// Selects which store the application is constructed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Test,
}

impl RunMode {
    /// Reads `APP_ENV`; only the value `test` selects test mode.
    pub fn from_env() -> Self {
        match env::var("APP_ENV") {
            Ok(value) if value.eq_ignore_ascii_case("test") => RunMode::Test,
            _ => RunMode::Development,
        }
    }

    /// Name of the variable holding the store location for this mode.
    pub fn database_var(self) -> &'static str {
        match self {
            RunMode::Development => "DEV_DB_URI",
            RunMode::Test => "TEST_DB_URI",
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "{} must be set", var),
            ConfigError::Invalid { var, value } => write!(f, "{} has invalid value '{}'", var, value),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: RunMode,
    pub database_url: String,
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    pub fn from_env(mode: RunMode) -> Result<Self, ConfigError> {
        dotenv().ok();

        Self::from_lookup(mode, |key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(mode: RunMode, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = mode.database_var();
        let database_url = lookup(var).ok_or(ConfigError::Missing(var))?;

        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            mode,
            database_url,
            rust_log,
            port,
        })
    }
}
