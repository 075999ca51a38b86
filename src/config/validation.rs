//! Range and format checks for loaded settings.
//!
//! Each section validates itself and reports the first offending field as a
//! dotted key (`database.min_connections`).

use crate::config::error::ConfigError;
use crate::config::settings::{
    CacheBackend, CacheConfig, DatabaseConfig, FileSettings, JwtConfig, LoggerSettings,
    ServerConfig, Settings,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

const VALID_DATABASE_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

const VALID_REDIS_SCHEMES: &[&str] = &["redis://", "rediss://", "redis+unix://", "unix://"];

const MIN_JWT_SECRET_LEN: usize = 32;

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host must not be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Set MARKETPLACE_DATABASE__URL or database.url.",
            ));
        }

        if !VALID_DATABASE_SCHEMES
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(ConfigError::validation(
                "database.url",
                "Expected a PostgreSQL URL: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl JwtConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::validation(
                "jwt.secret",
                "JWT secret is required. Set MARKETPLACE_JWT__SECRET.",
            ));
        }

        if self.secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::validation(
                "jwt.secret",
                format!("JWT secret must be at least {MIN_JWT_SECRET_LEN} characters."),
            ));
        }

        if self.access_token_expiration <= 0 {
            return Err(ConfigError::validation(
                "jwt.access_token_expiration",
                "Access token expiration must be a positive number of hours.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one of logger.console or logger.file must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl CacheConfig {
    /// Only the selected backend is checked, and nothing when caching is off.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        match self.backend {
            CacheBackend::Memory => {
                if self.memory.max_size == 0 {
                    return Err(ConfigError::validation(
                        "cache.memory.max_size",
                        "Memory cache size must be greater than 0.",
                    ));
                }
                if self.memory.ttl_seconds == 0 {
                    return Err(ConfigError::validation(
                        "cache.memory.ttl_seconds",
                        "Memory cache TTL must be greater than 0 seconds.",
                    ));
                }
            }
            CacheBackend::Redis => {
                if !VALID_REDIS_SCHEMES
                    .iter()
                    .any(|scheme| self.redis.url.starts_with(scheme))
                {
                    return Err(ConfigError::validation(
                        "cache.redis.url",
                        format!("Invalid Redis URL '{}'.", self.redis.url),
                    ));
                }
                if self.redis.pool_size == 0 {
                    return Err(ConfigError::validation(
                        "cache.redis.pool_size",
                        "Redis pool size must be greater than 0.",
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Settings {
    /// Validates every section, stopping at the first error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.jwt.validate()?;
        self.logger.validate()?;
        self.cache.validate()?;
        Ok(())
    }
}
