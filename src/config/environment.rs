//! Deployment environment selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

/// Deployment environment; picks the `{environment}.toml` overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// Variable read by [`Environment::from_env`].
    pub const ENV_VAR: &'static str = "MARKETPLACE_APP_ENV";

    pub const ALL: [Environment; 4] = [
        Environment::Development,
        Environment::Test,
        Environment::Staging,
        Environment::Production,
    ];

    /// Reads `MARKETPLACE_APP_ENV`, falling back to `Development` when unset or unknown.
    pub fn from_env() -> Self {
        Self::from_optional(std::env::var(Self::ENV_VAR).ok().as_deref())
    }

    fn from_optional(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::EnvVarError(format!(
                "Unknown environment '{}'. Expected one of: {}",
                other,
                Environment::ALL.map(|e| e.as_str()).join(", ")
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_aliases() {
        let cases = [
            ("development", Environment::Development),
            ("dev", Environment::Development),
            ("TEST", Environment::Test),
            ("stage", Environment::Staging),
            (" prod ", Environment::Production),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<Environment>().unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_unknown_name_lists_valid_values() {
        let err = "qa".parse::<Environment>().unwrap_err();
        assert!(err.to_string().contains("development, test, staging, production"));
    }

    #[test]
    fn test_missing_or_invalid_value_falls_back_to_development() {
        assert_eq!(Environment::from_optional(None), Environment::Development);
        assert_eq!(Environment::from_optional(Some("qa")), Environment::Development);
        assert_eq!(Environment::from_optional(Some("prod")), Environment::Production);
    }

    #[test]
    fn test_display_matches_overlay_file_stem() {
        for env in Environment::ALL {
            assert_eq!(env.to_string(), env.as_str());
        }
        assert!(Environment::Production.is_production());
        assert!(!Environment::Staging.is_production());
    }
}
