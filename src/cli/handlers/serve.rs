//! `serve --dry-run`: report what the server would do, then exit.

use crate::config::settings::Settings;
use crate::error::AppResult;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validates the configuration without opening any connection.
    pub fn dry_run(&self) -> AppResult<()> {
        self.config.validate()?;

        let cache = &self.config.cache;
        println!("✓ Configuration is valid");
        println!("✓ Environment: {}", self.config.application.environment);
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!(
            "✓ Database pool: {}-{} connections, auto-migrate {}",
            self.config.database.min_connections,
            self.config.database.max_connections,
            on_off(self.config.database.auto_migrate)
        );
        if cache.enabled {
            println!("✓ Response cache: {:?}", cache.backend);
        } else {
            println!("✓ Response cache: disabled");
        }
        println!("✓ Log level: {}", self.config.logger.level);
        println!("Dry run completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/marketplace".to_string();
        config.jwt.secret = "k".repeat(32);
        config
    }

    #[test]
    fn test_dry_run_accepts_valid_config() {
        let handler = ServeCommandHandler::new(valid_config());
        assert_eq!(handler.config().server.port, 3000);
        assert!(handler.dry_run().is_ok());
    }

    #[test]
    fn test_dry_run_rejects_missing_secret() {
        let mut config = valid_config();
        config.jwt.secret.clear();
        assert!(ServeCommandHandler::new(config).dry_run().is_err());
    }
}
