mod database_config;
mod raw_config;
mod security_config;

pub use self::{
    database_config::DatabaseConfig, raw_config::RawConfig, security_config::SecurityConfig,
};

/// Main server config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Database configuration.
    pub db: DatabaseConfig,
    /// Security configuration (encryption seeds, JWT secret).
    pub security: SecurityConfig,
}

impl From<RawConfig> for Config {
    fn from(raw_config: RawConfig) -> Self {
        Self {
            db: raw_config.db,
            security: raw_config.security,
        }
    }
}

impl AsRef<Config> for Config {
    fn as_ref(&self) -> &Config {
        self
    }
}
