//! Layered runtime settings.
//!
//! Sources, lowest priority first:
//! - built-in defaults
//! - optional `trivia.toml` (or `.yaml`/`.json`) in the working directory
//! - environment variables such as `TRIVIA__DATABASE__PATH`, `TRIVIA__SERVER__PORT`
//!   or `TRIVIA__LOG__LEVEL`

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directives, e.g. `info` or `trivia_api=debug,tower_http=info`.
    pub level: String,
    /// Also log span enter/exit events.
    pub span_events: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            span_events: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::builder()?
            .add_source(File::with_name("trivia").required(false))
            .add_source(Environment::with_prefix("TRIVIA").separator("__"))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("database.path", "trivia.db")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("log.level", "info")?
            .set_default("log.span_events", false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable_without_sources() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.database.path, "trivia.db");
        assert_eq!(settings.server.address(), "0.0.0.0:8080");
        assert_eq!(settings.log.level, "info");
        assert!(!settings.log.span_events);
    }

    #[test]
    fn file_values_override_defaults() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .add_source(File::from_str(
                "[server]\nport = 5000\n[database]\npath = \"/tmp/quiz.db\"\n[log]\nlevel = \"debug\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.database.path, "/tmp/quiz.db");
        assert_eq!(settings.log.level, "debug");
    }
}
