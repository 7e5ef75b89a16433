use std::str::FromStr;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::sqlite::SqliteConnectOptions;

#[derive(Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub page_size: usize,
    /// Fixed seed for quiz selection, mostly useful for demos.
    #[serde(default)]
    pub quiz_seed: Option<u64>,
}

#[derive(Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Deserialize)]
pub struct DatabaseSettings {
    pub url: SecretString,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_connections: u32,
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        Ok(SqliteConnectOptions::from_str(self.url.expose_secret())?.create_if_missing(true))
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 8080_i64)?
        .set_default("database.url", "sqlite:trivia.db")?
        .set_default("database.max_connections", 5_i64)?
        .set_default("page_size", 10_i64)
}

/// Defaults, then `configuration.{yaml,toml,json}` if present, then `APP_*` variables
/// (`APP_APPLICATION__PORT=9000`).
pub fn get_configuration() -> Result<Settings, ConfigError> {
    defaults()?
        .add_source(File::with_name("configuration").required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}
