//! Layered application settings.
//!
//! Precedence, lowest to highest: built-in defaults, an optional
//! `config/default.toml` file, then `BLOG__`-prefixed environment
//! variables (e.g. `BLOG__AUTH__JWT_SECRET`, `BLOG__SERVER__PORT`).
//! `.env` files are honored via dotenvy before the environment is read.

use std::path::PathBuf;

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

pub const DEV_JWT_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub media: MediaSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// HS256 signing secret. Held in `SecretString` so it never lands
    /// in debug output or logs.
    pub jwt_secret: SecretString,
    pub token_ttl_hours: i64,
}

impl AuthSettings {
    /// True while the built-in development secret is still in place.
    pub fn uses_dev_secret(&self) -> bool {
        use secrecy::ExposeSecret;
        self.jwt_secret.expose_secret() == DEV_JWT_SECRET
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaSettings {
    /// Directory uploaded blobs are written to.
    pub upload_dir: PathBuf,
    /// URL prefix under which that directory is served.
    pub public_prefix: String,
}

impl Settings {
    pub fn load() -> Result<Settings, SettingsError> {
        dotenvy::dotenv().ok();

        let settings = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "postgres://localhost/blog")?
            .set_default("database.max_connections", 8)?
            .set_default("auth.jwt_secret", DEV_JWT_SECRET)?
            .set_default("auth.token_ttl_hours", 24)?
            .set_default("media.upload_dir", "./data/uploads")?
            .set_default("media.public_prefix", "/uploads")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("BLOG")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
