use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
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

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DatabaseSettings {
    pub path: PathBuf,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_connections: u32,
    pub create_if_missing: bool,
}

impl DatabaseSettings {
    /// Settings for tools that open a single database file directly.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: 1,
            create_if_missing: true,
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix("TRIVIA")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Defaults, then `configuration/base.*`, then the file named by `TRIVIA_CONFIG`,
    /// then `TRIVIA_*` environment variables.
    pub fn load() -> Result<Settings, ConfigError> {
        let extra = std::env::var("TRIVIA_CONFIG").ok().map(PathBuf::from);
        Self::build(extra.as_deref(), environment())
    }

    fn build(extra: Option<&Path>, env: Environment) -> Result<Settings, ConfigError> {
        let mut builder = Config::builder()
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 8080)?
            .set_default("database.path", "trivia.db")?
            .set_default("database.max_connections", 5)?
            .set_default("database.create_if_missing", true)?
            .add_source(File::with_name("configuration/base").required(false));
        if let Some(path) = extra {
            builder = builder.add_source(File::from(path));
        }
        builder.add_source(env).build()?.try_deserialize()
    }
}
