//! Configuration loading and path helpers.
//!
//! Figment merges built-in defaults, `bookdb.toml`, `bookdb.<env>.toml`
//! for the current `RUST_ENV`, and `BOOKDB_*` environment variables
//! (`__` separates nested keys, e.g. `BOOKDB_SERVER__PORT=9090`).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub corpus_dir: String,
    pub index_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                corpus_dir: "data/corpus".to_string(),
                index_dir: "data/index".to_string(),
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_for_env(None)
    }

    pub fn load_for_env(env_name: Option<&str>) -> anyhow::Result<Self> {
        let env_name = match env_name {
            Some(name) => name.to_string(),
            None => env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string()),
        };

        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file("bookdb.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("bookdb.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("bookdb.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("bookdb.test.toml")),
            _ => {}
        }
        let config: Config = figment
            .merge(Env::prefixed("BOOKDB_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.host.trim().is_empty() {
            anyhow::bail!("server.host must not be empty");
        }
        if self.server.port == 0 {
            anyhow::bail!("server.port must be non-zero");
        }
        if self.data.corpus_dir.trim().is_empty() {
            anyhow::bail!("data.corpus_dir must not be empty");
        }
        if self.data.index_dir.trim().is_empty() {
            anyhow::bail!("data.index_dir must not be empty");
        }
        Ok(())
    }

    pub fn corpus_dir(&self) -> PathBuf {
        expand_path(&self.data.corpus_dir)
    }

    pub fn index_dir(&self) -> PathBuf {
        expand_path(&self.data.index_dir)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(expanded_env.as_ref());
    PathBuf::from(expanded.as_ref())
}
