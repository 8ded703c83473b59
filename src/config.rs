use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::commands::Command;

const SESSION_FILE: &str = "session.json";

#[derive(Parser, Debug)]
#[command(name = "quill", about = "A terminal client for a blog API")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the blog API
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Scheme word placed before the token in the `Authorization` header.
    pub auth_scheme: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub session_path: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            auth_scheme: "Token".to_string(),
        }
    }
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = Self::data_dir(cli);
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // CLI overrides
        if let Some(ref base_url) = cli.base_url {
            config.api.base_url = base_url.clone();
        }

        if config.storage.session_path.is_none() {
            config.storage.session_path = Some(data_dir.join(SESSION_FILE));
        }

        Ok(config)
    }

    pub fn data_dir(cli: &Cli) -> PathBuf {
        cli.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|home| home.join(".quill"))
                .unwrap_or_else(|| PathBuf::from(".quill"))
        })
    }

    pub fn session_path(&self) -> &Path {
        self.storage
            .session_path
            .as_deref()
            .unwrap_or(Path::new(SESSION_FILE))
    }
}
