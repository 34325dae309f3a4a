/// Application configuration
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use sound_client::{ClientConfig, EpisodeQuery};
use sound_playback::PlayerConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = "soundplus.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default)]
    pub player: PlayerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Episodes fetched for the home listing
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `path` if given, otherwise `soundplus.toml` when present, then
    /// applies `SOUNDPLUS_*` overrides (`SOUNDPLUS_API__URL`,
    /// `SOUNDPLUS_PLAYER__SHUFFLE`, ...).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("SOUNDPLUS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.url.trim().is_empty() {
            return Err(AppError::Config(
                "API URL is required (set SOUNDPLUS_API__URL)".to_string(),
            ));
        }

        if self.api.timeout_secs == 0 {
            return Err(AppError::Config(
                "API timeout must be at least one second".to_string(),
            ));
        }

        if self.api.limit == 0 {
            return Err(AppError::Config(
                "Episode limit must be at least one".to_string(),
            ));
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api.url.clone())
            .with_timeout(Duration::from_secs(self.api.timeout_secs))
    }

    pub fn episode_query(&self) -> EpisodeQuery {
        EpisodeQuery::latest(self.api.limit)
    }

    pub fn player_config(&self) -> PlayerConfig {
        self.player.clone()
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        url: default_url(),
        timeout_secs: default_timeout_secs(),
        limit: default_limit(),
    }
}

fn default_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_limit() -> u32 {
    12
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            player: PlayerConfig::default(),
        }
    }
}
