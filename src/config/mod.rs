use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::warn;
use url::Url;

use crate::error::{ConfigError, Result, SongshelfError};

pub mod env;

pub use env::{EnvParser, EnvVars};

fn default_enrichment_timeout_seconds() -> u64 {
    10
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Database file path
    pub database_path: PathBuf,

    /// Base URL of the external enrichment API
    pub external_api_url: String,

    /// Address the HTTP server binds to
    pub listen_addr: SocketAddr,

    /// Request timeout for the enrichment call (seconds)
    pub enrichment_timeout_seconds: u64,
}

impl Config {
    pub fn load(env_file: Option<&str>) -> Result<Self> {
        // Honor .env files for Docker and development
        match env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| SongshelfError::Internal(e.into()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }

        let database_path = match EnvParser::parse_path(EnvVars::DATABASE_PATH)? {
            Some(path) => path,
            None => Self::default_database_path(),
        };

        let external_api_url = EnvParser::parse_string(EnvVars::EXTERNAL_API_URL)?
            .ok_or(SongshelfError::Config(ConfigError::MissingVar {
                name: EnvVars::EXTERNAL_API_URL,
            }))?;
        // Reject outright-malformed base URLs early instead of on the first create request
        Url::parse(&external_api_url)
            .map_err(|e| SongshelfError::Config(ConfigError::InvalidUrl(e)))?;

        let listen_addr = match EnvParser::parse_string(EnvVars::LISTEN_ADDR)? {
            Some(raw) => raw.parse::<SocketAddr>().map_err(|_| {
                SongshelfError::Config(ConfigError::InvalidValue {
                    name: EnvVars::LISTEN_ADDR.to_string(),
                    value: raw,
                })
            })?,
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let enrichment_timeout_seconds =
            EnvParser::parse_u64(EnvVars::ENRICHMENT_TIMEOUT_SECONDS, 1, 300)?
                .unwrap_or_else(default_enrichment_timeout_seconds);

        // Ensure data directory exists
        if let Some(parent) = database_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Config {
            database_path,
            external_api_url,
            listen_addr,
            enrichment_timeout_seconds,
        })
    }

    fn default_database_path() -> PathBuf {
        // Use /data only when explicitly running under Docker (DOCKER env var)
        let data_dir = if EnvParser::is_present(EnvVars::DOCKER) {
            PathBuf::from("/data")
        } else {
            match ProjectDirs::from("dev", "songshelf", "songshelf") {
                Some(project_dirs) => project_dirs.data_dir().to_path_buf(),
                None => {
                    warn!("ProjectDirs unavailable; falling back to current directory for data path");
                    PathBuf::from(".")
                }
            }
        };

        data_dir.join("songshelf.db")
    }
}
