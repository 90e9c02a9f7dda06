use std::env;
use std::path::PathBuf;

use crate::error::{ConfigError, Result, SongshelfError};

/// Environment variable configuration constants
pub struct EnvVars;

impl EnvVars {
    pub const DATABASE_PATH: &'static str = "SONGSHELF_DATABASE_PATH";
    pub const EXTERNAL_API_URL: &'static str = "SONGSHELF_EXTERNAL_API_URL";
    pub const LISTEN_ADDR: &'static str = "SONGSHELF_LISTEN_ADDR";
    pub const ENRICHMENT_TIMEOUT_SECONDS: &'static str = "SONGSHELF_ENRICHMENT_TIMEOUT_SECONDS";

    // Special environment variables
    pub const DOCKER: &'static str = "DOCKER";
}

/// Environment variable parsing utilities with validation
pub struct EnvParser;

impl EnvParser {
    /// Parse environment variable as string, treating empty values as unset
    pub fn parse_string(var_name: &str) -> Result<Option<String>> {
        match env::var(var_name) {
            Ok(value) => {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                Ok(Some(trimmed))
            }
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(SongshelfError::Config(
                ConfigError::InvalidUtf8 { name: var_name.to_string() },
            )),
        }
    }

    /// Parse environment variable as PathBuf
    pub fn parse_path(var_name: &str) -> Result<Option<PathBuf>> {
        Ok(Self::parse_string(var_name)?.map(PathBuf::from))
    }

    /// Parse environment variable as u64 with range validation
    pub fn parse_u64(var_name: &str, min: u64, max: u64) -> Result<Option<u64>> {
        if let Some(value_str) = Self::parse_string(var_name)? {
            let value = value_str.parse::<u64>().map_err(|_| {
                SongshelfError::Config(ConfigError::InvalidValue {
                    name: var_name.to_string(),
                    value: value_str.clone(),
                })
            })?;

            if value < min || value > max {
                return Err(SongshelfError::Config(ConfigError::InvalidValue {
                    name: var_name.to_string(),
                    value: value_str,
                }));
            }

            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    /// Check if environment variable is present (for boolean flags)
    pub fn is_present(var_name: &str) -> bool {
        env::var(var_name).is_ok()
    }
}
