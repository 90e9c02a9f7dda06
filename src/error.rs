//! Error handling for the songshelf service
//!
//! This module provides a hierarchical error system with typed variants for
//! each failure class. The HTTP layer maps these to status codes; nothing in
//! the service compares error message strings.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SongshelfError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Enrichment error: {0}")]
    Enrichment(#[from] EnrichmentError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Song not found: {id}")]
    SongNotFound { id: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error("Query failed: {0}")]
    Query(#[source] rusqlite::Error),

    #[error("Migration failed: {0}")]
    Migration(#[source] rusqlite::Error),

    #[error("Transaction failed: {0}")]
    Transaction(#[source] rusqlite::Error),
}

#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Enrichment API returned status {status}")]
    Status { status: reqwest::StatusCode },

    #[error("Enrichment API response invalid: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {name}")]
    MissingVar { name: &'static str },

    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: String, value: String },

    #[error("Environment variable {name} contains invalid UTF-8")]
    InvalidUtf8 { name: String },

    #[error("Invalid external API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, SongshelfError>;

impl From<rusqlite::Error> for SongshelfError {
    fn from(err: rusqlite::Error) -> Self {
        SongshelfError::Database(DatabaseError::Query(err))
    }
}

impl From<reqwest::Error> for SongshelfError {
    fn from(err: reqwest::Error) -> Self {
        SongshelfError::Enrichment(EnrichmentError::Http(err))
    }
}
