//! Request and response schemas for the songs API
//!
//! Pagination parameters arrive as raw strings so that malformed values can
//! be coerced to their defaults instead of failing the request, matching the
//! list and lyrics contracts.

use serde::{Deserialize, Serialize};

use crate::core::data::NewSong;

/// Coerce a raw pagination parameter. Anything that is missing or does not
/// parse to a positive integer falls back to `default`.
fn coerce_positive(raw: Option<&str>, default: i64) -> i64 {
    match raw {
        Some(value) => value
            .parse::<i64>()
            .ok()
            .filter(|v| *v >= 1)
            .unwrap_or(default),
        None => default,
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListSongsParams {
    pub group: Option<String>,
    pub song: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

impl ListSongsParams {
    pub fn page(&self) -> i64 {
        coerce_positive(self.page.as_deref(), 1)
    }

    pub fn limit(&self) -> i64 {
        coerce_positive(self.limit.as_deref(), 10)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LyricsParams {
    page: Option<String>,
    limit: Option<String>,
}

impl LyricsParams {
    pub fn page(&self) -> i64 {
        coerce_positive(self.page.as_deref(), 1)
    }

    /// One verse per page unless the caller asks for more.
    pub fn limit(&self) -> i64 {
        coerce_positive(self.limit.as_deref(), 1)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSongRequest {
    pub group: String,
    pub song: String,
}

/// Full-replace update body: absent fields are written as empty strings,
/// not left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSongRequest {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub song: String,
    #[serde(default, rename = "releaseDate")]
    pub release_date: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
}

impl From<UpdateSongRequest> for NewSong {
    fn from(input: UpdateSongRequest) -> Self {
        NewSong {
            group: input.group,
            title: input.song,
            release_date: input.release_date,
            lyrics: input.text,
            link: input.link,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
