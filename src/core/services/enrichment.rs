//! Client for the external song metadata API
//!
//! Called once per create request: `GET {base}/info?group=..&song=..` is
//! expected to answer 200 with the release date, full lyrics text, and a
//! media link for the song. There is no retry policy; a failed call fails
//! the create.

use reqwest;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::{EnrichmentError, Result};

/// Response shape of the enrichment endpoint. Missing fields decode as empty
/// strings, matching what gets stored for a song the API knows nothing about.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDetails {
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Clone)]
pub struct EnrichmentClient {
    client: reqwest::Client,
    base_url: String,
}

impl EnrichmentClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("songshelf v{}", version);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch release date, lyrics, and link for a new song. Query parameters
    /// are percent-encoded by the client, so reserved characters in group or
    /// title survive the round trip.
    pub async fn fetch_song_details(&self, group: &str, title: &str) -> Result<SongDetails> {
        let url = format!("{}/info", self.base_url);
        debug!("Requesting enrichment for: {} - {}", group, title);

        let response = self
            .client
            .get(&url)
            .query(&[("group", group), ("song", title)])
            .send()
            .await
            .map_err(EnrichmentError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnrichmentError::Status { status }.into());
        }

        let body = response.text().await.map_err(EnrichmentError::Http)?;
        let details: SongDetails =
            serde_json::from_str(&body).map_err(EnrichmentError::Decode)?;

        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = EnrichmentClient::new("http://music-info.example/", Duration::from_secs(10));
        assert_eq!(client.base_url, "http://music-info.example");
    }

    #[test]
    fn test_song_details_decode() {
        let details: SongDetails = serde_json::from_str(
            r#"{"releaseDate":"16.07.2006","text":"Ooh baby\n\ndon't you know","link":"https://example.com/watch"}"#,
        )
        .unwrap();
        assert_eq!(details.release_date, "16.07.2006");
        assert_eq!(details.text, "Ooh baby\n\ndon't you know");
        assert_eq!(details.link, "https://example.com/watch");
    }

    #[test]
    fn test_song_details_missing_fields_default_to_empty() {
        let details: SongDetails = serde_json::from_str(r#"{"releaseDate":"01.01.2000"}"#).unwrap();
        assert_eq!(details.release_date, "01.01.2000");
        assert_eq!(details.text, "");
        assert_eq!(details.link, "");
    }

    #[test]
    fn test_song_details_rejects_non_object_body() {
        assert!(serde_json::from_str::<SongDetails>("\"not an object\"").is_err());
    }
}
