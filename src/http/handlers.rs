//! Request handlers for the songs API
//!
//! Each handler is stateless per request: parse and validate, run the
//! database work under the transaction runner, serialize the outcome. The
//! create path additionally performs the synchronous enrichment call before
//! any row is written.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, info};

use crate::core::data::{NewSong, Song, SongFilter};
use crate::core::lyrics::{self, VersePage};
use crate::error::SongshelfError;
use crate::http::dto::{
    CreateSongRequest, CreatedResponse, ListSongsParams, LyricsParams, MessageResponse,
    UpdateSongRequest,
};
use crate::http::state::AppState;

fn parse_song_id(raw: &str) -> Result<i64, SongshelfError> {
    raw.parse::<i64>()
        .map_err(|_| SongshelfError::Validation("invalid song id".to_string()))
}

/// GET /songs: filtered, paginated listing. An empty result is a valid 200.
pub async fn list_songs(
    State(state): State<AppState>,
    Query(params): Query<ListSongsParams>,
) -> Result<Json<Vec<Song>>, SongshelfError> {
    let filter = SongFilter {
        group: params.group.clone().filter(|g| !g.is_empty()),
        title: params.song.clone().filter(|s| !s.is_empty()),
    };
    let page = params.page();
    let limit = params.limit();
    debug!("Listing songs: filter={:?} page={} limit={}", filter, page, limit);

    let songs = state.db.lock().await.list_songs(&filter, page, limit)?;
    Ok(Json(songs))
}

/// GET /songs/{id}/lyrics: the requested slice of verses plus the total.
pub async fn get_song_lyrics(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<LyricsParams>,
) -> Result<Json<VersePage>, SongshelfError> {
    let id = parse_song_id(&id)?;
    let text = state.db.lock().await.get_lyrics(id)?;
    let page = lyrics::paginate(&text, params.page() as usize, params.limit() as usize);
    Ok(Json(page))
}

/// POST /songs: enrich via the external API, then insert. A failed
/// enrichment call means no row is created.
pub async fn create_song(
    State(state): State<AppState>,
    payload: Result<Json<CreateSongRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), SongshelfError> {
    let Json(input) = payload
        .map_err(|_| SongshelfError::Validation("invalid request body".to_string()))?;
    if input.group.trim().is_empty() || input.song.trim().is_empty() {
        return Err(SongshelfError::Validation(
            "group and song are required".to_string(),
        ));
    }
    info!("Adding new song: {} - {}", input.group, input.song);

    let details = state
        .enrichment
        .fetch_song_details(&input.group, &input.song)
        .await?;

    let record = NewSong {
        group: input.group,
        title: input.song,
        release_date: details.release_date,
        lyrics: details.text,
        link: details.link,
    };
    let id = state.db.lock().await.insert_song(&record)?;

    info!("Song added, id: {}", id);
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /songs/{id}: full replace of the mutable fields. Zero matched rows
/// still answers 200.
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSongRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, SongshelfError> {
    let id = parse_song_id(&id)?;
    let Json(input) = payload
        .map_err(|_| SongshelfError::Validation("invalid request body".to_string()))?;

    let affected = state.db.lock().await.update_song(id, &input.into())?;
    if affected == 0 {
        debug!("Update matched no rows for song {}", id);
    }

    info!("Song {} updated", id);
    Ok(Json(MessageResponse {
        message: "song updated".to_string(),
    }))
}

/// DELETE /songs/{id}: 404 when nothing was deleted.
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, SongshelfError> {
    let id = parse_song_id(&id)?;
    state.db.lock().await.delete_song(id)?;

    info!("Song {} deleted", id);
    Ok(Json(MessageResponse {
        message: "song deleted".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_song_id() {
        assert_eq!(parse_song_id("42").unwrap(), 42);
        assert!(matches!(
            parse_song_id("abc"),
            Err(SongshelfError::Validation(_))
        ));
        assert!(matches!(
            parse_song_id("1.5"),
            Err(SongshelfError::Validation(_))
        ));
    }
}
