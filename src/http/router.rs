use axum::routing::{get, put};
use axum::Router;

use crate::http::handlers;
use crate::http::state::AppState;

/// Builds the songs API router with the shared state attached.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/songs", get(handlers::list_songs).post(handlers::create_song))
        .route("/songs/:id/lyrics", get(handlers::get_song_lyrics))
        .route(
            "/songs/:id",
            put(handlers::update_song).delete(handlers::delete_song),
        )
        .with_state(state)
}
