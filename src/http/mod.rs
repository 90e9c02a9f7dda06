//! HTTP server module for the songshelf service
//!
//! Exposes the songs table as a REST API on top of axum. Handlers parse and
//! validate the request, call into the data layer and the enrichment client,
//! and serialize JSON responses; status-code mapping lives in `error`.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
