//! API routes and handlers.

mod saves;

use axum::{
    Router,
    routing::{delete, get, post},
};

use super::state::AppState;

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Save operations
        .route("/api/v1/saves", post(saves::submit_save))
        .route("/api/v1/saves", delete(saves::purge_all))
        .route("/api/v1/saves/player/{player_id}", get(saves::get_by_player))
        .route("/api/v1/saves/ident/{ident}", get(saves::get_by_ident))
        // Listing operations
        .route("/api/v1/players", get(saves::list_players))
        .route("/api/v1/idents", get(saves::list_idents))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}
