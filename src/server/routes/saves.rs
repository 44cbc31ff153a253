//! Save operation handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::store::{PlayerSlots, SaveRecord};

use super::super::{error::ApiError, state::AppState};

/// Submit a save for a player.
///
/// Returns the player's resulting recent and history windows. Missing
/// fields in the body deserialize to empty values and are rejected by the
/// store's validation, so the error envelope is uniform.
pub async fn submit_save(
    State(state): State<AppState>,
    Json(record): Json<SaveRecord>,
) -> Result<Json<PlayerSlots>, ApiError> {
    let slots = state.store().submit(record)?;
    Ok(Json(slots))
}

/// Fetch a player's saves by player id.
pub async fn get_by_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<PlayerSlots>, ApiError> {
    let slots = state.store().fetch_by_player(&player_id)?;
    Ok(Json(slots))
}

/// Fetch a player's saves by ident token.
pub async fn get_by_ident(
    State(state): State<AppState>,
    Path(ident): Path<String>,
) -> Result<Json<PlayerSlots>, ApiError> {
    let slots = state.store().fetch_by_ident(&ident)?;
    Ok(Json(slots))
}

/// List all players with stored saves.
pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    let players = state.store().players()?;
    Ok(Json(players))
}

/// List all bound ident tokens.
pub async fn list_idents(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let idents = state.store().idents()?;
    Ok(Json(idents))
}

/// Delete every player's saves and clear the identity map.
pub async fn purge_all(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.store().purge_all()?;
    Ok(StatusCode::NO_CONTENT)
}
