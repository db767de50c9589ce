use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use staybook_core::{AppError, ErrorResponse};
use staybook_models::{Room, RoomId};

use super::service::RoomService;
use crate::state::AppState;

/// List rooms
#[utoipa::path(
    get,
    path = "/api/rooms",
    responses(
        (status = 200, description = "All rooms, ordered by name", body = Vec<Room>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Rooms"
)]
#[instrument(skip(state))]
pub async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<Room>>, AppError> {
    let rooms = RoomService::list(&state.db).await?;
    Ok(Json(rooms))
}

/// Get a room by ID
#[utoipa::path(
    get,
    path = "/api/rooms/{id}",
    params(("id" = RoomId, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room found", body = Room),
        (status = 404, description = "Room not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Rooms"
)]
#[instrument(skip(state))]
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<RoomId>,
) -> Result<Json<Room>, AppError> {
    let room = RoomService::get(&state.db, id).await?;
    Ok(Json(room))
}
