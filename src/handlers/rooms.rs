use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info, warn};

use crate::{
    error::{AppError, AppResult},
    models::{parse_room_id, validate_room, Room, RoomPayload, INVALID_ID},
    AppState,
};

pub const ROOM_CREATED: &str = "Room created";
pub const ROOM_DELETED: &str = "Room deleted";
pub const ROOM_NOT_FOUND: &str = "Room not found";

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_rooms(State(state): State<AppState>) -> AppResult<Json<Vec<Room>>> {
    let rooms = state.store.find_all().await?;

    info!(count = rooms.len(), "Listed rooms");

    Ok(Json(rooms))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_room(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Room>> {
    let id = parse_room_id(&raw_id).inspect_err(|_| debug!(raw_id = %raw_id, "Rejected room id"))?;

    let room = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(ROOM_NOT_FOUND.to_string()))?;

    info!(id, "Fetched room");

    Ok(Json(room))
}

/// `GET`/`DELETE /rooms/` with the id segment left empty.
pub async fn missing_room_id() -> AppError {
    debug!("Rejected request without room id");
    AppError::BadRequest(INVALID_ID.to_string())
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_room(
    State(state): State<AppState>,
    payload: Result<Json<RoomPayload>, JsonRejection>,
) -> AppResult<(StatusCode, &'static str)> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Unreadable room payload");
        AppError::BadRequest(rejection.body_text())
    })?;

    let room = validate_room(&payload).map_err(|errors| {
        warn!(fields = ?errors.keys().collect::<Vec<_>>(), "Room payload failed validation");
        AppError::Validation(errors)
    })?;

    if let Some(ignored) = payload.id {
        debug!(ignored = %ignored, "Ignoring client-supplied id on create");
    }

    let room = state.store.save(room).await?;

    info!(id = ?room.id, room_type = %room.room_type, "Created room");

    Ok((StatusCode::CREATED, ROOM_CREATED))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_room(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<&'static str> {
    let id = parse_room_id(&raw_id).inspect_err(|_| debug!(raw_id = %raw_id, "Rejected room id"))?;

    if !state.store.exists_by_id(id).await? {
        return Err(AppError::NotFound(ROOM_NOT_FOUND.to_string()));
    }
    state.store.delete_by_id(id).await?;

    info!(id, "Deleted room");

    Ok(ROOM_DELETED)
}
