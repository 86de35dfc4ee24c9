use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{EnumString, EnumVariantNames, IntoStaticStr, VariantNames};

use crate::error::{AppError, FieldErrors};

pub const NAME_REQUIRED: &str = "The room name is mandatory and must not be blank";
pub const TYPE_REQUIRED: &str = "The room type is mandatory and must not be blank";
pub const NAME_NOT_TEXT: &str = "The room name must be a string";
pub const INVALID_ID: &str = "id must be a positive number";

/// Category of a clinic room. Encoded as its SCREAMING_SNAKE_CASE name both
/// on the wire and in the `room_type` column.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    strum::Display,
    IntoStaticStr,
    EnumString,
    EnumVariantNames,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    Exam,
    Surgery,
    Recovery,
    Radiology,
    Laboratory,
    Isolation,
    Kennel,
}

impl RoomType {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A clinic room. `id` is `None` until the store assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Option<i64>,
    pub name: String,
    pub room_type: RoomType,
    pub last_used: Option<DateTime<Utc>>,
}

/// Raw `rooms` row; `room_type` is decoded separately so a bad value
/// surfaces as a store error instead of a driver decode failure.
#[derive(Debug, sqlx::FromRow)]
pub struct RoomRow {
    pub id: i64,
    pub room_name: String,
    pub room_type: String,
    pub last_used: Option<DateTime<Utc>>,
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Body of `POST /rooms`. `name` and `roomType` are kept as raw JSON so that
/// missing, blank and mistyped values are reported together by [`validate_room`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    /// Accepted for shape compatibility; creation always assigns a fresh id.
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub room_type: Option<Value>,
    pub last_used: Option<DateTime<Utc>>,
}

/// Checks every field of `payload`, returning the room to insert or the
/// full set of field errors.
pub fn validate_room(payload: &RoomPayload) -> Result<Room, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = match &payload.name {
        Some(Value::String(name)) if !name.trim().is_empty() => Some(name.clone()),
        None | Some(Value::Null) | Some(Value::String(_)) => {
            errors.insert("name".into(), NAME_REQUIRED.into());
            None
        }
        Some(_) => {
            errors.insert("name".into(), NAME_NOT_TEXT.into());
            None
        }
    };

    let room_type = match &payload.room_type {
        Some(Value::String(raw)) if !raw.trim().is_empty() => {
            let parsed = raw.trim().parse::<RoomType>().ok();
            if parsed.is_none() {
                errors.insert("roomType".into(), invalid_room_type());
            }
            parsed
        }
        None | Some(Value::Null) | Some(Value::String(_)) => {
            errors.insert("roomType".into(), TYPE_REQUIRED.into());
            None
        }
        Some(_) => {
            errors.insert("roomType".into(), invalid_room_type());
            None
        }
    };

    match (name, room_type) {
        (Some(name), Some(room_type)) if errors.is_empty() => Ok(Room {
            id: None,
            name,
            room_type,
            last_used: payload.last_used,
        }),
        _ => Err(errors),
    }
}

fn invalid_room_type() -> String {
    format!(
        "The room type must be one of: {}",
        RoomType::VARIANTS.join(", ")
    )
}

/// Parses a path id, accepting only positive integers.
pub fn parse_room_id(raw: &str) -> Result<i64, AppError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::BadRequest(INVALID_ID.to_string())),
    }
}
