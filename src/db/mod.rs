use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Room, RoomRow, RoomType};

mod memory;
mod postgres;

pub use memory::MemoryRoomStore;
pub use postgres::PgRoomStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed storage for [`Room`] records.
///
/// Implementations only enforce column-level constraints; field validation
/// happens before a handler reaches the store.
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Every stored room in primary-key order.
    async fn find_all(&self) -> StoreResult<Vec<Room>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Room>>;

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool>;

    /// Inserts `room` when it has no id, otherwise replaces the stored row with
    /// that id. A replace whose id is not stored inserts under a fresh id.
    /// Returns the persisted room with its id populated.
    async fn save(&self, room: Room) -> StoreResult<Room>;

    /// Removes the room with `id`. Deleting a missing id is not an error.
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
}

impl TryFrom<RoomRow> for Room {
    type Error = StoreError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        let room_type = row
            .room_type
            .parse::<RoomType>()
            .map_err(|_| StoreError::Corrupt {
                id: row.id,
                column: "room_type",
                value: row.room_type.clone(),
            })?;

        Ok(Room {
            id: Some(row.id),
            name: row.room_name,
            room_type,
            last_used: row.last_used,
        })
    }
}
