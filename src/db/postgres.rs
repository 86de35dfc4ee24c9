use async_trait::async_trait;
use sqlx::PgPool;

use super::{RoomStore, StoreResult};
use crate::models::{Room, RoomRow};

/// [`RoomStore`] backed by the `rooms` table.
#[derive(Debug, Clone)]
pub struct PgRoomStore {
    pool: PgPool,
}

impl PgRoomStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, room: &Room) -> StoreResult<Room> {
        let row = sqlx::query_as::<_, RoomRow>(
            r#"
            INSERT INTO rooms (room_name, room_type, last_used)
            VALUES ($1, $2, $3)
            RETURNING id, room_name, room_type, last_used
            "#,
        )
        .bind(&room.name)
        .bind(room.room_type.as_str())
        .bind(room.last_used)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn update(&self, id: i64, room: &Room) -> StoreResult<Option<Room>> {
        sqlx::query_as::<_, RoomRow>(
            r#"
            UPDATE rooms
            SET room_name = $1,
                room_type = $2,
                last_used = $3
            WHERE id = $4
            RETURNING id, room_name, room_type, last_used
            "#,
        )
        .bind(&room.name)
        .bind(room.room_type.as_str())
        .bind(room.last_used)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Room::try_from)
        .transpose()
    }
}

#[async_trait]
impl RoomStore for PgRoomStore {
    async fn find_all(&self) -> StoreResult<Vec<Room>> {
        let rows = sqlx::query_as::<_, RoomRow>(
            "SELECT id, room_name, room_type, last_used FROM rooms ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Room::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Room>> {
        sqlx::query_as::<_, RoomRow>(
            "SELECT id, room_name, room_type, last_used FROM rooms WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Room::try_from)
        .transpose()
    }

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM rooms WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn save(&self, room: Room) -> StoreResult<Room> {
        if let Some(id) = room.id {
            if let Some(updated) = self.update(id, &room).await? {
                return Ok(updated);
            }
        }
        self.insert(&room).await
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
