use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RoomStore, StoreResult};
use crate::models::Room;

#[derive(Debug, Default)]
struct Inner {
    rooms: BTreeMap<i64, Room>,
    last_id: i64,
}

/// In-process [`RoomStore`] used when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryRoomStore {
    inner: RwLock<Inner>,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    async fn find_all(&self) -> StoreResult<Vec<Room>> {
        Ok(self.inner.read().await.rooms.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Room>> {
        Ok(self.inner.read().await.rooms.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        Ok(self.inner.read().await.rooms.contains_key(&id))
    }

    async fn save(&self, mut room: Room) -> StoreResult<Room> {
        let mut inner = self.inner.write().await;
        let id = match room.id {
            Some(id) if inner.rooms.contains_key(&id) => id,
            _ => {
                inner.last_id += 1;
                inner.last_id
            }
        };
        room.id = Some(id);
        inner.rooms.insert(id, room.clone());
        Ok(room)
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        self.inner.write().await.rooms.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoomType;

    fn room(name: &str) -> Room {
        Room {
            id: None,
            name: name.to_string(),
            room_type: RoomType::Exam,
            last_used: None,
        }
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = MemoryRoomStore::new();
        assert!(store.find_all().await.unwrap().is_empty());
        assert_eq!(store.find_by_id(1).await.unwrap(), None);
        assert!(!store.exists_by_id(1).await.unwrap());
    }

    #[tokio::test]
    async fn save_assigns_increasing_ids() {
        let store = MemoryRoomStore::new();
        let a = store.save(room("A")).await.unwrap();
        let b = store.save(room("B")).await.unwrap();
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));

        let names: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn save_with_known_id_replaces() {
        let store = MemoryRoomStore::new();
        let mut saved = store.save(room("A")).await.unwrap();
        saved.room_type = RoomType::Isolation;

        let replaced = store.save(saved.clone()).await.unwrap();
        assert_eq!(replaced, saved);
        assert_eq!(store.find_all().await.unwrap(), vec![saved]);
    }

    #[tokio::test]
    async fn save_with_unknown_id_inserts_under_fresh_id() {
        let store = MemoryRoomStore::new();
        let mut stray = room("Stray");
        stray.id = Some(77);

        let saved = store.save(stray).await.unwrap();
        assert_eq!(saved.id, Some(1));
        assert!(!store.exists_by_id(77).await.unwrap());
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let store = MemoryRoomStore::new();
        let a = store.save(room("A")).await.unwrap();
        store.delete_by_id(a.id.unwrap()).await.unwrap();
        store.delete_by_id(a.id.unwrap()).await.unwrap();

        let b = store.save(room("B")).await.unwrap();
        assert_eq!(b.id, Some(2));
        assert_eq!(store.find_by_id(1).await.unwrap(), None);
    }
}
