use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use std::collections::BTreeMap;

use super::{NoteStore, StoreError};
use crate::models::Note;

/// Process-local store, used when no database is configured.
#[derive(Default)]
pub struct InMemoryRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    notes: BTreeMap<i64, Note>,
    last_id: i64,
    last_stamp: Option<DateTime<Utc>>,
}

impl State {
    /// Wall-clock time, bumped past the previous stamp so no two writes share one.
    fn next_stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + TimeDelta::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for InMemoryRepository {
    async fn list(&self) -> Result<Vec<Note>, StoreError> {
        let state = self.state.read().await;

        let mut notes: Vec<Note> = state.notes.values().cloned().collect();
        notes.sort_by(|a, b| b.updated.cmp(&a.updated).then(b.id.cmp(&a.id)));

        Ok(notes)
    }

    async fn get(&self, id: i64) -> Result<Option<Note>, StoreError> {
        Ok(self.state.read().await.notes.get(&id).cloned())
    }

    async fn create(&self, body: String) -> Result<Note, StoreError> {
        let mut state = self.state.write().await;

        state.last_id += 1;
        let stamp = state.next_stamp();
        let note = Note {
            id: state.last_id,
            body,
            created: stamp,
            updated: stamp,
        };
        state.notes.insert(note.id, note.clone());

        Ok(note)
    }

    async fn update(&self, id: i64, body: String) -> Result<Option<Note>, StoreError> {
        let mut state = self.state.write().await;

        if !state.notes.contains_key(&id) {
            return Ok(None);
        }

        let stamp = state.next_stamp();
        Ok(state.notes.get_mut(&id).map(|note| {
            note.body = body;
            note.updated = stamp;
            note.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.state.write().await.notes.remove(&id).is_some())
    }
}
