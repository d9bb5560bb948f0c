use crate::{
    dto::{NoteRequest, NoteResponse},
    repository::{NoteStore, StoreError},
};

use std::sync::Arc;

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteStore>,
}

/// Maps a path token to a stored id. Tokens that are not positive integers
/// cannot name any note.
fn parse_id(id: &str) -> Option<i64> {
    id.parse::<i64>().ok().filter(|id| *id > 0)
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteStore>) -> Self {
        Self { repo }
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, StoreError> {
        self.repo
            .list()
            .await
            .map(|notes| notes.into_iter().map(NoteResponse::from).collect())
    }

    pub async fn get_one_note(&self, id: &str) -> Result<Option<NoteResponse>, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        self.repo
            .get(id)
            .await
            .map(|note| note.map(NoteResponse::from))
    }

    pub async fn create_note(&self, request: NoteRequest) -> Result<NoteResponse, StoreError> {
        let note = self.repo.create(request.body).await?;
        tracing::info!("created note {}", note.id);

        Ok(note.into())
    }

    pub async fn update_note(
        &self,
        id: &str,
        request: NoteRequest,
    ) -> Result<Option<NoteResponse>, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        self.repo
            .update(id, request.body)
            .await
            .map(|note| note.map(NoteResponse::from))
    }

    pub async fn delete_note(&self, id: &str) -> Result<bool, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };

        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!("deleted note {id}");
        }

        Ok(deleted)
    }
}
