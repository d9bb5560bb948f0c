mod embedded;
mod memory;
mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::PostgresRepository;

use async_trait::async_trait;

use crate::models::Note;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("migration error: {0}")]
    Migration(#[from] refinery::Error),
}

/// Persistent storage for notes.
///
/// Lookups by id report a missing note as `None` (or `false` for
/// [`NoteStore::delete`]); `Err` is reserved for the store itself failing.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes, most recently updated first.
    async fn list(&self) -> Result<Vec<Note>, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Note>, StoreError>;

    async fn create(&self, body: String) -> Result<Note, StoreError>;

    /// Replaces the body and refreshes `updated`, leaving `id` and `created` untouched.
    async fn update(&self, id: i64, body: String) -> Result<Option<Note>, StoreError>;

    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}
