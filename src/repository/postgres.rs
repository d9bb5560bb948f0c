use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, Row};

use super::{NoteStore, StoreError, embedded::migrations};
use crate::models::Note;

pub struct PostgresRepository {
    client: Client,
}

impl PostgresRepository {
    pub async fn new(database_dsn: &str) -> Result<Self, StoreError> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), StoreError> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        body: row.get("body"),
        created: row.get("created"),
        updated: row.get("updated"),
    }
}

#[async_trait]
impl NoteStore for PostgresRepository {
    async fn list(&self) -> Result<Vec<Note>, StoreError> {
        let rows = self
            .client
            .query(
                "SELECT id, body, created, updated FROM notes ORDER BY updated DESC, id DESC",
                &[],
            )
            .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Note>, StoreError> {
        let row = self
            .client
            .query_opt(
                "SELECT id, body, created, updated FROM notes WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn create(&self, body: String) -> Result<Note, StoreError> {
        let row = self
            .client
            .query_one(
                "INSERT INTO notes (body) VALUES ($1) RETURNING id, body, created, updated",
                &[&body],
            )
            .await?;

        Ok(note_from_row(&row))
    }

    async fn update(&self, id: i64, body: String) -> Result<Option<Note>, StoreError> {
        // updated must move forward even when two writes share a transaction timestamp
        let row = self
            .client
            .query_opt(
                "UPDATE notes \
                 SET body = $1, updated = GREATEST(now(), updated + interval '1 microsecond') \
                 WHERE id = $2 \
                 RETURNING id, body, created, updated",
                &[&body, &id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let rows = self
            .client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }
}
