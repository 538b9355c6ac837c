//! Download repository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::database::models::{DownloadDbModel, NewDownload};
use crate::{Error, Result};

/// Download repository trait.
#[async_trait]
pub trait DownloadRepository: Send + Sync {
    /// Insert a new record and return it with its assigned id.
    async fn insert(&self, new: &NewDownload) -> Result<DownloadDbModel>;
    /// List all records in store order.
    async fn list_all(&self) -> Result<Vec<DownloadDbModel>>;
    /// Get a single record by id.
    async fn get(&self, id: i64) -> Result<DownloadDbModel>;
    /// Delete a record by id.
    async fn delete(&self, id: i64) -> Result<()>;
}

/// SQLx implementation of DownloadRepository.
pub struct SqlxDownloadRepository {
    pool: SqlitePool,
}

impl SqlxDownloadRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DownloadRepository for SqlxDownloadRepository {
    async fn insert(&self, new: &NewDownload) -> Result<DownloadDbModel> {
        let result = sqlx::query(
            r#"
            INSERT INTO downloads (name, url, "start", "end", file_path)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.name)
        .bind(&new.url)
        .bind(new.start)
        .bind(new.end)
        .bind(&new.file_path)
        .execute(&self.pool)
        .await?;

        Ok(DownloadDbModel {
            id: result.last_insert_rowid(),
            name: new.name.clone(),
            url: new.url.clone(),
            start: new.start,
            end: new.end,
            file_path: new.file_path.clone(),
        })
    }

    async fn list_all(&self) -> Result<Vec<DownloadDbModel>> {
        let records = sqlx::query_as::<_, DownloadDbModel>("SELECT * FROM downloads")
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn get(&self, id: i64) -> Result<DownloadDbModel> {
        sqlx::query_as::<_, DownloadDbModel>("SELECT * FROM downloads WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::not_found("Video", id.to_string()))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM downloads WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found("Video", id.to_string()));
        }
        Ok(())
    }
}
