//! Item lifecycle against PostgreSQL.

use crate::error::AppError;
use crate::model::{Item, ItemFields};
use sqlx::PgPool;

pub struct ItemStore;

impl ItemStore {
    /// Insert validated fields; the id is server-assigned.
    pub async fn create(pool: &PgPool, fields: &ItemFields) -> Result<Item, AppError> {
        tracing::info!(name = %fields.name, "creating item");
        let row = sqlx::query_as::<_, Item>(
            "INSERT INTO items (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&fields.name)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    /// Persist the item's current field state; validation error on an unset id.
    pub async fn update(pool: &PgPool, item: &Item) -> Result<Item, AppError> {
        let id = item.require_id()?;
        tracing::info!(id, name = %item.name, "updating item");
        let row = sqlx::query_as::<_, Item>(
            "UPDATE items SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(&item.name)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("item with id '{}' was not found", id)))?;
        Ok(row)
    }

    /// Delete by id. Absent rows are not an error; association rows cascade.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), AppError> {
        tracing::info!(id, "deleting item");
        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn find(pool: &PgPool, id: i64) -> Result<Option<Item>, AppError> {
        let row = sqlx::query_as::<_, Item>("SELECT id, name FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn find_or_404(pool: &PgPool, id: i64) -> Result<Item, AppError> {
        Self::find(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("item with id '{}' was not found", id)))
    }

    /// All items ordered by id.
    pub async fn all(pool: &PgPool) -> Result<Vec<Item>, AppError> {
        let rows = sqlx::query_as::<_, Item>("SELECT id, name FROM items ORDER BY id")
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Vec<Item>, AppError> {
        tracing::debug!(name, "item name query");
        let rows = sqlx::query_as::<_, Item>(
            "SELECT id, name FROM items WHERE name = $1 ORDER BY id",
        )
        .bind(name)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}
