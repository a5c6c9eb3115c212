//! Supplier lifecycle and query predicates against PostgreSQL.

use crate::error::AppError;
use crate::model::{Supplier, SupplierFields};
use sqlx::PgPool;

const COLUMNS: &str = "id, name, available, address, rating";

pub struct SupplierStore;

impl SupplierStore {
    /// Insert validated fields; the id is server-assigned. Any caller-supplied
    /// id is never consulted, the fields struct carries none.
    pub async fn create(pool: &PgPool, fields: &SupplierFields) -> Result<Supplier, AppError> {
        tracing::info!(name = %fields.name, "creating supplier");
        let row = sqlx::query_as::<_, Supplier>(
            "INSERT INTO suppliers (name, available, address, rating) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, name, available, address, rating",
        )
        .bind(&fields.name)
        .bind(fields.available)
        .bind(&fields.address)
        .bind(fields.rating)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    /// Persist the supplier's current field state. Fails with a validation
    /// error when the id was never assigned.
    pub async fn update(pool: &PgPool, supplier: &Supplier) -> Result<Supplier, AppError> {
        let id = supplier.require_id()?;
        tracing::info!(id, name = %supplier.name, "updating supplier");
        let row = sqlx::query_as::<_, Supplier>(
            "UPDATE suppliers SET name = $2, available = $3, address = $4, rating = $5 \
             WHERE id = $1 \
             RETURNING id, name, available, address, rating",
        )
        .bind(id)
        .bind(&supplier.name)
        .bind(supplier.available)
        .bind(&supplier.address)
        .bind(supplier.rating)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("supplier with id '{}' was not found", id)))?;
        Ok(row)
    }

    /// Delete by id. Absent rows are not an error; association rows cascade
    /// out via the schema.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), AppError> {
        tracing::info!(id, "deleting supplier");
        sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Fetch one supplier, None when absent.
    pub async fn find(pool: &PgPool, id: i64) -> Result<Option<Supplier>, AppError> {
        let row = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {} FROM suppliers WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    /// Fetch one supplier, mapping absence to a not-found error for the 404 path.
    pub async fn find_or_404(pool: &PgPool, id: i64) -> Result<Supplier, AppError> {
        Self::find(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("supplier with id '{}' was not found", id)))
    }

    /// All suppliers ordered by id.
    pub async fn all(pool: &PgPool) -> Result<Vec<Supplier>, AppError> {
        let rows = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {} FROM suppliers ORDER BY id",
            COLUMNS
        ))
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Vec<Supplier>, AppError> {
        tracing::debug!(name, "supplier name query");
        let rows = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {} FROM suppliers WHERE name = $1 ORDER BY id",
            COLUMNS
        ))
        .bind(name)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_address(pool: &PgPool, address: &str) -> Result<Vec<Supplier>, AppError> {
        tracing::debug!(address, "supplier address query");
        let rows = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {} FROM suppliers WHERE address = $1 ORDER BY id",
            COLUMNS
        ))
        .bind(address)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_availability(
        pool: &PgPool,
        available: bool,
    ) -> Result<Vec<Supplier>, AppError> {
        tracing::debug!(available, "supplier availability query");
        let rows = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {} FROM suppliers WHERE available = $1 ORDER BY id",
            COLUMNS
        ))
        .bind(available)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Suppliers with rating greater than or equal to the threshold (inclusive).
    pub async fn find_by_rating(pool: &PgPool, rating: f64) -> Result<Vec<Supplier>, AppError> {
        tracing::debug!(rating, "supplier rating query");
        let rows = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {} FROM suppliers WHERE rating >= $1 ORDER BY id",
            COLUMNS
        ))
        .bind(rating)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}

// Run with `cargo test -- --ignored` and a reachable DATABASE_URL.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ensure_tables;

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/suppliers_test".into());
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .unwrap();
        ensure_tables(&pool).await.unwrap();
        pool
    }

    fn fields(name: &str, rating: f64) -> SupplierFields {
        SupplierFields {
            name: name.into(),
            available: true,
            address: "NY".into(),
            rating,
        }
    }

    #[tokio::test]
    #[ignore = "needs PostgreSQL via DATABASE_URL"]
    async fn create_assigns_a_fresh_identity() {
        let pool = test_pool().await;
        let first = SupplierStore::create(&pool, &fields("identity-check", 1.0))
            .await
            .unwrap();
        let second = SupplierStore::create(&pool, &fields("identity-check", 1.0))
            .await
            .unwrap();
        assert!(first.id > 0);
        assert_ne!(second.id, first.id);
    }

    #[tokio::test]
    #[ignore = "needs PostgreSQL via DATABASE_URL"]
    async fn rating_threshold_is_inclusive() {
        let pool = test_pool().await;
        let at = SupplierStore::create(&pool, &fields("rating-at-bound", 4.4))
            .await
            .unwrap();
        let below = SupplierStore::create(&pool, &fields("rating-below-bound", 4.3))
            .await
            .unwrap();
        let rows = SupplierStore::find_by_rating(&pool, 4.4).await.unwrap();
        assert!(rows.iter().any(|s| s.id == at.id));
        assert!(rows.iter().all(|s| s.id != below.id));
        assert!(rows.iter().all(|s| s.rating >= 4.4));
    }

    #[tokio::test]
    #[ignore = "needs PostgreSQL via DATABASE_URL"]
    async fn delete_is_idempotent_and_find_returns_none() {
        let pool = test_pool().await;
        let supplier = SupplierStore::create(&pool, &fields("delete-me", 2.0))
            .await
            .unwrap();
        SupplierStore::delete(&pool, supplier.id).await.unwrap();
        assert!(SupplierStore::find(&pool, supplier.id).await.unwrap().is_none());
        // A second delete of the same id is not an error.
        SupplierStore::delete(&pool, supplier.id).await.unwrap();
    }
}
