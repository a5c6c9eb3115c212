//! Supplier/item association manager over the `supplier_items` linking table.
//!
//! Pairs are unique (composite primary key). Re-linking an existing pair is a
//! silent no-op, as is unlinking a pair that was never linked.

use crate::error::AppError;
use crate::model::{Item, Supplier};
use crate::service::{ItemStore, SupplierStore};
use sqlx::PgPool;

pub struct LinkStore;

impl LinkStore {
    /// Link an item to a supplier. Both sides must exist.
    pub async fn link(pool: &PgPool, supplier_id: i64, item_id: i64) -> Result<(), AppError> {
        let supplier = SupplierStore::find_or_404(pool, supplier_id).await?;
        let item = ItemStore::find_or_404(pool, item_id).await?;
        tracing::info!(supplier_id, item_id, "linking item to supplier");
        sqlx::query(
            "INSERT INTO supplier_items (supplier_id, item_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(supplier.id)
        .bind(item.id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a link. The supplier must exist; an absent link is a no-op.
    pub async fn unlink(pool: &PgPool, supplier_id: i64, item_id: i64) -> Result<(), AppError> {
        let supplier = SupplierStore::find_or_404(pool, supplier_id).await?;
        tracing::info!(supplier_id, item_id, "unlinking item from supplier");
        sqlx::query("DELETE FROM supplier_items WHERE supplier_id = $1 AND item_id = $2")
            .bind(supplier.id)
            .bind(item_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Items linked to a supplier, ordered by item id. Not-found when the
    /// supplier is absent: the route addresses the supplier as a resource.
    pub async fn list_items_of_supplier(
        pool: &PgPool,
        supplier_id: i64,
    ) -> Result<Vec<Item>, AppError> {
        let supplier = SupplierStore::find_or_404(pool, supplier_id).await?;
        let rows = sqlx::query_as::<_, Item>(
            "SELECT i.id, i.name FROM items i \
             JOIN supplier_items si ON si.item_id = i.id \
             WHERE si.supplier_id = $1 ORDER BY i.id",
        )
        .bind(supplier.id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Suppliers linked to an item, ordered by supplier id. An unknown item
    /// yields an empty list: callers use this as a filter, not a resource read.
    pub async fn list_suppliers_of_item(
        pool: &PgPool,
        item_id: i64,
    ) -> Result<Vec<Supplier>, AppError> {
        let rows = sqlx::query_as::<_, Supplier>(
            "SELECT s.id, s.name, s.available, s.address, s.rating FROM suppliers s \
             JOIN supplier_items si ON si.supplier_id = s.id \
             WHERE si.item_id = $1 ORDER BY s.id",
        )
        .bind(item_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}

// Run with `cargo test -- --ignored` and a reachable DATABASE_URL.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemFields, SupplierFields};
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

    async fn make_supplier(pool: &PgPool, name: &str) -> Supplier {
        let fields = SupplierFields {
            name: name.into(),
            available: true,
            address: "NY".into(),
            rating: 3.0,
        };
        SupplierStore::create(pool, &fields).await.unwrap()
    }

    async fn make_item(pool: &PgPool, name: &str) -> Item {
        ItemStore::create(pool, &ItemFields { name: name.into() })
            .await
            .unwrap()
    }

    #[tokio::test]
    #[ignore = "needs PostgreSQL via DATABASE_URL"]
    async fn link_list_unlink_round_trip() {
        let pool = test_pool().await;
        let supplier = make_supplier(&pool, "round-trip-supplier").await;
        let item = make_item(&pool, "round-trip-item").await;

        LinkStore::link(&pool, supplier.id, item.id).await.unwrap();
        // Re-linking the same pair is a no-op, not a duplicate.
        LinkStore::link(&pool, supplier.id, item.id).await.unwrap();

        let items = LinkStore::list_items_of_supplier(&pool, supplier.id)
            .await
            .unwrap();
        assert_eq!(items.iter().filter(|i| i.id == item.id).count(), 1);

        let suppliers = LinkStore::list_suppliers_of_item(&pool, item.id)
            .await
            .unwrap();
        assert!(suppliers.iter().any(|s| s.id == supplier.id));

        LinkStore::unlink(&pool, supplier.id, item.id).await.unwrap();
        let items = LinkStore::list_items_of_supplier(&pool, supplier.id)
            .await
            .unwrap();
        assert!(items.iter().all(|i| i.id != item.id));
        // Unlinking an already-absent pair is also a no-op.
        LinkStore::unlink(&pool, supplier.id, item.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "needs PostgreSQL via DATABASE_URL"]
    async fn deleting_supplier_cascades_association_rows() {
        let pool = test_pool().await;
        let supplier = make_supplier(&pool, "cascade-supplier").await;
        let item = make_item(&pool, "cascade-item").await;
        LinkStore::link(&pool, supplier.id, item.id).await.unwrap();

        SupplierStore::delete(&pool, supplier.id).await.unwrap();

        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM supplier_items WHERE supplier_id = $1")
                .bind(supplier.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count, 0);

        // A re-created supplier with the same name starts with no items.
        let recreated = make_supplier(&pool, "cascade-supplier").await;
        let items = LinkStore::list_items_of_supplier(&pool, recreated.id)
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    #[ignore = "needs PostgreSQL via DATABASE_URL"]
    async fn listing_suppliers_of_unknown_item_is_empty() {
        let pool = test_pool().await;
        let suppliers = LinkStore::list_suppliers_of_item(&pool, i64::MAX)
            .await
            .unwrap();
        assert!(suppliers.is_empty());
    }
}
