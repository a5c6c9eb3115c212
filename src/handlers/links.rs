//! Association handlers: link/unlink an item to a supplier and list a
//! supplier's items.

use crate::error::AppError;
use crate::service::LinkStore;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct Association {
    pub supplier_id: i64,
    pub item_id: i64,
}

/// POST /suppliers/:supplier_id/items/:item_id. 404 when either side is
/// absent; re-linking an existing pair is a no-op and still 201.
pub async fn link(
    State(state): State<AppState>,
    Path((supplier_id, item_id)): Path<(i64, i64)>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    LinkStore::link(&state.pool, supplier_id, item_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(Association {
            supplier_id,
            item_id,
        }),
    ))
}

/// DELETE /suppliers/:supplier_id/items/:item_id. Removing an absent link is
/// a no-op; the supplier itself must exist.
pub async fn unlink(
    State(state): State<AppState>,
    Path((supplier_id, item_id)): Path<(i64, i64)>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    LinkStore::unlink(&state.pool, supplier_id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /suppliers/:supplier_id/items.
pub async fn list_items(
    State(state): State<AppState>,
    Path(supplier_id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let items = LinkStore::list_items_of_supplier(&state.pool, supplier_id).await?;
    tracing::info!(supplier_id, count = items.len(), "returning supplier items");
    Ok((StatusCode::OK, Json(items)))
}
