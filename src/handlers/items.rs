//! Item CRUD handlers, same pattern as suppliers.

use crate::error::AppError;
use crate::model::ItemFields;
use crate::service::ItemStore;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

/// GET /items, optionally filtered by exact name.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let items = if let Some(name) = params.get("name") {
        ItemStore::find_by_name(&state.pool, name).await?
    } else {
        ItemStore::all(&state.pool).await?
    };
    tracing::info!(count = items.len(), "returning items");
    Ok((StatusCode::OK, Json(items)))
}

/// GET /items/:id.
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let item = ItemStore::find_or_404(&state.pool, id).await?;
    Ok((StatusCode::OK, Json(item)))
}

/// POST /items. 201 with a Location header.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let fields = ItemFields::from_json(&body)?;
    let item = ItemStore::create(&state.pool, &fields).await?;
    let location = format!("/items/{}", item.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(item)))
}

/// PUT /items/:id.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    ItemStore::find_or_404(&state.pool, id).await?;
    let fields = ItemFields::from_json(&body)?;
    let item = ItemStore::update(&state.pool, &fields.with_id(id)).await?;
    Ok((StatusCode::OK, Json(item)))
}

/// DELETE /items/:id. Idempotent: 204 whether or not the row existed.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    ItemStore::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
