//! Supplier CRUD handlers: list with filters, read, create, update,
//! activate/deactivate, delete.

use crate::error::AppError;
use crate::model::{Supplier, SupplierFields};
use crate::service::{LinkStore, SupplierStore};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

fn parse_i64_param(name: &str, raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid {} '{}': expected an integer", name, raw)))
}

fn parse_f64_param(name: &str, raw: &str) -> Result<f64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid {} '{}': expected a number", name, raw)))
}

fn parse_bool_param(name: &str, raw: &str) -> Result<bool, AppError> {
    if raw.eq_ignore_ascii_case("true") {
        return Ok(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Ok(false);
    }
    Err(AppError::BadRequest(format!(
        "invalid {} '{}': expected true or false",
        name, raw
    )))
}

/// GET /suppliers. One filter applies per request, first match in the order
/// item-id, name, address, available, rating (inclusive lower bound).
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let suppliers = if let Some(raw) = params.get("item-id") {
        let item_id = parse_i64_param("item-id", raw)?;
        LinkStore::list_suppliers_of_item(&state.pool, item_id).await?
    } else if let Some(name) = params.get("name") {
        SupplierStore::find_by_name(&state.pool, name).await?
    } else if let Some(address) = params.get("address") {
        SupplierStore::find_by_address(&state.pool, address).await?
    } else if let Some(raw) = params.get("available") {
        let available = parse_bool_param("available", raw)?;
        SupplierStore::find_by_availability(&state.pool, available).await?
    } else if let Some(raw) = params.get("rating") {
        let rating = parse_f64_param("rating", raw)?;
        SupplierStore::find_by_rating(&state.pool, rating).await?
    } else {
        SupplierStore::all(&state.pool).await?
    };
    tracing::info!(count = suppliers.len(), "returning suppliers");
    Ok((StatusCode::OK, Json(suppliers)))
}

fn sort_by_rating_desc(suppliers: &mut [Supplier]) {
    suppliers.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// GET /suppliers/rating. All suppliers, highest rating first.
pub async fn list_sorted_by_rating(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let mut suppliers = SupplierStore::all(&state.pool).await?;
    sort_by_rating_desc(&mut suppliers);
    tracing::info!(count = suppliers.len(), "returning suppliers sorted by rating");
    Ok((StatusCode::OK, Json(suppliers)))
}

/// GET /suppliers/rating/:rating. Path form of the rating filter, same
/// inclusive lower bound.
pub async fn list_by_rating(
    State(state): State<AppState>,
    Path(rating): Path<f64>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let suppliers = SupplierStore::find_by_rating(&state.pool, rating).await?;
    tracing::info!(count = suppliers.len(), rating, "returning suppliers by rating");
    Ok((StatusCode::OK, Json(suppliers)))
}

/// GET /suppliers/:id.
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let supplier = SupplierStore::find_or_404(&state.pool, id).await?;
    Ok((StatusCode::OK, Json(supplier)))
}

/// POST /suppliers. 201 with a Location header pointing at the new resource.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let fields = SupplierFields::from_json(&body)?;
    let supplier = SupplierStore::create(&state.pool, &fields).await?;
    let location = format!("/suppliers/{}", supplier.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(supplier),
    ))
}

/// PUT /suppliers/:id. Full-body replace; the path id wins over any body id.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    SupplierStore::find_or_404(&state.pool, id).await?;
    let fields = SupplierFields::from_json(&body)?;
    let supplier = SupplierStore::update(&state.pool, &fields.with_id(id)).await?;
    Ok((StatusCode::OK, Json(supplier)))
}

/// PUT /suppliers/:id/active. 400 when already active.
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let mut supplier = SupplierStore::find_or_404(&state.pool, id).await?;
    if supplier.available {
        return Err(AppError::BadRequest(format!(
            "supplier with id '{}' is already active",
            id
        )));
    }
    supplier.available = true;
    let supplier = SupplierStore::update(&state.pool, &supplier).await?;
    Ok((StatusCode::OK, Json(supplier)))
}

/// DELETE /suppliers/:id/deactive. 400 when already inactive.
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let mut supplier = SupplierStore::find_or_404(&state.pool, id).await?;
    if !supplier.available {
        return Err(AppError::BadRequest(format!(
            "supplier with id '{}' is already deactivated",
            id
        )));
    }
    supplier.available = false;
    let supplier = SupplierStore::update(&state.pool, &supplier).await?;
    Ok((StatusCode::OK, Json(supplier)))
}

/// DELETE /suppliers/:id. Idempotent: 204 whether or not the row existed.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    SupplierStore::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
