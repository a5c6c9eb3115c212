//! Supplier, item, and association routes.
//!
//! Param names are kept consistent per position (`:supplier_id`, `:item_id`)
//! so the route tree merges cleanly.

use crate::handlers::{items, links, suppliers};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/suppliers", get(suppliers::list).post(suppliers::create))
        .route("/suppliers/rating", get(suppliers::list_sorted_by_rating))
        .route("/suppliers/rating/:rating", get(suppliers::list_by_rating))
        .route(
            "/suppliers/:supplier_id",
            get(suppliers::read)
                .put(suppliers::update)
                .delete(suppliers::delete),
        )
        .route("/suppliers/:supplier_id/active", put(suppliers::activate))
        .route(
            "/suppliers/:supplier_id/deactive",
            delete(suppliers::deactivate),
        )
        .route("/suppliers/:supplier_id/items", get(links::list_items))
        .route(
            "/suppliers/:supplier_id/items/:item_id",
            post(links::link).delete(links::unlink),
        )
        .route("/items", get(items::list).post(items::create))
        .route(
            "/items/:item_id",
            get(items::read).put(items::update).delete(items::delete),
        )
        .with_state(state)
}
