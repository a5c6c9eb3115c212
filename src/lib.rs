//! Supplier/Item CRUD REST service over PostgreSQL.

pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use error::{AppError, ValidationError};
pub use model::{Item, ItemFields, Supplier, SupplierFields};
pub use routes::{api_routes, common_routes};
pub use service::{ItemStore, LinkStore, SupplierStore};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};
