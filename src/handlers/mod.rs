//! HTTP handlers for supplier, item, and association routes.

pub mod items;
pub mod links;
pub mod suppliers;
