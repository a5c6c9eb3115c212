//! Entity stores and the supplier/item association manager.

mod items;
mod links;
mod suppliers;
pub use items::ItemStore;
pub use links::LinkStore;
pub use suppliers::SupplierStore;
