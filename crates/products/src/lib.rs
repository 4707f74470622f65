//! Product catalog domain module.
//!
//! Reference data only: products are immutable inputs to the sales and
//! purchasing flows (no IO, no HTTP, no storage).

pub mod product;

pub use product::{CreateProduct, Product, ProductFilters};
