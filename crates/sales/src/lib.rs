//! Sales domain module.
//!
//! This crate contains the sale record and its creation draft, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod sale;

pub use sale::{CreateSale, Sale, SaleItem};
