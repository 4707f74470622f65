//! Purchase-fulfillment reconciliation core.
//!
//! Pure, deterministic functions over sales and their purchase history:
//! per-line coverage, eligibility of products for a new purchase, and
//! pre-flight validation of a candidate submission. No IO, no hidden state;
//! callers recompute freely on every refresh.

pub mod calculator;
pub mod eligibility;
pub mod validation;

pub use calculator::{item_fulfillment, sale_status, ItemFulfillment, ItemState, PurchaseStatus};
pub use eligibility::{eligible_products, max_quantity_for};
pub use validation::{validate, ValidationError};
