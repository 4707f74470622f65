//! Pre-flight validation of a purchase submission.
//!
//! This is advisory, client-side defense: it blocks submissions that are
//! already known to exceed the sale, but the backend performs the
//! authoritative, serialized check at commit time and its verdict wins.

use thiserror::Error;

use saleflow_core::{ItemDraft, ProductId};
use saleflow_purchases::Purchase;
use saleflow_sales::Sale;

use crate::eligibility::max_quantity_for;

/// Why a candidate purchase was rejected locally.
///
/// All variants are user-facing and recoverable; a failed validation blocks
/// the submission and is reported for display, never retried automatically.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The candidate list was empty.
    #[error("a purchase needs at least one item")]
    EmptyItems,

    /// A candidate asks for more units than the sale still needs.
    #[error("quantity for product {product_id} exceeds the remaining amount by {excess}")]
    ExceedsRemaining { product_id: ProductId, excess: u64 },

    /// A candidate references a product the sale does not contain.
    #[error("product {0} is not part of the sale")]
    UnknownProduct(ProductId),
}

/// Check a candidate item list against the sale's remaining quantities.
///
/// `purchases` is the pre-submission history (the candidate itself is not in
/// it). On success the candidate list is returned unchanged.
pub fn validate<'a>(
    candidates: &'a [ItemDraft],
    sale: &Sale,
    purchases: &[Purchase],
) -> Result<&'a [ItemDraft], ValidationError> {
    if candidates.is_empty() {
        return Err(ValidationError::EmptyItems);
    }

    for candidate in candidates {
        if !sale.contains_product(candidate.product_id) {
            return Err(ValidationError::UnknownProduct(candidate.product_id));
        }

        let max = max_quantity_for(candidate.product_id, sale, purchases);
        if candidate.quantity > max {
            return Err(ValidationError::ExceedsRemaining {
                product_id: candidate.product_id,
                excess: candidate.quantity - max,
            });
        }
    }

    Ok(candidates)
}
