//! Draft line items shared by sale and purchase creation.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::ProductId;
use crate::value_object::ValueObject;

/// A not-yet-persisted line item: which product, how many units.
///
/// Both `CreateSale` and `CreatePurchase` submit lists of these; the backend
/// assigns item ids and computes subtotals on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub product_id: ProductId,
    pub quantity: u64,
}

impl ItemDraft {
    pub fn new(product_id: ProductId, quantity: u64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

impl ValueObject for ItemDraft {}

/// Validate a draft item list before it is wrapped in a create request.
///
/// Mirrors the backend's serializer rules: at least one item, every quantity
/// strictly positive.
pub fn validate_item_drafts(items: &[ItemDraft]) -> DomainResult<()> {
    if items.is_empty() {
        return Err(DomainError::validation("at least one item is required"));
    }

    for item in items {
        if item.quantity == 0 {
            return Err(DomainError::validation(format!(
                "quantity for product {} must be positive",
                item.product_id
            )));
        }
    }

    Ok(())
}
