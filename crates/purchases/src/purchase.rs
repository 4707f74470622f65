use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use saleflow_core::{
    validate_item_drafts, DomainResult, Entity, ItemDraft, ProductId, PurchaseId, SaleId, UserId,
};

/// One line of a purchase: acquired product, units, and the backend-computed
/// subtotal (quantity × unit price at purchase time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseItem {
    pub id: i64,
    pub product_id: ProductId,
    pub quantity: u64,
    /// Subtotal in the smallest currency unit (e.g., cents).
    pub subtotal: u64,
}

/// A record of products actually acquired to fulfill one sale.
///
/// A sale may be fulfilled by many purchases over time; each purchase is
/// created once and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub user: UserId,
    pub username: String,
    pub sale_id: SaleId,
    pub date: DateTime<Utc>,
    pub items: Vec<PurchaseItem>,
}

impl Purchase {
    /// Total units acquired across all lines.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Total value of the purchase (sum of stored line subtotals).
    pub fn total_value(&self) -> u64 {
        self.items.iter().map(|item| item.subtotal).sum()
    }

    /// Units of one product acquired by this purchase.
    pub fn quantity_of(&self, product_id: ProductId) -> u64 {
        self.items
            .iter()
            .filter(|item| item.product_id == product_id)
            .map(|item| item.quantity)
            .sum()
    }
}

impl Entity for Purchase {
    type Id = PurchaseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Draft for a new purchase against an existing sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePurchase {
    pub sale_id: SaleId,
    pub items: Vec<ItemDraft>,
}

impl CreatePurchase {
    /// Build a purchase draft, enforcing the item rules up front.
    ///
    /// This only checks the draft's own shape; whether the items fit the
    /// sale's remaining quantities is the submission validator's job.
    pub fn new(sale_id: SaleId, items: Vec<ItemDraft>) -> DomainResult<Self> {
        validate_item_drafts(&items)?;
        Ok(Self { sale_id, items })
    }
}
