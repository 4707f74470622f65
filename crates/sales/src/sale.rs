use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use saleflow_core::{
    validate_item_drafts, DomainResult, Entity, ItemDraft, ProductId, SaleId, UserId,
};
use saleflow_products::Product;

/// One line of a sale: which product was committed, and how many units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItem {
    pub id: i64,
    pub product_id: ProductId,
    pub quantity: u64,
}

/// A customer's commitment to buy, with required quantities per product.
///
/// Sales are created once with their items and are immutable afterwards;
/// purchase activity never edits them. Fulfillment state is always derived,
/// never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub user: UserId,
    pub username: String,
    pub date: DateTime<Utc>,
    pub items: Vec<SaleItem>,
}

impl Sale {
    /// Total units committed across all lines.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Total value of the sale, priced against the given catalog.
    ///
    /// Lines whose product is missing from the catalog contribute nothing;
    /// the catalog snapshot may lag behind a freshly-fetched sale list.
    pub fn total_value(&self, catalog: &[Product]) -> u64 {
        self.items
            .iter()
            .filter_map(|item| {
                catalog
                    .iter()
                    .find(|p| p.id == item.product_id)
                    .map(|p| p.price * item.quantity)
            })
            .sum()
    }

    /// The required quantity for one product, aggregated across lines.
    ///
    /// A sale normally carries one line per product, but nothing in the data
    /// model forbids repeats; sum them rather than picking the first.
    pub fn required_quantity(&self, product_id: ProductId) -> u64 {
        self.items
            .iter()
            .filter(|item| item.product_id == product_id)
            .map(|item| item.quantity)
            .sum()
    }

    /// Whether the sale has a line for the given product.
    pub fn contains_product(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|item| item.product_id == product_id)
    }
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Draft for a new sale (ids, date and user are assigned by the backend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSale {
    pub items: Vec<ItemDraft>,
}

impl CreateSale {
    /// Build a sale draft, enforcing the item rules up front.
    pub fn new(items: Vec<ItemDraft>) -> DomainResult<Self> {
        validate_item_drafts(&items)?;
        Ok(Self { items })
    }
}
