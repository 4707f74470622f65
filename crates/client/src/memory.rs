//! In-memory backend stand-in.
//!
//! Plays the backend's role for tests and offline development: assigns ids,
//! stamps dates and actors, recomputes subtotals from the catalog, and runs
//! the authoritative purchase checks serially under one lock, including the
//! remaining-quantity check that catches races the client-side validator
//! cannot see.

use std::sync::Mutex;

use chrono::Utc;

use crate::error::{ClientError, ClientResult};
use crate::gateway::{
    CreatePurchaseRequest, ProductSource, PurchaseGateway, PurchaseSource, SaleSource,
};
use crate::session::Session;
use saleflow_core::PurchaseId;
use saleflow_fulfillment::item_fulfillment;
use saleflow_products::Product;
use saleflow_purchases::{Purchase, PurchaseItem};
use saleflow_sales::Sale;

#[derive(Debug)]
struct GatewayState {
    products: Vec<Product>,
    sales: Vec<Sale>,
    purchases: Vec<Purchase>,
    next_purchase_id: i64,
    next_item_id: i64,
}

/// Backend double holding its own copies of the three catalogs.
#[derive(Debug)]
pub struct InMemoryGateway {
    state: Mutex<GatewayState>,
}

impl InMemoryGateway {
    pub fn new(products: Vec<Product>, sales: Vec<Sale>) -> Self {
        Self {
            state: Mutex::new(GatewayState {
                products,
                sales,
                purchases: Vec::new(),
                next_purchase_id: 1,
                next_item_id: 1,
            }),
        }
    }

    /// Seed an existing purchase history (ids must not collide with assigned
    /// ones; pass history created through this gateway or use fresh ids).
    pub fn with_history(products: Vec<Product>, sales: Vec<Sale>, purchases: Vec<Purchase>) -> Self {
        let next_purchase_id = purchases
            .iter()
            .map(|p| p.id.as_i64())
            .max()
            .unwrap_or(0)
            + 1;
        let next_item_id = purchases
            .iter()
            .flat_map(|p| p.items.iter().map(|i| i.id))
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            state: Mutex::new(GatewayState {
                products,
                sales,
                purchases,
                next_purchase_id,
                next_item_id,
            }),
        }
    }
}

impl ProductSource for InMemoryGateway {
    async fn fetch_products(&self, _session: &Session) -> ClientResult<Vec<Product>> {
        Ok(self.state.lock().unwrap().products.clone())
    }
}

impl SaleSource for InMemoryGateway {
    async fn fetch_sales(&self, _session: &Session) -> ClientResult<Vec<Sale>> {
        Ok(self.state.lock().unwrap().sales.clone())
    }
}

impl PurchaseSource for InMemoryGateway {
    async fn fetch_purchases(&self, _session: &Session) -> ClientResult<Vec<Purchase>> {
        Ok(self.state.lock().unwrap().purchases.clone())
    }
}

impl PurchaseGateway for InMemoryGateway {
    async fn create_purchase(
        &self,
        session: &Session,
        request: &CreatePurchaseRequest,
    ) -> ClientResult<Purchase> {
        // Check-and-append under one lock; concurrent submissions serialize here.
        let mut state = self.state.lock().unwrap();
        let draft = &request.draft;

        let Some(sale) = state.sales.iter().find(|s| s.id == draft.sale_id) else {
            return Err(ClientError::backend("sale not found"));
        };

        for item in &draft.items {
            if !sale.contains_product(item.product_id) {
                return Err(ClientError::backend(
                    "a purchase may only contain products from the related sale",
                ));
            }
        }

        let mut seen = Vec::with_capacity(draft.items.len());
        for item in &draft.items {
            if seen.contains(&item.product_id) {
                return Err(ClientError::backend(format!(
                    "duplicate product {} in purchase",
                    item.product_id
                )));
            }
            seen.push(item.product_id);
        }

        let fulfillment = item_fulfillment(sale, &state.purchases);
        for item in &draft.items {
            let remaining = fulfillment
                .get(&item.product_id)
                .map(|f| f.remaining_quantity)
                .unwrap_or(0);
            if item.quantity > remaining {
                return Err(ClientError::backend(format!(
                    "quantity for product {} exceeds the remaining amount",
                    item.product_id
                )));
            }
        }

        let mut items = Vec::with_capacity(draft.items.len());
        for item in &draft.items {
            let Some(product) = state.products.iter().find(|p| p.id == item.product_id) else {
                return Err(ClientError::backend(format!(
                    "product {} not found",
                    item.product_id
                )));
            };
            items.push(PurchaseItem {
                id: state.next_item_id + items.len() as i64,
                product_id: item.product_id,
                quantity: item.quantity,
                subtotal: item.quantity * product.price,
            });
        }
        state.next_item_id += items.len() as i64;

        let purchase = Purchase {
            id: PurchaseId::new(state.next_purchase_id),
            user: session.user,
            username: session.username.clone(),
            sale_id: draft.sale_id,
            date: Utc::now(),
            items,
        };
        state.next_purchase_id += 1;

        state.purchases.push(purchase.clone());
        Ok(purchase)
    }
}
