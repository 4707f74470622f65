//! Dashboard-facing flows composed from the fulfillment core and the
//! collaborator traits.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::gateway::{CreatePurchaseRequest, PurchaseGateway, PurchaseSource, SaleSource};
use crate::session::Session;
use saleflow_core::ProductId;
use saleflow_fulfillment::{
    item_fulfillment, sale_status, validate, ItemFulfillment, ItemState, PurchaseStatus,
};
use saleflow_purchases::{CreatePurchase, Purchase};
use saleflow_sales::Sale;

/// A sale with its computed purchase status attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleWithStatus {
    pub sale: Sale,
    pub purchase_status: PurchaseStatus,
}

/// Attach a [`PurchaseStatus`] to every sale in the list.
///
/// This is the `with_status` retrieval path: one calculator call per sale over
/// the shared purchase history.
pub fn sales_with_status(sales: Vec<Sale>, purchases: &[Purchase]) -> Vec<SaleWithStatus> {
    sales
        .into_iter()
        .map(|sale| {
            let purchase_status = sale_status(&sale, purchases);
            SaleWithStatus {
                sale,
                purchase_status,
            }
        })
        .collect()
}

/// Fetch sales and purchases, then attach statuses.
pub async fn fetch_sales_with_status(
    sales: &impl SaleSource,
    purchases: &impl PurchaseSource,
    session: &Session,
) -> ClientResult<Vec<SaleWithStatus>> {
    let sale_list = sales.fetch_sales(session).await?;
    let history = purchases.fetch_purchases(session).await?;
    Ok(sales_with_status(sale_list, &history))
}

/// One row of the sale-detail breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBreakdown {
    pub product_id: ProductId,
    pub fulfillment: ItemFulfillment,
    pub state: ItemState,
}

/// Per-item fulfillment rows for a sale, ordered by product id.
pub fn sale_item_breakdown(sale: &Sale, purchases: &[Purchase]) -> Vec<ItemBreakdown> {
    item_fulfillment(sale, purchases)
        .into_iter()
        .map(|(product_id, fulfillment)| ItemBreakdown {
            product_id,
            fulfillment,
            state: fulfillment.state(),
        })
        .collect()
}

/// Validate locally, then submit the purchase draft.
///
/// `sale` must be the sale the draft references, and `purchases` the history
/// as currently fetched (without the candidate). A local rejection means
/// nothing was sent; a [`ClientError::Backend`] from the gateway is the
/// authoritative verdict and wins over the validator's optimism, since
/// another session may have purchased against the same sale since the last
/// refresh.
pub async fn submit_purchase(
    gateway: &impl PurchaseGateway,
    session: &Session,
    draft: CreatePurchase,
    sale: &Sale,
    purchases: &[Purchase],
) -> ClientResult<Purchase> {
    debug_assert_eq!(draft.sale_id, sale.id);

    validate(&draft.items, sale, purchases)?;

    let request = CreatePurchaseRequest::new(draft);
    tracing::debug!(
        request_id = %request.request_id,
        sale_id = %request.draft.sale_id,
        items = request.draft.items.len(),
        "submitting purchase"
    );

    match gateway.create_purchase(session, &request).await {
        Ok(purchase) => Ok(purchase),
        Err(err) => {
            if let ClientError::Backend { message } = &err {
                tracing::warn!(
                    request_id = %request.request_id,
                    %message,
                    "backend rejected purchase"
                );
            }
            Err(err)
        }
    }
}
