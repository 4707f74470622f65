//! Backend collaborator traits.
//!
//! The dashboard consumes the backend through these seams; a conventional
//! HTTP client implements them in the application shell, and
//! [`crate::memory::InMemoryGateway`] stands in for tests. The backend is
//! authoritative for everything it returns.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ClientResult;
use crate::session::Session;
use saleflow_products::Product;
use saleflow_purchases::{CreatePurchase, Purchase};
use saleflow_sales::Sale;

/// Client-generated correlation id for a submission.
///
/// UUIDv7 (time-ordered), minted once per submission attempt so a retry by
/// the user is distinguishable from a duplicate delivery.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RequestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A purchase draft wrapped for transmission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePurchaseRequest {
    pub request_id: RequestId,
    pub draft: CreatePurchase,
}

impl CreatePurchaseRequest {
    pub fn new(draft: CreatePurchase) -> Self {
        Self {
            request_id: RequestId::new(),
            draft,
        }
    }
}

/// Fetches the product catalog.
pub trait ProductSource {
    async fn fetch_products(&self, session: &Session) -> ClientResult<Vec<Product>>;
}

/// Fetches the sale list.
pub trait SaleSource {
    async fn fetch_sales(&self, session: &Session) -> ClientResult<Vec<Sale>>;
}

/// Fetches the full purchase history.
pub trait PurchaseSource {
    async fn fetch_purchases(&self, session: &Session) -> ClientResult<Vec<Purchase>>;
}

/// Creates purchases; the backend's verdict is final.
pub trait PurchaseGateway {
    async fn create_purchase(
        &self,
        session: &Session,
        request: &CreatePurchaseRequest,
    ) -> ClientResult<Purchase>;
}
