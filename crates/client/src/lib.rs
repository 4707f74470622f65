//! Backend collaborator seam for the dashboard.
//!
//! Fetch/create traits, the explicit [`Session`] value, the `with_status`
//! retrieval path, and the guarded purchase-submission flow. Transport is
//! someone else's concern: implementations of the traits live at the
//! application edge, and [`InMemoryGateway`] plays the backend in tests.

pub mod error;
pub mod gateway;
pub mod memory;
pub mod service;
pub mod session;

pub use error::{ClientError, ClientResult};
pub use gateway::{
    CreatePurchaseRequest, ProductSource, PurchaseGateway, PurchaseSource, RequestId, SaleSource,
};
pub use memory::InMemoryGateway;
pub use service::{
    fetch_sales_with_status, sale_item_breakdown, sales_with_status, submit_purchase,
    ItemBreakdown, SaleWithStatus,
};
pub use session::Session;
