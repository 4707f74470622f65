use saleflow_core::{ProductId, PurchaseId, SaleId};
use saleflow_products::Product;
use saleflow_purchases::Purchase;
use saleflow_sales::Sale;

/// In-memory snapshots of the three catalogs as last loaded from the backend.
///
/// Storage and lookup only; every derived figure (fulfillment, status,
/// eligibility) is computed on demand by the fulfillment crate. Refreshes
/// replace a snapshot wholesale; the store never merges.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    products: Vec<Product>,
    sales: Vec<Sale>,
    purchases: Vec<Purchase>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    pub fn replace_products(&mut self, products: Vec<Product>) {
        tracing::debug!(count = products.len(), "refreshed product snapshot");
        self.products = products;
    }

    pub fn replace_sales(&mut self, sales: Vec<Sale>) {
        tracing::debug!(count = sales.len(), "refreshed sale snapshot");
        self.sales = sales;
    }

    pub fn replace_purchases(&mut self, purchases: Vec<Purchase>) {
        tracing::debug!(count = purchases.len(), "refreshed purchase snapshot");
        self.purchases = purchases;
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn sale(&self, id: SaleId) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    pub fn purchase(&self, id: PurchaseId) -> Option<&Purchase> {
        self.purchases.iter().find(|p| p.id == id)
    }

    /// All purchases recorded against one sale, in snapshot order.
    pub fn purchases_for_sale(&self, sale_id: SaleId) -> Vec<&Purchase> {
        self.purchases
            .iter()
            .filter(|p| p.sale_id == sale_id)
            .collect()
    }

    /// A sale together with its purchase history (the `with_purchases` view).
    pub fn sale_with_purchases(&self, sale_id: SaleId) -> Option<(&Sale, Vec<&Purchase>)> {
        self.sale(sale_id)
            .map(|sale| (sale, self.purchases_for_sale(sale_id)))
    }
}
