//! Purchase eligibility: which products may still be added, and how many.

use saleflow_core::ProductId;
use saleflow_products::Product;
use saleflow_purchases::Purchase;
use saleflow_sales::Sale;

use crate::calculator::item_fulfillment;

/// Products that may still be added to a new purchase against `sale`.
///
/// A product qualifies when it appears in the sale's lines, still has
/// remaining quantity, and is not already staged in the in-progress purchase
/// form (one line per product per submission). Catalog order is preserved.
pub fn eligible_products<'a>(
    sale: &Sale,
    products: &'a [Product],
    purchases: &[Purchase],
    staged: &[ProductId],
) -> Vec<&'a Product> {
    let fulfillment = item_fulfillment(sale, purchases);

    products
        .iter()
        .filter(|product| {
            fulfillment
                .get(&product.id)
                .is_some_and(|f| f.remaining_quantity > 0)
                && !staged.contains(&product.id)
        })
        .collect()
}

/// The most units of `product_id` a new purchase may carry for `sale`.
///
/// Zero when the product is not part of the sale, and never negative.
pub fn max_quantity_for(product_id: ProductId, sale: &Sale, purchases: &[Purchase]) -> u64 {
    item_fulfillment(sale, purchases)
        .get(&product_id)
        .map(|f| f.remaining_quantity)
        .unwrap_or(0)
}
