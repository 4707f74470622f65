//! Fulfillment calculator: required vs. purchased vs. remaining, per sale.
//!
//! Everything here is a pure function over a sale and the purchase history.
//! Callers are expected to recompute on every data refresh; cost is linear in
//! the number of purchase lines for the sale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use saleflow_core::{ProductId, ValueObject};
use saleflow_purchases::Purchase;
use saleflow_sales::Sale;

/// Fulfillment of one (sale, product) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFulfillment {
    pub required_quantity: u64,
    pub purchased_quantity: u64,
    /// Required minus purchased, floored at zero.
    pub remaining_quantity: u64,
}

impl ItemFulfillment {
    fn new(required_quantity: u64, purchased_quantity: u64) -> Self {
        Self {
            required_quantity,
            purchased_quantity,
            remaining_quantity: required_quantity.saturating_sub(purchased_quantity),
        }
    }

    /// Whether enough units have been purchased to cover the requirement.
    pub fn is_satisfied(&self) -> bool {
        self.purchased_quantity >= self.required_quantity
    }

    /// Classify the line for display: complete, short, or over-purchased.
    pub fn state(&self) -> ItemState {
        if self.purchased_quantity > self.required_quantity {
            ItemState::Excess {
                excess_quantity: self.purchased_quantity - self.required_quantity,
            }
        } else if self.remaining_quantity > 0 {
            ItemState::Missing {
                missing_quantity: self.remaining_quantity,
            }
        } else {
            ItemState::Complete
        }
    }
}

impl ValueObject for ItemFulfillment {}

/// Per-line classification of an [`ItemFulfillment`].
///
/// `Excess` is the explicit over-fulfillment signal; `remaining_quantity`
/// alone cannot distinguish "exactly done" from "over-purchased" once it
/// clamps at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum ItemState {
    Complete,
    Missing { missing_quantity: u64 },
    Excess { excess_quantity: u64 },
}

/// Aggregate fulfillment status of one sale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PurchaseStatus {
    pub is_fully_purchased: bool,
    /// Aggregate purchased over aggregate required, as a percentage.
    ///
    /// Deliberately unclamped: values above 100 mean over-purchase, and
    /// display layers cap the presentation, not the ratio.
    pub purchase_progress: f64,
}

impl ValueObject for PurchaseStatus {}

/// Per-item fulfillment for a sale, keyed by product.
///
/// Only purchases referencing `sale.id` are counted. A product appearing in
/// several sale lines has its required quantities aggregated; likewise
/// purchased quantities aggregate across all matching purchase lines.
pub fn item_fulfillment(
    sale: &Sale,
    purchases: &[Purchase],
) -> BTreeMap<ProductId, ItemFulfillment> {
    let mut required: BTreeMap<ProductId, u64> = BTreeMap::new();
    for item in &sale.items {
        *required.entry(item.product_id).or_insert(0) += item.quantity;
    }

    let mut purchased: BTreeMap<ProductId, u64> = BTreeMap::new();
    for purchase in purchases.iter().filter(|p| p.sale_id == sale.id) {
        for item in &purchase.items {
            // Lines for products outside the sale are ignored here; the sale's
            // own requirements define the keys of the result.
            if required.contains_key(&item.product_id) {
                *purchased.entry(item.product_id).or_insert(0) += item.quantity;
            }
        }
    }

    required
        .into_iter()
        .map(|(product_id, required_quantity)| {
            let purchased_quantity = purchased.get(&product_id).copied().unwrap_or(0);
            (
                product_id,
                ItemFulfillment::new(required_quantity, purchased_quantity),
            )
        })
        .collect()
}

/// Aggregate status of a sale over the purchase history.
///
/// A sale with nothing required counts as fully purchased with progress 100;
/// that also covers the zero-item sale. Progress is never clamped from above.
pub fn sale_status(sale: &Sale, purchases: &[Purchase]) -> PurchaseStatus {
    let fulfillment = item_fulfillment(sale, purchases);

    let total_required: u64 = fulfillment.values().map(|f| f.required_quantity).sum();
    let total_purchased: u64 = fulfillment.values().map(|f| f.purchased_quantity).sum();

    let purchase_progress = if total_required == 0 {
        100.0
    } else {
        total_purchased as f64 / total_required as f64 * 100.0
    };

    PurchaseStatus {
        is_fully_purchased: fulfillment.values().all(ItemFulfillment::is_satisfied),
        purchase_progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use saleflow_core::{PurchaseId, SaleId, UserId};
    use saleflow_purchases::PurchaseItem;
    use saleflow_sales::SaleItem;

    fn sale(id: i64, items: &[(i64, u64)]) -> Sale {
        Sale {
            id: SaleId::new(id),
            user: UserId::new(1),
            username: "testuser".to_string(),
            date: Utc::now(),
            items: items
                .iter()
                .enumerate()
                .map(|(i, &(product_id, quantity))| SaleItem {
                    id: i as i64 + 1,
                    product_id: ProductId::new(product_id),
                    quantity,
                })
                .collect(),
        }
    }

    fn purchase(id: i64, sale_id: i64, items: &[(i64, u64)]) -> Purchase {
        Purchase {
            id: PurchaseId::new(id),
            user: UserId::new(1),
            username: "testuser".to_string(),
            sale_id: SaleId::new(sale_id),
            date: Utc::now(),
            items: items
                .iter()
                .enumerate()
                .map(|(i, &(product_id, quantity))| PurchaseItem {
                    id: i as i64 + 1,
                    product_id: ProductId::new(product_id),
                    quantity,
                    subtotal: quantity * 100,
                })
                .collect(),
        }
    }

    #[test]
    fn no_purchases_leaves_everything_remaining() {
        let s = sale(1, &[(10, 5)]);
        let fulfillment = item_fulfillment(&s, &[]);

        let f = &fulfillment[&ProductId::new(10)];
        assert_eq!(f.required_quantity, 5);
        assert_eq!(f.purchased_quantity, 0);
        assert_eq!(f.remaining_quantity, 5);

        let status = sale_status(&s, &[]);
        assert!(!status.is_fully_purchased);
        assert_eq!(status.purchase_progress, 0.0);
    }

    #[test]
    fn partial_purchase_reduces_remaining() {
        let s = sale(1, &[(10, 5)]);
        let history = vec![purchase(1, 1, &[(10, 3)])];

        let fulfillment = item_fulfillment(&s, &history);
        let f = &fulfillment[&ProductId::new(10)];
        assert_eq!(f.required_quantity, 5);
        assert_eq!(f.purchased_quantity, 3);
        assert_eq!(f.remaining_quantity, 2);

        let status = sale_status(&s, &history);
        assert!(!status.is_fully_purchased);
        assert_eq!(status.purchase_progress, 60.0);
    }

    #[test]
    fn quantities_aggregate_across_purchases() {
        let s = sale(1, &[(10, 5)]);
        let history = vec![purchase(1, 1, &[(10, 3)]), purchase(2, 1, &[(10, 2)])];

        let fulfillment = item_fulfillment(&s, &history);
        let f = &fulfillment[&ProductId::new(10)];
        assert_eq!(f.purchased_quantity, 5);
        assert_eq!(f.remaining_quantity, 0);

        let status = sale_status(&s, &history);
        assert!(status.is_fully_purchased);
        assert_eq!(status.purchase_progress, 100.0);
    }

    #[test]
    fn purchases_for_other_sales_are_ignored() {
        let s = sale(1, &[(10, 5)]);
        let history = vec![purchase(1, 2, &[(10, 5)])];

        let fulfillment = item_fulfillment(&s, &history);
        assert_eq!(fulfillment[&ProductId::new(10)].purchased_quantity, 0);
    }

    #[test]
    fn over_purchase_clamps_remaining_but_not_progress() {
        let s = sale(1, &[(10, 5)]);
        let history = vec![purchase(1, 1, &[(10, 4)]), purchase(2, 1, &[(10, 3)])];

        let fulfillment = item_fulfillment(&s, &history);
        let f = &fulfillment[&ProductId::new(10)];
        assert_eq!(f.purchased_quantity, 7);
        assert_eq!(f.remaining_quantity, 0);
        assert_eq!(
            f.state(),
            ItemState::Excess { excess_quantity: 2 }
        );

        let status = sale_status(&s, &history);
        assert!(status.is_fully_purchased);
        assert_eq!(status.purchase_progress, 140.0);
    }

    #[test]
    fn zero_item_sale_is_vacuously_complete() {
        let s = sale(1, &[]);
        let status = sale_status(&s, &[]);
        assert!(status.is_fully_purchased);
        assert_eq!(status.purchase_progress, 100.0);
        assert!(item_fulfillment(&s, &[]).is_empty());
    }

    #[test]
    fn zero_required_quantity_counts_as_complete() {
        // A line with quantity 0 should not be constructible through drafts,
        // but the calculator still degrades gracefully if the backend sends one.
        let s = sale(1, &[(10, 0)]);
        let status = sale_status(&s, &[]);
        assert!(status.is_fully_purchased);
        assert_eq!(status.purchase_progress, 100.0);
    }

    #[test]
    fn mixed_lines_require_every_item_satisfied() {
        let s = sale(1, &[(10, 2), (11, 4)]);
        let history = vec![purchase(1, 1, &[(10, 2), (11, 1)])];

        let status = sale_status(&s, &history);
        assert!(!status.is_fully_purchased);
        // 3 of 6 units purchased.
        assert_eq!(status.purchase_progress, 50.0);

        let fulfillment = item_fulfillment(&s, &history);
        assert_eq!(fulfillment[&ProductId::new(10)].state(), ItemState::Complete);
        assert_eq!(
            fulfillment[&ProductId::new(11)].state(),
            ItemState::Missing {
                missing_quantity: 3
            }
        );
    }

    #[test]
    fn duplicate_sale_lines_aggregate_required() {
        let s = sale(1, &[(10, 2), (10, 3)]);
        let history = vec![purchase(1, 1, &[(10, 4)])];

        let fulfillment = item_fulfillment(&s, &history);
        let f = &fulfillment[&ProductId::new(10)];
        assert_eq!(f.required_quantity, 5);
        assert_eq!(f.purchased_quantity, 4);
        assert_eq!(f.remaining_quantity, 1);
    }

    #[test]
    fn purchase_lines_outside_the_sale_are_not_keyed() {
        let s = sale(1, &[(10, 5)]);
        let history = vec![purchase(1, 1, &[(10, 1), (99, 7)])];

        let fulfillment = item_fulfillment(&s, &history);
        assert_eq!(fulfillment.len(), 1);
        assert_eq!(fulfillment[&ProductId::new(10)].purchased_quantity, 1);
    }

    #[test]
    fn calculator_is_idempotent() {
        let s = sale(1, &[(10, 5), (11, 2)]);
        let history = vec![purchase(1, 1, &[(10, 3)]), purchase(2, 1, &[(11, 2)])];

        let first = item_fulfillment(&s, &history);
        let second = item_fulfillment(&s, &history);
        assert_eq!(first, second);

        let status1 = sale_status(&s, &history);
        let status2 = sale_status(&s, &history);
        assert_eq!(status1, status2);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn history_strategy() -> impl Strategy<Value = Vec<Vec<(i64, u64)>>> {
            prop::collection::vec(
                prop::collection::vec((1i64..5, 0u64..10), 0..4),
                0..6,
            )
        }

        proptest! {
            /// Property: remaining never underflows, whatever the history.
            #[test]
            fn remaining_is_required_minus_purchased_floored(
                required in 0u64..20,
                lines in history_strategy()
            ) {
                let s = sale(1, &[(1, required)]);
                let history: Vec<Purchase> = lines
                    .iter()
                    .enumerate()
                    .map(|(i, items)| purchase(i as i64 + 1, 1, items))
                    .collect();

                let fulfillment = item_fulfillment(&s, &history);
                let f = &fulfillment[&ProductId::new(1)];

                prop_assert_eq!(
                    f.remaining_quantity,
                    f.required_quantity.saturating_sub(f.purchased_quantity)
                );
                prop_assert!(f.remaining_quantity <= f.required_quantity);
            }

            /// Property: the calculator is pure (same inputs, same outputs).
            #[test]
            fn calculator_is_deterministic(
                sale_lines in prop::collection::vec((1i64..5, 1u64..10), 0..4),
                lines in history_strategy()
            ) {
                let s = sale(1, &sale_lines);
                let history: Vec<Purchase> = lines
                    .iter()
                    .enumerate()
                    .map(|(i, items)| purchase(i as i64 + 1, 1, items))
                    .collect();

                prop_assert_eq!(
                    item_fulfillment(&s, &history),
                    item_fulfillment(&s, &history)
                );
                prop_assert_eq!(sale_status(&s, &history), sale_status(&s, &history));
            }

            /// Property: fully purchased exactly when every line is satisfied.
            #[test]
            fn fully_purchased_matches_per_item_satisfaction(
                sale_lines in prop::collection::vec((1i64..5, 1u64..10), 1..4),
                lines in history_strategy()
            ) {
                let s = sale(1, &sale_lines);
                let history: Vec<Purchase> = lines
                    .iter()
                    .enumerate()
                    .map(|(i, items)| purchase(i as i64 + 1, 1, items))
                    .collect();

                let status = sale_status(&s, &history);
                let all_satisfied = item_fulfillment(&s, &history)
                    .values()
                    .all(ItemFulfillment::is_satisfied);

                prop_assert_eq!(status.is_fully_purchased, all_satisfied);
            }

            /// Property: progress reflects the exact aggregate ratio.
            #[test]
            fn progress_is_exact_aggregate_ratio(
                sale_lines in prop::collection::vec((1i64..5, 1u64..10), 1..4),
                lines in history_strategy()
            ) {
                let s = sale(1, &sale_lines);
                let history: Vec<Purchase> = lines
                    .iter()
                    .enumerate()
                    .map(|(i, items)| purchase(i as i64 + 1, 1, items))
                    .collect();

                let fulfillment = item_fulfillment(&s, &history);
                let required: u64 = fulfillment.values().map(|f| f.required_quantity).sum();
                let purchased: u64 = fulfillment.values().map(|f| f.purchased_quantity).sum();

                let status = sale_status(&s, &history);
                let expected = purchased as f64 / required as f64 * 100.0;
                prop_assert!((status.purchase_progress - expected).abs() < 1e-9);
            }
        }
    }
}
