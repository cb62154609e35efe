//! Checkout
//!
//! Converts a cart into one order submission per farmer. Groups are
//! submitted strictly in sequence: group i+1 is only sent after group i's
//! request settles, so a mid-sequence failure leaves a deterministic prefix
//! of farmers ordered and the report can say exactly which group failed.

use rust_decimal::Decimal;

use crate::{
    cart::{Cart, FarmerGroup},
    ids::{FarmerId, ProductId},
};

/// One item of an order submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionItem {
    /// Product to order.
    pub product_id: ProductId,
    /// Quantity to order.
    pub quantity: Decimal,
}

/// The payload submitted to create one farmer's order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSubmission {
    /// The farmer the order is addressed to.
    pub farmer_id: FarmerId,
    /// The items, in cart order.
    pub items: Vec<SubmissionItem>,
}

impl FarmerGroup {
    /// The submission payload for this group.
    #[must_use]
    pub fn submission(&self) -> OrderSubmission {
        OrderSubmission {
            farmer_id: self.farmer_id,
            items: self
                .lines
                .iter()
                .map(|line| SubmissionItem {
                    product_id: line.product_id,
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

/// The farmer group a checkout stopped on, and why.
#[derive(Debug, PartialEq)]
pub struct CheckoutFailure<E> {
    /// The farmer whose submission failed.
    pub farmer_id: FarmerId,
    /// The farmer's display name, for reporting.
    pub farmer_name: String,
    /// The submission error.
    pub cause: E,
}

/// The outcome of a checkout: the orders created before the first failure,
/// and the failure itself if one occurred.
#[derive(Debug, PartialEq)]
pub struct CheckoutReport<O, E> {
    /// Orders created, one per successfully submitted farmer group.
    pub created: Vec<O>,
    /// The first failed group, if any. Already-created orders are not
    /// rolled back; the server is the system of record.
    pub failure: Option<CheckoutFailure<E>>,
}

impl<O, E> CheckoutReport<O, E> {
    /// Number of farmer groups successfully submitted.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.created.len()
    }

    /// Whether every group was submitted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

impl Cart {
    /// Submit the cart as one order per farmer, in first-seen farmer order.
    ///
    /// Each successful submission removes that farmer's lines from the
    /// cart, so after a partial failure the cart holds exactly the
    /// unsubmitted groups and the buyer can retry the remainder. A fully
    /// successful checkout leaves the cart empty.
    pub async fn checkout<O, E, F, Fut>(&mut self, mut submit: F) -> CheckoutReport<O, E>
    where
        F: FnMut(OrderSubmission) -> Fut,
        Fut: Future<Output = Result<O, E>>,
    {
        let mut created = Vec::new();

        for group in self.partition_by_farmer() {
            match submit(group.submission()).await {
                Ok(order) => {
                    created.push(order);
                    self.remove_farmer_lines(group.farmer_id);
                }
                Err(cause) => {
                    return CheckoutReport {
                        created,
                        failure: Some(CheckoutFailure {
                            farmer_id: group.farmer_id,
                            farmer_name: group.farmer_name,
                            cause,
                        }),
                    };
                }
            }
        }

        CheckoutReport {
            created,
            failure: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future;

    use rust_decimal::dec;

    use crate::cart::ProductSummary;

    use super::*;

    #[derive(Debug, PartialEq)]
    struct ServerDown;

    fn product(id: i64, farmer: i64, farmer_name: &str, price: Decimal) -> ProductSummary {
        ProductSummary {
            id: ProductId::from_raw(id),
            name: format!("product-{id}"),
            price,
            unit: "kg".to_string(),
            farmer_id: FarmerId::from_raw(farmer),
            farmer_name: farmer_name.to_string(),
            qty_available: dec!(100),
        }
    }

    fn two_farmer_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 1, "farmer-a", dec!(10)), dec!(2));
        cart.add_item(&product(2, 2, "farmer-b", dec!(5)), dec!(1));
        cart
    }

    #[tokio::test]
    async fn full_success_clears_the_cart() {
        let mut cart = two_farmer_cart();

        let report = cart
            .checkout(|submission| {
                future::ready(Ok::<_, ServerDown>(submission.farmer_id))
            })
            .await;

        assert!(report.is_complete());
        assert_eq!(report.succeeded(), 2);
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn submissions_run_in_first_seen_farmer_order() {
        let mut cart = two_farmer_cart();

        let report = cart
            .checkout(|submission| {
                future::ready(Ok::<_, ServerDown>(submission.farmer_id))
            })
            .await;

        assert_eq!(
            report.created,
            vec![FarmerId::from_raw(1), FarmerId::from_raw(2)]
        );
    }

    #[tokio::test]
    async fn partial_failure_keeps_unsubmitted_lines() {
        let mut cart = two_farmer_cart();

        let report = cart
            .checkout(|submission| {
                future::ready(if submission.farmer_id == FarmerId::from_raw(1) {
                    Ok(submission.farmer_id)
                } else {
                    Err(ServerDown)
                })
            })
            .await;

        assert_eq!(report.succeeded(), 1);

        let failure = report.failure.as_ref();
        assert!(
            matches!(
                failure,
                Some(CheckoutFailure {
                    farmer_id,
                    cause: ServerDown,
                    ..
                }) if *farmer_id == FarmerId::from_raw(2)
            ),
            "expected farmer-b failure, got {failure:?}"
        );

        // farmer-a's line is gone, farmer-b's remains for retry
        assert_eq!(cart.len(), 1);
        assert!(cart.line(ProductId::from_raw(2)).is_some());
        assert!(cart.line(ProductId::from_raw(1)).is_none());
    }

    #[tokio::test]
    async fn first_failure_stops_the_sequence() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 1, "farmer-a", dec!(10)), dec!(1));
        cart.add_item(&product(2, 2, "farmer-b", dec!(5)), dec!(1));
        cart.add_item(&product(3, 3, "farmer-c", dec!(7)), dec!(1));

        let mut attempted = Vec::new();

        let report = cart
            .checkout(|submission| {
                attempted.push(submission.farmer_id);
                future::ready(if submission.farmer_id == FarmerId::from_raw(2) {
                    Err(ServerDown)
                } else {
                    Ok(submission.farmer_id)
                })
            })
            .await;

        assert_eq!(report.succeeded(), 1);
        assert_eq!(
            attempted,
            vec![FarmerId::from_raw(1), FarmerId::from_raw(2)],
            "farmer-c must never be attempted after farmer-b fails"
        );
        assert_eq!(cart.len(), 2);
    }

    #[tokio::test]
    async fn empty_cart_checkout_is_a_complete_noop() {
        let mut cart = Cart::new();
        let mut calls = 0_u32;

        let report = cart
            .checkout(|_submission| {
                calls += 1;
                future::ready(Ok::<_, ServerDown>(()))
            })
            .await;

        assert!(report.is_complete());
        assert_eq!(report.succeeded(), 0);
        assert_eq!(calls, 0);
    }
}
