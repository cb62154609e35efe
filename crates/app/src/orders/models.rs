//! Order models.

use haat::{
    checkout::OrderSubmission,
    ids::{BuyerId, FarmerId, OrderId, ProductId},
    order::OrderStatus,
};
use jiff::civil::DateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One buyer→farmer purchase as the server returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub buyer_id: BuyerId,
    pub buyer_name: Option<String>,
    pub buyer_phone: Option<String>,
    pub buyer_address: Option<String>,
    pub farmer_id: FarmerId,
    pub farmer_name: Option<String>,
    pub status: OrderStatus,

    /// Fixed at order-creation time, server-computed. Never recomputed
    /// client-side for an existing order.
    pub total_amount: Decimal,

    pub items: Vec<OrderItem>,
    pub created_at: Option<DateTime>,
}

/// One line of an order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: Decimal,
    pub price_each: Decimal,
    pub subtotal: Decimal,
}

/// `POST /buyer/orders` payload: one farmer's portion of the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub farmer_id: FarmerId,
    pub items: Vec<CreateOrderItem>,
}

/// One item of an order creation payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItem {
    pub product_id: ProductId,
    pub quantity: Decimal,
}

impl From<OrderSubmission> for CreateOrderRequest {
    fn from(submission: OrderSubmission) -> Self {
        Self {
            farmer_id: submission.farmer_id,
            items: submission
                .items
                .into_iter()
                .map(|item| CreateOrderItem {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

/// Farmer dashboard statistics.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerStats {
    pub total_orders: u64,
    pub pending_orders: u64,
    pub confirmed_orders: u64,
    pub completed_orders: u64,
    pub rejected_orders: u64,

    /// Revenue from completed orders.
    pub total_revenue: Decimal,

    /// Value of pending and confirmed orders.
    pub pending_revenue: Decimal,

    pub total_products: u64,
    pub active_products: u64,
}

/// Buyer dashboard statistics.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerStats {
    pub total_orders: u64,
    pub pending_orders: u64,
    pub confirmed_orders: u64,
    pub completed_orders: u64,
    pub cancelled_orders: u64,

    /// Spend on completed orders.
    pub total_spent: Decimal,

    /// Value of pending and confirmed orders.
    pub pending_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use haat::checkout::SubmissionItem;

    use super::*;

    #[test]
    fn create_request_mirrors_submission() {
        let submission = OrderSubmission {
            farmer_id: FarmerId::from_raw(4),
            items: vec![SubmissionItem {
                product_id: ProductId::from_raw(9),
                quantity: dec!(2.5),
            }],
        };

        let request = CreateOrderRequest::from(submission);

        assert_eq!(request.farmer_id, FarmerId::from_raw(4));
        assert_eq!(
            request.items,
            vec![CreateOrderItem {
                product_id: ProductId::from_raw(9),
                quantity: dec!(2.5),
            }]
        );
    }
}
