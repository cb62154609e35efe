//! Orders service.

use async_trait::async_trait;
use haat::{ids::OrderId, order::OrderStatus};
use mockall::automock;
use tracing::info;

use crate::{
    errors::ApiError,
    http::ApiClient,
    orders::models::{BuyerStats, CreateOrderRequest, FarmerStats, Order},
};

/// HTTP client for the buyer- and farmer-scoped order endpoints.
#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    http: ApiClient,
}

impl HttpOrdersService {
    #[must_use]
    pub fn new(http: ApiClient) -> Self {
        Self { http }
    }

    async fn list(&self, path: &str, status: Option<OrderStatus>) -> Result<Vec<Order>, ApiError> {
        match status {
            Some(status) => {
                self.http
                    .get_query(path, &[("status", status.as_str())])
                    .await
            }
            None => self.http.get(path).await,
        }
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ApiError> {
        let order: Order = self.http.post("/buyer/orders", request).await?;

        info!(order = %order.id, farmer = %order.farmer_id, "order created");

        Ok(order)
    }

    async fn buyer_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, ApiError> {
        self.list("/buyer/orders", status).await
    }

    async fn buyer_order(&self, id: OrderId) -> Result<Order, ApiError> {
        self.http.get(&format!("/buyer/orders/{id}")).await
    }

    async fn cancel(&self, id: OrderId) -> Result<Order, ApiError> {
        let order: Order = self.http.put(&format!("/buyer/orders/{id}/cancel")).await?;

        info!(order = %id, "order cancelled");

        Ok(order)
    }

    async fn order_history(&self) -> Result<Vec<Order>, ApiError> {
        self.http.get("/buyer/order-history").await
    }

    async fn pending_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.http.get("/buyer/orders/pending").await
    }

    async fn buyer_stats(&self) -> Result<BuyerStats, ApiError> {
        self.http.get("/buyer/stats").await
    }

    async fn farmer_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, ApiError> {
        self.list("/farmer/orders", status).await
    }

    async fn farmer_order(&self, id: OrderId) -> Result<Order, ApiError> {
        self.http.get(&format!("/farmer/orders/{id}")).await
    }

    async fn confirm(&self, id: OrderId) -> Result<Order, ApiError> {
        let order: Order = self
            .http
            .put(&format!("/farmer/orders/{id}/confirm"))
            .await?;

        info!(order = %id, "order confirmed");

        Ok(order)
    }

    async fn reject(&self, id: OrderId) -> Result<Order, ApiError> {
        let order: Order = self.http.put(&format!("/farmer/orders/{id}/reject")).await?;

        info!(order = %id, "order rejected");

        Ok(order)
    }

    async fn complete(&self, id: OrderId) -> Result<Order, ApiError> {
        let order: Order = self
            .http
            .put(&format!("/farmer/orders/{id}/complete"))
            .await?;

        info!(order = %id, "order completed");

        Ok(order)
    }

    async fn sales_history(&self) -> Result<Vec<Order>, ApiError> {
        self.http.get("/farmer/sales-history").await
    }

    async fn farmer_stats(&self) -> Result<FarmerStats, ApiError> {
        self.http.get("/farmer/stats").await
    }
}

/// The order operations the views and the workflow depend on.
///
/// Status filters are applied server-side; a `None` filter means all
/// statuses, and a filter change is always a fresh fetch.
#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Create one order from one farmer's portion of the cart.
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ApiError>;

    /// List the buyer's orders, optionally filtered by status.
    async fn buyer_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, ApiError>;

    /// Fetch one of the buyer's orders.
    async fn buyer_order(&self, id: OrderId) -> Result<Order, ApiError>;

    /// Cancel a pending order.
    async fn cancel(&self, id: OrderId) -> Result<Order, ApiError>;

    /// The buyer's past orders.
    async fn order_history(&self) -> Result<Vec<Order>, ApiError>;

    /// The buyer's pending orders.
    async fn pending_orders(&self) -> Result<Vec<Order>, ApiError>;

    /// The buyer's dashboard statistics.
    async fn buyer_stats(&self) -> Result<BuyerStats, ApiError>;

    /// List orders received by the farmer, optionally filtered by status.
    async fn farmer_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, ApiError>;

    /// Fetch one of the farmer's received orders.
    async fn farmer_order(&self, id: OrderId) -> Result<Order, ApiError>;

    /// Confirm a pending order.
    async fn confirm(&self, id: OrderId) -> Result<Order, ApiError>;

    /// Reject a pending order.
    async fn reject(&self, id: OrderId) -> Result<Order, ApiError>;

    /// Complete a confirmed order.
    async fn complete(&self, id: OrderId) -> Result<Order, ApiError>;

    /// The farmer's completed sales.
    async fn sales_history(&self) -> Result<Vec<Order>, ApiError>;

    /// The farmer's dashboard statistics.
    async fn farmer_stats(&self) -> Result<FarmerStats, ApiError>;
}
