//! Order transition workflow.
//!
//! Drives one status transition end to end: legality check, a per-order
//! in-flight guard so duplicate mutations are never issued concurrently,
//! exactly one mutating call, then a re-fetch of the server-authoritative
//! order. Status is never mutated optimistically; on failure the caller's
//! view of the order is unchanged.

use std::sync::{Arc, Mutex, PoisonError};

use haat::{
    ids::OrderId,
    order::{InvalidTransitionError, OrderAction, Role, check_transition},
};
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    errors::ApiError,
    orders::{models::Order, service::OrdersService},
};

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The action is not legal for the order's status and the actor's role.
    #[error(transparent)]
    NotAllowed(#[from] InvalidTransitionError),

    /// A mutating call for this order is already in flight.
    #[error("order {0} already has an action in progress")]
    Busy(OrderId),

    /// The server refused or the request failed; the order keeps its prior
    /// status.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Orchestrates order status transitions for both roles.
pub struct OrderWorkflow {
    service: Arc<dyn OrdersService>,
    in_flight: Mutex<FxHashSet<OrderId>>,
}

impl OrderWorkflow {
    #[must_use]
    pub fn new(service: Arc<dyn OrdersService>) -> Self {
        Self {
            service,
            in_flight: Mutex::new(FxHashSet::default()),
        }
    }

    /// Invoke `action` on `order` as `role`.
    ///
    /// Interactive confirmation is the caller's responsibility; this method
    /// assumes consent was already given.
    ///
    /// # Errors
    ///
    /// - [`WorkflowError::NotAllowed`]: the action is not in the order's
    ///   available action set for this role.
    /// - [`WorkflowError::Busy`]: another action for this order has not
    ///   settled yet.
    /// - [`WorkflowError::Api`]: the mutating call or the re-fetch failed.
    pub async fn invoke(
        &self,
        order: &Order,
        role: Role,
        action: OrderAction,
    ) -> Result<Order, WorkflowError> {
        check_transition(order.status, action, role)?;

        let _guard = self.acquire(order.id)?;

        info!(order = %order.id, %role, %action, "submitting order action");

        let result = match action {
            OrderAction::Confirm => self.service.confirm(order.id).await,
            OrderAction::Reject => self.service.reject(order.id).await,
            OrderAction::Cancel => self.service.cancel(order.id).await,
            OrderAction::Complete => self.service.complete(order.id).await,
        };

        if let Err(error) = result {
            warn!(order = %order.id, %action, %error, "order action failed");
            return Err(error.into());
        }

        // The server already returned the mutated order, but stock and
        // ownership checks happen server-side; a fresh read is the only
        // state the client trusts.
        let refreshed = match role {
            Role::Buyer => self.service.buyer_order(order.id).await?,
            Role::Farmer => self.service.farmer_order(order.id).await?,
        };

        info!(order = %refreshed.id, status = %refreshed.status, "order action applied");

        Ok(refreshed)
    }

    fn acquire(&self, id: OrderId) -> Result<InFlightGuard<'_>, WorkflowError> {
        let mut in_flight = lock(&self.in_flight);

        if !in_flight.insert(id) {
            return Err(WorkflowError::Busy(id));
        }

        Ok(InFlightGuard { set: &self.in_flight, id })
    }

    #[cfg(test)]
    fn mark_in_flight(&self, id: OrderId) {
        lock(&self.in_flight).insert(id);
    }

    #[cfg(test)]
    fn is_in_flight(&self, id: OrderId) -> bool {
        lock(&self.in_flight).contains(&id)
    }
}

fn lock(set: &Mutex<FxHashSet<OrderId>>) -> std::sync::MutexGuard<'_, FxHashSet<OrderId>> {
    set.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Releases the order's in-flight slot when the call settles, error paths
/// included.
struct InFlightGuard<'a> {
    set: &'a Mutex<FxHashSet<OrderId>>,
    id: OrderId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        lock(self.set).remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use haat::{
        ids::{BuyerId, FarmerId},
        order::OrderStatus,
    };
    use reqwest::StatusCode;
    use rust_decimal::dec;
    use testresult::TestResult;

    use crate::orders::service::MockOrdersService;

    use super::*;

    fn order(id: i64, status: OrderStatus) -> Order {
        Order {
            id: OrderId::from_raw(id),
            buyer_id: BuyerId::from_raw(1),
            buyer_name: Some("Asha".to_string()),
            buyer_phone: None,
            buyer_address: None,
            farmer_id: FarmerId::from_raw(2),
            farmer_name: Some("Green Acres".to_string()),
            status,
            total_amount: dec!(120.00),
            items: Vec::new(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn confirm_mutates_then_refetches() -> TestResult {
        let mut service = MockOrdersService::new();
        let id = OrderId::from_raw(7);

        service
            .expect_confirm()
            .once()
            .withf(move |order_id| *order_id == id)
            .return_once(move |_| Ok(order(7, OrderStatus::Confirmed)));

        service
            .expect_farmer_order()
            .once()
            .withf(move |order_id| *order_id == id)
            .return_once(move |_| Ok(order(7, OrderStatus::Confirmed)));

        let workflow = OrderWorkflow::new(Arc::new(service));

        let refreshed = workflow
            .invoke(
                &order(7, OrderStatus::Pending),
                Role::Farmer,
                OrderAction::Confirm,
            )
            .await?;

        assert_eq!(refreshed.status, OrderStatus::Confirmed);
        assert!(
            !workflow.is_in_flight(id),
            "the in-flight slot must be released after settling"
        );

        Ok(())
    }

    #[tokio::test]
    async fn buyer_cancel_refetches_through_buyer_endpoint() -> TestResult {
        let mut service = MockOrdersService::new();

        service
            .expect_cancel()
            .once()
            .return_once(|_| Ok(order(3, OrderStatus::Cancelled)));

        service
            .expect_buyer_order()
            .once()
            .return_once(|_| Ok(order(3, OrderStatus::Cancelled)));

        service.expect_farmer_order().never();

        let workflow = OrderWorkflow::new(Arc::new(service));

        let refreshed = workflow
            .invoke(
                &order(3, OrderStatus::Pending),
                Role::Buyer,
                OrderAction::Cancel,
            )
            .await?;

        assert_eq!(refreshed.status, OrderStatus::Cancelled);

        Ok(())
    }

    #[tokio::test]
    async fn illegal_action_never_reaches_the_server() {
        let mut service = MockOrdersService::new();

        service.expect_cancel().never();
        service.expect_buyer_order().never();

        let workflow = OrderWorkflow::new(Arc::new(service));

        let result = workflow
            .invoke(
                &order(5, OrderStatus::Confirmed),
                Role::Buyer,
                OrderAction::Cancel,
            )
            .await;

        assert!(
            matches!(result, Err(WorkflowError::NotAllowed(_))),
            "expected NotAllowed, got {result:?}"
        );
    }

    #[tokio::test]
    async fn server_refusal_skips_the_refetch() {
        let mut service = MockOrdersService::new();

        service.expect_confirm().once().return_once(|_| {
            Err(ApiError::from_status(
                StatusCode::CONFLICT,
                "order is no longer pending".to_string(),
            ))
        });

        service.expect_farmer_order().never();

        let workflow = OrderWorkflow::new(Arc::new(service));

        let result = workflow
            .invoke(
                &order(9, OrderStatus::Pending),
                Role::Farmer,
                OrderAction::Confirm,
            )
            .await;

        assert!(
            matches!(result, Err(WorkflowError::Api(ApiError::InvalidTransition(_)))),
            "expected InvalidTransition, got {result:?}"
        );
        assert!(
            !workflow.is_in_flight(OrderId::from_raw(9)),
            "the in-flight slot must be released on failure"
        );
    }

    #[tokio::test]
    async fn second_invocation_while_in_flight_is_rejected() {
        let mut service = MockOrdersService::new();

        service.expect_confirm().never();

        let workflow = OrderWorkflow::new(Arc::new(service));
        workflow.mark_in_flight(OrderId::from_raw(4));

        let result = workflow
            .invoke(
                &order(4, OrderStatus::Pending),
                Role::Farmer,
                OrderAction::Confirm,
            )
            .await;

        assert!(
            matches!(result, Err(WorkflowError::Busy(_))),
            "expected Busy, got {result:?}"
        );
    }
}
