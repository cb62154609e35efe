//! Checkout driven through the orders service, the way the shop session
//! runs it: one `POST /buyer/orders` per farmer group, stopping at the
//! first failure.

use std::sync::Arc;

use haat::{
    cart::{Cart, ProductSummary},
    ids::{BuyerId, FarmerId, OrderId, ProductId},
    order::OrderStatus,
};
use haat_app::{
    errors::ApiError,
    orders::{CreateOrderRequest, MockOrdersService, Order, OrdersService},
};
use reqwest::StatusCode;
use rust_decimal::{Decimal, dec};
use testresult::TestResult;

fn product(id: i64, farmer: i64, name: &str, price: Decimal) -> ProductSummary {
    ProductSummary {
        id: ProductId::from_raw(id),
        name: name.to_string(),
        price,
        unit: "kg".to_string(),
        farmer_id: FarmerId::from_raw(farmer),
        farmer_name: format!("farmer-{farmer}"),
        qty_available: dec!(10),
    }
}

fn created_order(id: i64, request: &CreateOrderRequest) -> Order {
    Order {
        id: OrderId::from_raw(id),
        buyer_id: BuyerId::from_raw(1),
        buyer_name: None,
        buyer_phone: None,
        buyer_address: None,
        farmer_id: request.farmer_id,
        farmer_name: None,
        status: OrderStatus::Pending,
        total_amount: Decimal::ZERO,
        items: Vec::new(),
        created_at: None,
    }
}

async fn run_checkout(
    cart: &mut Cart,
    service: Arc<dyn OrdersService>,
) -> haat::checkout::CheckoutReport<Order, ApiError> {
    cart.checkout(|submission| {
        let service = Arc::clone(&service);
        async move {
            service
                .create_order(&CreateOrderRequest::from(submission))
                .await
        }
    })
    .await
}

#[tokio::test]
async fn server_failure_on_second_farmer_is_reported_and_recoverable() -> TestResult {
    let mut cart = Cart::new();

    cart.add_item(&product(10, 1, "product-x", dec!(10)), dec!(2));
    cart.add_item(&product(20, 2, "product-y", dec!(5)), dec!(1));

    let mut service = MockOrdersService::new();

    service
        .expect_create_order()
        .times(2)
        .returning(|request| {
            if request.farmer_id == FarmerId::from_raw(1) {
                Ok(created_order(100, request))
            } else {
                Err(ApiError::from_status(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "order storage unavailable".to_string(),
                ))
            }
        });

    let report = run_checkout(&mut cart, Arc::new(service)).await;

    assert_eq!(report.succeeded(), 1);

    let failure = report.failure.as_ref();
    assert!(
        matches!(
            failure,
            Some(failure)
                if failure.farmer_id == FarmerId::from_raw(2)
                    && matches!(failure.cause, ApiError::Server { .. })
        ),
        "expected a server failure for farmer 2, got {failure:?}"
    );

    // The failed group's line is still there to retry; the submitted one is
    // gone.
    assert_eq!(cart.len(), 1);
    assert!(cart.line(ProductId::from_raw(20)).is_some());
    assert_eq!(cart.total(), dec!(5.00));

    Ok(())
}

#[tokio::test]
async fn full_success_creates_one_order_per_farmer_and_empties_the_cart() -> TestResult {
    let mut cart = Cart::new();

    cart.add_item(&product(10, 1, "product-x", dec!(10)), dec!(2));
    cart.add_item(&product(20, 2, "product-y", dec!(5)), dec!(1));

    let mut service = MockOrdersService::new();
    let mut next_id = 100;

    service.expect_create_order().times(2).returning(move |request| {
        next_id += 1;
        Ok(created_order(next_id, request))
    });

    let report = run_checkout(&mut cart, Arc::new(service)).await;

    assert!(report.is_complete());
    assert_eq!(report.succeeded(), 2);
    assert!(cart.is_empty());

    assert_eq!(
        report
            .created
            .iter()
            .map(|order| order.farmer_id)
            .collect::<Vec<_>>(),
        vec![FarmerId::from_raw(1), FarmerId::from_raw(2)],
        "orders must be created in first-seen farmer order"
    );

    Ok(())
}
