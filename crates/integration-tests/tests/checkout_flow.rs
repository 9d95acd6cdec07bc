//! End-to-end checkout flows: cart to submitted order.

use sipayi_core::Money;
use sipayi_integration_tests::test_session;
use sipayi_session::{CustomerDetails, DeliveryDetails, Order, PaymentDetails, PaymentMethod};

fn rupees(n: i64) -> Money {
    Money::from_rupees(n).expect("non-negative")
}

fn fill_checkout_details(order: &mut Order) {
    order.customer = CustomerDetails {
        name: "Asha Rao".to_owned(),
        email: "asha@example.com".to_owned(),
        phone: "+91 98765 43210".to_owned(),
    };
    order.delivery = DeliveryDetails {
        address: "12 MG Road, Bengaluru 560001".to_owned(),
        instructions: Some("Ring the bell twice".to_owned()),
    };
    order.payment = PaymentDetails {
        method: Some(PaymentMethod::Cash),
    };
}

// =============================================================================
// Happy Path
// =============================================================================

#[tokio::test]
async fn test_submit_appends_history_and_clears_cart() {
    let session = test_session();
    let cart = session.cart();
    cart.add("Masala Dosa", rupees(80)).expect("add");
    cart.add("Filter Coffee", rupees(30)).expect("add");
    cart.add("Masala Dosa", rupees(80)).expect("add");

    let service = session.orders();
    let mut order = service.create_from_cart().expect("non-empty cart");
    fill_checkout_details(&mut order);

    let result = service.submit(&order).await;
    assert!(result.success);
    assert_eq!(result.order_id.as_ref(), Some(&order.order_id));
    assert_eq!(result.message, "Order placed successfully!");

    // history has exactly this order
    let history = service.all().expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].order_id, order.order_id);
    assert_eq!(history[0].items.len(), 2);

    // the cart is gone
    assert!(cart.items().expect("cart").is_empty());
    assert_eq!(session.notifier().counts().last(), Some(&0));

    // and the order is findable and trackable
    let found = service.by_id(&order.order_id).expect("read");
    assert!(found.is_some());
    let tracking = service
        .track(&order.order_id)
        .expect("read")
        .expect("known id");
    assert_eq!(tracking.stages.len(), 5);
}

#[tokio::test]
async fn test_orders_accumulate_across_submissions() {
    let session = test_session();
    let service = session.orders();

    for _ in 0..3 {
        session.cart().add("Thali", rupees(120)).expect("add");
        let mut order = service.create_from_cart().expect("non-empty cart");
        fill_checkout_details(&mut order);
        assert!(service.submit(&order).await.success);
    }

    assert_eq!(service.all().expect("history").len(), 3);
}

// =============================================================================
// Failure Paths
// =============================================================================

#[tokio::test]
async fn test_failed_validation_mutates_nothing() {
    let session = test_session();
    session.cart().add("Thali", rupees(120)).expect("add");

    let service = session.orders();
    let order = service.create_from_cart().expect("non-empty cart");
    // no checkout details filled in

    let result = service.submit(&order).await;
    assert!(!result.success);
    assert!(result.order_id.is_none());
    assert!(result.message.contains("Name must be at least 2 characters"));
    assert!(result.message.contains("Payment method is required"));

    // nothing was persisted, the cart is untouched
    assert!(service.all().expect("history").is_empty());
    assert_eq!(session.cart().items().expect("cart").len(), 1);
}

#[tokio::test]
async fn test_double_submit_creates_one_order() {
    let session = test_session();
    session.cart().add("Biryani", rupees(250)).expect("add");

    let service = session.orders();
    let mut order = service.create_from_cart().expect("non-empty cart");
    fill_checkout_details(&mut order);

    // a double-click submits the same order (same request id) twice
    let first = service.submit(&order).await;
    let second = service.submit(&order).await;

    assert!(first.success);
    assert!(second.success);
    assert_eq!(first.order_id, second.order_id);
    assert_eq!(service.all().expect("history").len(), 1);
}

#[tokio::test]
async fn test_submitted_order_is_immune_to_cart_changes() {
    let session = test_session();
    session.cart().add("Tea", rupees(20)).expect("add");

    let service = session.orders();
    let mut order = service.create_from_cart().expect("non-empty cart");
    fill_checkout_details(&mut order);
    assert!(service.submit(&order).await.success);

    // new cart activity after submission
    session.cart().add("Vada", rupees(25)).expect("add");
    session.cart().add("Vada", rupees(25)).expect("add");

    let history = service.all().expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].items.len(), 1);
    assert_eq!(history[0].items[0].name, "Tea");
}
