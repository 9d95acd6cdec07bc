//! Orders: snapshots of the cart plus checkout details.
//!
//! An order is created once from a non-empty cart and is immutable
//! afterwards except for its status; cart mutations never reach an
//! already-created order. Submission validates, simulates the network
//! hop, and appends to the persisted history — the only append-only
//! collection in the system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sipayi_core::{Money, OrderId, OrderStatus, RequestId};

use crate::cart::CartItem;
use crate::error::SessionError;
use crate::notify::Notifier;
use crate::state::Session;
use crate::storage::{KeyValueStore, read_json_or_default, write_json};
use crate::validate::{validate_email, validate_phone};

/// Minimum customer name length accepted at checkout.
const MIN_NAME_LENGTH: usize = 2;
/// Minimum delivery address length accepted at checkout.
const MIN_ADDRESS_LENGTH: usize = 10;

/// A snapshot copy of one cart line at order-creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    /// Menu item name.
    pub name: String,
    /// Unit price at the time the order was created.
    pub price: Money,
    /// Units ordered.
    pub quantity: u32,
    /// `price * quantity`, frozen into the snapshot.
    pub total: Money,
}

impl From<&CartItem> for OrderLineItem {
    fn from(item: &CartItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
            total: item.line_total(),
        }
    }
}

/// Customer contact details from the checkout form.
///
/// Held as raw form input; [`OrderService::validate`] is the gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    /// Customer name.
    pub name: String,
    /// Contact email, validated against [`sipayi_core::Email`] rules.
    pub email: String,
    /// Contact phone, validated against [`sipayi_core::Phone`] rules.
    pub phone: String,
}

/// Delivery details from the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    /// Street address; must be at least 10 characters to pass
    /// validation.
    pub address: String,
    /// Free-text instructions for the delivery person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cash,
    /// Card on delivery.
    Card,
    /// UPI transfer.
    Upi,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cash => write!(f, "cash"),
            Self::Card => write!(f, "card"),
            Self::Upi => write!(f, "upi"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "upi" => Ok(Self::Upi),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

/// Payment details from the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Chosen payment method; `None` until the shopper picks one.
    pub method: Option<PaymentMethod>,
}

/// An order: cart snapshot plus checkout details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Opaque generated order id.
    pub order_id: OrderId,
    /// Client-generated idempotency key for submission.
    pub request_id: RequestId,
    /// Snapshot line items.
    pub items: Vec<OrderLineItem>,
    /// Customer contact details.
    pub customer: CustomerDetails,
    /// Delivery details.
    pub delivery: DeliveryDetails,
    /// Payment details.
    pub payment: PaymentDetails,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Creation time, persisted as an ISO-8601 string.
    pub timestamp: DateTime<Utc>,
}

/// Derived totals for an order. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    /// Sum of line-item totals.
    pub subtotal: Money,
    /// Flat delivery fee.
    pub delivery_fee: Money,
    /// Tax on the subtotal, rounded half-up to whole rupees.
    pub tax: Money,
    /// `subtotal + delivery_fee + tax`; not separately rounded.
    pub total: Money,
}

/// Accumulated validation outcome for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderValidation {
    /// True iff no errors were found.
    pub valid: bool,
    /// Every applicable field error, in form order.
    pub errors: Vec<String>,
}

/// Uniform result of an order submission.
///
/// Nothing propagates past the submission boundary; storage and
/// validation failures alike land here as `success: false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResult {
    /// Whether the order was persisted.
    pub success: bool,
    /// The order id, on success.
    pub order_id: Option<OrderId>,
    /// User-facing message.
    pub message: String,
}

/// One row of the static tracking timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderStage {
    /// The stage's status value.
    pub status: OrderStatus,
    /// Display label.
    pub label: &'static str,
    /// Illustrative elapsed-minutes marker.
    pub minutes: u32,
}

/// Tracking view for one order: its actual status plus the static
/// five-stage reference timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTracking {
    /// The tracked order's id.
    pub order_id: OrderId,
    /// The order's stored status.
    pub current_status: OrderStatus,
    /// The full reference timeline, always all five stages.
    pub stages: Vec<OrderStage>,
}

/// Render a rupee amount the way the order pages do: symbol plus whole
/// number, no decimals, no separators.
#[must_use]
pub fn format_currency(amount: Money) -> String {
    amount.display()
}

/// Builds, validates, submits, and reads back orders.
pub struct OrderService<S, N> {
    session: Session<S, N>,
}

impl<S: KeyValueStore, N: Notifier> OrderService<S, N> {
    pub(crate) fn new(session: Session<S, N>) -> Self {
        Self { session }
    }

    fn key(&self) -> &str {
        &self.session.config().orders_key
    }

    /// Create a new pending order from the current cart.
    ///
    /// Customer, delivery, and payment details start empty; the
    /// checkout forms fill them in before submission.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyCart`] (after telling the UI) if
    /// the cart has no items, or [`SessionError::Storage`] if the cart
    /// cannot be read.
    pub fn create_from_cart(&self) -> Result<Order, SessionError> {
        let items = self.session.cart().items()?;
        if items.is_empty() {
            self.session.notifier().notify("Your cart is empty!");
            return Err(SessionError::EmptyCart);
        }

        Ok(Order {
            order_id: OrderId::generate(),
            request_id: RequestId::new(),
            items: items.iter().map(OrderLineItem::from).collect(),
            customer: CustomerDetails::default(),
            delivery: DeliveryDetails::default(),
            payment: PaymentDetails::default(),
            status: OrderStatus::Pending,
            timestamp: Utc::now(),
        })
    }

    /// Compute the order's totals.
    ///
    /// Only the tax is rounded (half-up, to whole rupees); subtotal and
    /// total keep whatever precision the prices carry.
    #[must_use]
    pub fn summary(&self, order: &Order) -> OrderSummary {
        let config = self.session.config();
        let subtotal: Money = order.items.iter().map(|item| item.total).sum();
        // Config fees/rates are non-negative, so these cannot fail
        let delivery_fee = Money::new(config.delivery_fee).unwrap_or(Money::ZERO);
        let tax = Money::new(
            (subtotal.amount() * config.tax_rate).round_dp_with_strategy(
                0,
                rust_decimal::RoundingStrategy::MidpointAwayFromZero,
            ),
        )
        .unwrap_or(Money::ZERO);

        OrderSummary {
            subtotal,
            delivery_fee,
            tax,
            total: subtotal + delivery_fee + tax,
        }
    }

    /// Check the order against customer/delivery/payment constraints.
    ///
    /// Accumulates every applicable error rather than failing fast, so
    /// the form can highlight all problems at once.
    #[must_use]
    pub fn validate(&self, order: &Order) -> OrderValidation {
        let mut errors = Vec::new();

        if order.customer.name.trim().chars().count() < MIN_NAME_LENGTH {
            errors.push("Name must be at least 2 characters".to_owned());
        }
        if !validate_email(&order.customer.email) {
            errors.push("Valid email is required".to_owned());
        }
        if !validate_phone(&order.customer.phone) {
            errors.push("Valid phone number is required".to_owned());
        }
        if order.delivery.address.trim().chars().count() < MIN_ADDRESS_LENGTH {
            errors.push("Delivery address is required".to_owned());
        }
        if order.payment.method.is_none() {
            errors.push("Payment method is required".to_owned());
        }

        OrderValidation {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Submit the order.
    ///
    /// Validates first; a failing order is reported with the joined
    /// field errors and persists nothing. A passing order waits out the
    /// simulated network latency, then — atomically under the store
    /// lock — appends to the order history and clears the cart. A
    /// resubmission carrying an already-persisted `request_id` is
    /// answered with the existing order instead of a duplicate.
    pub async fn submit(&self, order: &Order) -> SubmitResult {
        let validation = self.validate(order);
        if !validation.valid {
            return SubmitResult {
                success: false,
                order_id: None,
                message: validation.errors.join(", "),
            };
        }

        tokio::time::sleep(self.session.config().submit_latency).await;

        match self.persist(order) {
            Ok(order_id) => {
                self.session.notifier().refresh_count(0);
                SubmitResult {
                    success: true,
                    order_id: Some(order_id),
                    message: "Order placed successfully!".to_owned(),
                }
            }
            Err(err) => {
                tracing::error!(error = %err, order_id = %order.order_id, "order submission failed");
                SubmitResult {
                    success: false,
                    order_id: None,
                    message: "Failed to place order. Please try again.".to_owned(),
                }
            }
        }
    }

    /// Append the order and clear the cart under one lock acquisition.
    fn persist(&self, order: &Order) -> Result<OrderId, SessionError> {
        let config = self.session.config();
        let mut store = self.session.store();
        let mut orders: Vec<Order> = read_json_or_default(&*store, self.key())?;

        if let Some(existing) = orders
            .iter()
            .find(|existing| existing.request_id == order.request_id)
        {
            tracing::info!(
                order_id = %existing.order_id,
                request_id = %order.request_id,
                "duplicate submission answered with existing order"
            );
            return Ok(existing.order_id.clone());
        }

        orders.push(order.clone());
        write_json(&mut *store, self.key(), &orders)?;
        store.remove(&config.cart_key)?;

        Ok(order.order_id.clone())
    }

    /// The full persisted order history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] only if the backing store
    /// fails; absent or corrupt history reads as empty.
    pub fn all(&self) -> Result<Vec<Order>, SessionError> {
        let store = self.session.store();
        Ok(read_json_or_default(&*store, self.key())?)
    }

    /// Look up one order by id. Linear scan of the history.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the history cannot be read.
    pub fn by_id(&self, order_id: &OrderId) -> Result<Option<Order>, SessionError> {
        Ok(self
            .all()?
            .into_iter()
            .find(|order| &order.order_id == order_id))
    }

    /// Tracking view for one order, or `None` if the id is unknown.
    ///
    /// The stage list is static reference data from
    /// [`OrderStatus::ALL`], not a live feed; only `current_status`
    /// reflects the stored order.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the history cannot be read.
    pub fn track(&self, order_id: &OrderId) -> Result<Option<OrderTracking>, SessionError> {
        Ok(self.by_id(order_id)?.map(|order| OrderTracking {
            order_id: order.order_id,
            current_status: order.status,
            stages: OrderStatus::ALL
                .iter()
                .map(|status| OrderStage {
                    status: *status,
                    label: status.label(),
                    minutes: status.elapsed_minutes(),
                })
                .collect(),
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::notify::RecordingNotifier;
    use crate::storage::MemoryStore;

    fn session() -> Session<MemoryStore, RecordingNotifier> {
        Session::new(
            MemoryStore::new(),
            RecordingNotifier::new(),
            SessionConfig::default(),
        )
    }

    fn rupees(n: i64) -> Money {
        Money::from_rupees(n).unwrap()
    }

    fn filled(order: &mut Order) {
        order.customer = CustomerDetails {
            name: "Asha Rao".to_owned(),
            email: "asha@example.com".to_owned(),
            phone: "9876543210".to_owned(),
        };
        order.delivery = DeliveryDetails {
            address: "12 MG Road, Bengaluru".to_owned(),
            instructions: None,
        };
        order.payment = PaymentDetails {
            method: Some(PaymentMethod::Upi),
        };
    }

    #[test]
    fn test_create_from_empty_cart_fails() {
        let session = session();
        let err = session.orders().create_from_cart().unwrap_err();
        assert!(matches!(err, SessionError::EmptyCart));
        assert_eq!(session.notifier().messages(), vec!["Your cart is empty!"]);
    }

    #[test]
    fn test_create_snapshots_the_cart() {
        let session = session();
        let cart = session.cart();
        cart.add("Thali", rupees(120)).unwrap();
        cart.add("Thali", rupees(120)).unwrap();

        let order = session.orders().create_from_cart().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.items[0].total, rupees(240));
        assert!(order.payment.method.is_none());

        // later cart mutations do not reach the snapshot
        cart.add("Tea", rupees(20)).unwrap();
        assert_eq!(order.items.len(), 1);
    }

    #[test]
    fn test_summary_reference_values() {
        let session = session();
        session.cart().add("Feast", rupees(500)).unwrap();
        let service = session.orders();
        let order = service.create_from_cart().unwrap();

        let summary = service.summary(&order);
        assert_eq!(summary.subtotal, rupees(500));
        assert_eq!(summary.delivery_fee, rupees(40));
        assert_eq!(summary.tax, rupees(25));
        assert_eq!(summary.total, rupees(565));
    }

    #[test]
    fn test_summary_tax_rounds_half_up() {
        let session = session();
        // subtotal 250 -> raw tax 12.5 -> rounds to 13
        session.cart().add("Biryani", rupees(250)).unwrap();
        let service = session.orders();
        let order = service.create_from_cart().unwrap();

        let summary = service.summary(&order);
        assert_eq!(summary.tax, rupees(13));
        assert_eq!(summary.total, rupees(303));
    }

    #[test]
    fn test_validate_accumulates_all_errors() {
        let session = session();
        session.cart().add("Tea", rupees(20)).unwrap();
        let service = session.orders();
        let order = service.create_from_cart().unwrap();

        let validation = service.validate(&order);
        assert!(!validation.valid);
        assert_eq!(
            validation.errors,
            vec![
                "Name must be at least 2 characters",
                "Valid email is required",
                "Valid phone number is required",
                "Delivery address is required",
                "Payment method is required",
            ]
        );
    }

    #[test]
    fn test_validate_passes_with_complete_details() {
        let session = session();
        session.cart().add("Tea", rupees(20)).unwrap();
        let service = session.orders();
        let mut order = service.create_from_cart().unwrap();
        filled(&mut order);

        let validation = service.validate(&order);
        assert!(validation.valid);
        assert!(validation.errors.is_empty());
    }

    #[test]
    fn test_validate_flags_short_address() {
        let session = session();
        session.cart().add("Tea", rupees(20)).unwrap();
        let service = session.orders();
        let mut order = service.create_from_cart().unwrap();
        filled(&mut order);
        order.delivery.address = "short".to_owned();

        let validation = service.validate(&order);
        assert_eq!(validation.errors, vec!["Delivery address is required"]);
    }

    #[test]
    fn test_track_unknown_order_is_none() {
        let session = session();
        let tracking = session.orders().track(&OrderId::from("HS0")).unwrap();
        assert!(tracking.is_none());
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(rupees(565)), "₹565");
    }

    #[test]
    fn test_payment_method_roundtrip() {
        for method in [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Upi] {
            let parsed: PaymentMethod = method.to_string().parse().unwrap();
            assert_eq!(parsed, method);
        }
        assert!("cheque".parse::<PaymentMethod>().is_err());
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Upi).unwrap(),
            "\"upi\""
        );
    }

    #[test]
    fn test_order_serde_roundtrip() {
        let session = session();
        session.cart().add("Tea", rupees(20)).unwrap();
        let mut order = session.orders().create_from_cart().unwrap();
        filled(&mut order);

        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }
}
