//! Order status enum and its static tracking timeline.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// Progression is linear: pending → confirmed → preparing → ready →
/// delivered. The tracking page also shows the full timeline as static
/// reference data; see [`OrderStatus::ALL`], [`OrderStatus::label`],
/// and [`OrderStatus::elapsed_minutes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order received, nothing confirmed yet.
    #[default]
    Pending,
    /// Kitchen has accepted the order.
    Confirmed,
    /// Food is being prepared.
    Preparing,
    /// Ready for pickup or handoff to delivery.
    Ready,
    /// Order delivered to the customer.
    Delivered,
}

impl OrderStatus {
    /// All statuses in progression order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::Ready,
        Self::Delivered,
    ];

    /// Human-readable stage label shown on the tracking page.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Order Received",
            Self::Confirmed => "Order Confirmed",
            Self::Preparing => "Preparing Food",
            Self::Ready => "Ready for Pickup",
            Self::Delivered => "Delivered",
        }
    }

    /// Illustrative elapsed-minutes marker for each stage.
    ///
    /// These are static reference values, not measurements.
    #[must_use]
    pub const fn elapsed_minutes(&self) -> u32 {
        match self {
            Self::Pending => 0,
            Self::Confirmed => 2,
            Self::Preparing => 15,
            Self::Ready => 30,
            Self::Delivered => 45,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Preparing => write!(f, "preparing"),
            Self::Ready => write!(f, "ready"),
            Self::Delivered => write!(f, "delivered"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "preparing" => Ok(Self::Preparing),
            "ready" => Ok(Self::Ready),
            "delivered" => Ok(Self::Delivered),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}
