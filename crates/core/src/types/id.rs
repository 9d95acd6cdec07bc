//! Identifier types for orders and cart lines.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An opaque order identifier.
///
/// Generated ids keep the historical shape `HS<unix-millis><random>`
/// where the suffix is a 0-999 random number. The id is treated as an
/// opaque string everywhere outside generation; collisions are unlikely
/// but not impossible, which is acceptable for a per-browser order
/// history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Prefix carried by every generated order id.
    pub const PREFIX: &'static str = "HS";

    /// Generate a fresh order id from the current wall clock.
    #[must_use]
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix = rand::rng().random_range(0..1000);
        Self(format!("{}{millis}{suffix}", Self::PREFIX))
    }

    /// Wrap an existing id string.
    #[must_use]
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Creation-timestamp id for a cart line.
///
/// Unix milliseconds at the moment the line was first added. Not
/// guaranteed unique across concurrent adds; the cart's real key is the
/// item name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    /// Create an id from the current wall clock.
    #[must_use]
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    /// Create an id from raw unix milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// The underlying unix-millisecond value.
    #[must_use]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-generated idempotency key for order submission.
///
/// A submission retried with the same `RequestId` (double-click,
/// flaky-network retry) must not create a second order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generate a fresh random request id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_shape() {
        let id = OrderId::generate();
        assert!(id.as_str().starts_with(OrderId::PREFIX));
        // Prefix + millis + suffix is all digits after "HS"
        assert!(
            id.as_str()[OrderId::PREFIX.len()..]
                .chars()
                .all(|c| c.is_ascii_digit())
        );
    }

    #[test]
    fn test_order_id_serde_transparent() {
        let id = OrderId::from("HS1700000000000123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"HS1700000000000123\"");
    }

    #[test]
    fn test_item_id_millis() {
        let id = ItemId::from_millis(1_700_000_000_000);
        assert_eq!(id.as_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_request_ids_are_distinct() {
        assert_ne!(RequestId::new(), RequestId::new());
    }
}
