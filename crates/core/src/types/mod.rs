//! Core types for Sipayi.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod phone;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{ItemId, OrderId, RequestId};
pub use money::{Money, MoneyError};
pub use phone::{Phone, PhoneError};
pub use status::OrderStatus;
