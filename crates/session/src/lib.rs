//! Sipayi Session - cart, order, and input-validation engine.
//!
//! This crate holds the non-DOM logic of the Sipayi ordering site: a
//! shopping cart and order history kept in a pluggable key-value store,
//! derived totals, form validation, and a handful of defensive input
//! helpers. Page rendering and navigation live elsewhere and call into
//! this crate through [`state::Session`] and the [`notify::Notifier`]
//! seam.
//!
//! # Modules
//!
//! - [`state`] - The [`state::Session`] handle tying everything together
//! - [`cart`] - Cart line items and the [`cart::CartStore`] mutators
//! - [`order`] - Order snapshots, validation, and submission
//! - [`storage`] - The key-value boundary and the obfuscating wrapper
//! - [`validate`] - Pure form-field predicates
//! - [`security`] - Sanitization, XSS detection, rate limiting, tokens
//! - [`notify`] - Fire-and-forget UI notification seam
//! - [`config`] - Storage keys, fees, and latency knobs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod notify;
pub mod order;
pub mod security;
pub mod state;
pub mod storage;
pub mod validate;

pub use cart::{CartItem, CartStore};
pub use config::{ConfigError, SessionConfig};
pub use error::SessionError;
pub use notify::{Notifier, NullNotifier, RecordingNotifier, TracingNotifier};
pub use order::{
    CustomerDetails, DeliveryDetails, Order, OrderLineItem, OrderService, OrderStage,
    OrderSummary, OrderTracking, OrderValidation, PaymentDetails, PaymentMethod, SubmitResult,
    format_currency,
};
pub use state::Session;
pub use storage::{KeyValueStore, MemoryStore, SecureStorage, StorageError};
