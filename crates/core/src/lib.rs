//! Sipayi Core - Shared types library.
//!
//! This crate provides common types used across all Sipayi components:
//! - `session` - Cart, order, and input-validation engine
//! - `cli` - Command-line front end for local demos and manual testing
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! timers. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, phone numbers, money,
//!   order/line-item ids, and order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
