//! QuickBasket Core - Shared domain library.
//!
//! This crate provides the domain types and cart model shared by the
//! QuickBasket components:
//! - `storefront` - Server-rendered storefront site
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. Everything here is deterministic given its arguments,
//! which keeps the cart arithmetic callable from any handler without
//! adaptation and trivially testable.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices
//! - [`catalog`] - Product, cart entry, and line item types
//! - [`cart`] - Cart/catalog merging, totals, and quantity resolution
//! - [`credentials`] - Local validation of login and registration input

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod credentials;
pub mod types;

pub use types::*;
