//! Metriks Core - Catalog and cart domain library.
//!
//! This crate provides the types and pure logic shared by the Metriks
//! catalog widget:
//! - `storefront` - Catalog loader, rendering, DOM binding and persistence
//! - `cli` - Command-line driver for the widget
//!
//! # Architecture
//!
//! The core crate contains only types and pure transformations - no I/O, no
//! storage access, no HTTP clients. Everything here operates on small
//! in-memory lists and can be tested without a browser or a network.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, products, categories and contact details
//! - [`query`] - Category/search filtering and sort orders
//! - [`cart`] - Cart mutations, totals and the minimum-order rule

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod query;
pub mod types;

pub use cart::{
    Adjustment, Cart, CartItem, CartSummary, MIN_ORDER_QUANTITY, SubmitState, parse_quantity_input,
};
pub use query::{CategoryFilter, FilterState, SortOrder, SortedProducts};
pub use types::*;
