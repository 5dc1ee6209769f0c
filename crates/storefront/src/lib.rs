//! Metriks catalog widget.
//!
//! Loads the catalog page, renders the filterable product grid and keeps the
//! client-local cart with its minimum-order rule. The page is reached only
//! through the [`dom::Dom`] trait and local persistence only through
//! [`storage::Storage`], so the same [`widget::Widget`] drives a browser
//! binding, the CLI and the tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart_store;
pub mod catalog;
pub mod config;
pub mod dom;
pub mod error;
pub mod filters;
pub mod navigation;
pub mod order;
pub mod render;
pub mod session;
pub mod storage;
pub mod widget;

pub use error::{AppError, Result};
