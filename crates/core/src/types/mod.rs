//! Core types for the Metriks catalog.
//!
//! This module provides type-safe wrappers for the catalog domain.

pub mod contact;
pub mod id;
pub mod product;

pub use contact::{ContactDetails, ContactError, Email, Phone};
pub use id::*;
pub use product::{Catalog, Category, Product};
