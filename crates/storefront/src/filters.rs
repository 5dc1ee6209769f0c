//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Formats a quantity with the unit suffix.
///
/// Usage in templates: `{{ item.quantity|pieces }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn pieces(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("{value} pcs"))
}
