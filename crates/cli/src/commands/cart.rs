//! Cart commands over the file-backed local storage.
//!
//! # Usage
//!
//! ```bash
//! mx-cli cart add 101 "Bolt M8x40"
//! mx-cli cart plus 101
//! mx-cli cart set 101 120
//! mx-cli cart remove 101
//! mx-cli cart show
//! ```
//!
//! # Environment Variables
//!
//! - `METRIKS_CART_PATH` - File holding the stored cart

use metriks_core::{Adjustment, MIN_ORDER_QUANTITY, ProductId, SubmitState};
use metriks_storefront::config::WidgetConfig;
use metriks_storefront::dom::{Document, ids};
use metriks_storefront::storage::FileStorage;
use metriks_storefront::widget::{Action, Widget};

/// The cart page, backed by the configured storage file.
pub type CartPage = Widget<Document, FileStorage>;

/// Open the stored cart.
///
/// # Errors
///
/// Returns an error if the storage file is unreadable or a template fails.
pub fn open(config: &WidgetConfig) -> metriks_storefront::Result<CartPage> {
    let storage = FileStorage::open(&config.cart_path)?;
    tracing::debug!(path = %storage.path().display(), "Opened cart storage");
    Ok(Widget::new(Document::with_elements(ids::CART_PAGE.iter().copied()), storage)?)
}

fn warn_if_missing(page: &CartPage, id: &ProductId) {
    if page.cart().cart().get(id).is_none() {
        tracing::warn!(id = %id, "Product is not in the cart");
    }
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if a cart template fails to render.
pub fn add(page: &mut CartPage, id: &str, name: &str) -> metriks_storefront::Result<()> {
    page.dispatch(Action::AddToCart {
        id: ProductId::new(id),
        name: name.to_owned(),
    })?;
    tracing::info!(id, "Added to cart");
    Ok(())
}

/// Remove a product.
///
/// # Errors
///
/// Returns an error if a cart template fails to render.
pub fn remove(page: &mut CartPage, id: &str) -> metriks_storefront::Result<()> {
    let id = ProductId::new(id);
    warn_if_missing(page, &id);
    page.dispatch(Action::RemoveFromCart(id))?;
    Ok(())
}

/// Increase a quantity by one.
///
/// # Errors
///
/// Returns an error if a cart template fails to render.
pub fn plus(page: &mut CartPage, id: &str) -> metriks_storefront::Result<()> {
    adjust(page, id, Adjustment::Plus)
}

/// Decrease a quantity by one.
///
/// # Errors
///
/// Returns an error if a cart template fails to render.
pub fn minus(page: &mut CartPage, id: &str) -> metriks_storefront::Result<()> {
    adjust(page, id, Adjustment::Minus)
}

fn adjust(page: &mut CartPage, id: &str, adjustment: Adjustment) -> metriks_storefront::Result<()> {
    let id = ProductId::new(id);
    warn_if_missing(page, &id);
    page.dispatch(Action::Adjust { id, adjustment })?;
    Ok(())
}

/// Set a quantity from raw input text.
///
/// # Errors
///
/// Returns an error if a cart template fails to render.
pub fn set(page: &mut CartPage, id: &str, raw: &str) -> metriks_storefront::Result<()> {
    let id = ProductId::new(id);
    warn_if_missing(page, &id);
    page.dispatch(Action::SetQuantityInput {
        id,
        raw: raw.to_owned(),
    })?;
    Ok(())
}

/// Print the cart lines and totals.
#[allow(clippy::print_stdout)]
pub fn print(page: &CartPage) {
    let cart = page.cart().cart();
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }

    for item in cart.items() {
        println!("{:>6} pcs  {}  ({})", item.quantity, item.name, item.id);
    }

    let summary = cart.summary();
    println!();
    println!("Items: {}", summary.distinct_items);
    println!("Total: {} pcs", summary.total_quantity);
    match summary.submit_state() {
        SubmitState::Enabled => println!("Ready to submit"),
        SubmitState::Disabled => println!(
            "Minimum order is {MIN_ORDER_QUANTITY} pcs, {} more needed",
            summary.shortfall()
        ),
    }
}
