//! Render layer.
//!
//! Pure functions from widget state to markup. Every region is re-rendered
//! in full on each change; the catalog is small enough that diffing would
//! buy nothing.

use askama::Template;
use thiserror::Error;

use metriks_core::{
    Cart, CartItem, CartSummary, Category, CategoryFilter, MIN_ORDER_QUANTITY, Product, SubmitState,
};

use crate::filters;
use crate::navigation::product_path;

/// Image shown for products without one.
pub const FALLBACK_IMAGE: &str = "/static/images/bolts/bolt-silver.png";

/// A template failed to render.
#[derive(Debug, Error)]
#[error("Template error: {0}")]
pub struct RenderError(#[from] askama::Error);

/// One labelled attribute on a product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecView<'a> {
    pub label: &'static str,
    pub value: &'a str,
}

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub image: &'a str,
    pub detail_path: String,
    pub specs: Vec<SpecView<'a>>,
}

impl<'a> From<&'a Product> for ProductCardView<'a> {
    fn from(product: &'a Product) -> Self {
        let specs = [
            ("Brand", product.brand.as_deref()),
            ("SKU", product.sku.as_deref()),
            ("Standard", product.standard.as_deref()),
            ("Material", product.material.as_deref()),
            ("Application", product.application.as_deref()),
            ("Analogs", product.analogs.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|value| SpecView { label, value }))
        .collect();

        Self {
            id: product.id.as_str(),
            name: &product.name,
            description: product.description.as_deref().unwrap_or_default(),
            image: product.image.as_deref().unwrap_or(FALLBACK_IMAGE),
            detail_path: product_path(&product.id),
            specs,
        }
    }
}

/// Category button display data for templates.
#[derive(Debug, Clone)]
pub struct CategoryButtonView<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub selected: bool,
}

/// Product grid template.
#[derive(Template)]
#[template(path = "catalog/products.html")]
struct ProductsTemplate<'a> {
    cards: Vec<ProductCardView<'a>>,
}

/// Category bar template.
#[derive(Template)]
#[template(path = "catalog/categories.html")]
struct CategoriesTemplate<'a> {
    all_selected: bool,
    categories: Vec<CategoryButtonView<'a>>,
}

/// Cart list template.
#[derive(Template)]
#[template(path = "cart/items.html")]
struct CartItemsTemplate<'a> {
    items: &'a [CartItem],
}

/// Minimum order warning banner.
#[derive(Template)]
#[template(path = "cart/min_order_warning.html")]
struct MinOrderWarningTemplate {
    threshold: u32,
    total: u64,
}

/// Cart summary inside the request dialog.
#[derive(Template)]
#[template(path = "cart/modal_summary.html")]
struct ModalSummaryTemplate<'a> {
    items: &'a [CartItem],
    total: u64,
}

/// Render the product grid. An empty list renders the "not found"
/// placeholder instead of an empty grid.
///
/// # Errors
///
/// Returns `RenderError` if the template fails to render.
pub fn render_products(products: &[&Product]) -> Result<String, RenderError> {
    let cards = products.iter().map(|p| ProductCardView::from(*p)).collect();
    Ok(ProductsTemplate { cards }.render()?)
}

/// Render the category bar: "show all" plus one button per category.
///
/// # Errors
///
/// Returns `RenderError` if the template fails to render.
pub fn render_categories(
    categories: &[Category],
    selected: &CategoryFilter,
) -> Result<String, RenderError> {
    let categories = categories
        .iter()
        .map(|c| CategoryButtonView {
            id: c.id.as_str(),
            name: &c.name,
            selected: selected.is_selected(&c.id),
        })
        .collect();
    Ok(CategoriesTemplate {
        all_selected: selected.is_all(),
        categories,
    }
    .render()?)
}

/// Render the cart list with +/-, quantity input and remove controls.
///
/// # Errors
///
/// Returns `RenderError` if the template fails to render.
pub fn render_cart_items(cart: &Cart) -> Result<String, RenderError> {
    Ok(CartItemsTemplate {
        items: cart.items(),
    }
    .render()?)
}

/// Render the minimum order warning for a cart total.
///
/// # Errors
///
/// Returns `RenderError` if the template fails to render.
pub fn render_min_order_warning(summary: &CartSummary) -> Result<String, RenderError> {
    Ok(MinOrderWarningTemplate {
        threshold: MIN_ORDER_QUANTITY,
        total: summary.total_quantity,
    }
    .render()?)
}

/// Render the request dialog's cart summary.
///
/// # Errors
///
/// Returns `RenderError` if the template fails to render.
pub fn render_modal_summary(cart: &Cart) -> Result<String, RenderError> {
    Ok(ModalSummaryTemplate {
        items: cart.items(),
        total: cart.total_quantity(),
    }
    .render()?)
}

/// Label of the submit control.
#[must_use]
pub fn submit_label(state: SubmitState) -> String {
    match state {
        SubmitState::Enabled => "Submit request".to_string(),
        SubmitState::Disabled => format!("Minimum {MIN_ORDER_QUANTITY} pcs"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use metriks_core::ProductId;

    use super::*;

    fn bolt() -> Product {
        let mut product = Product::new("101", "Bolt <M8>", "bolts");
        product.brand = Some("Fischer".to_string());
        product.standard = Some("DIN 933".to_string());
        product
    }

    #[test]
    fn test_empty_products_render_placeholder() {
        let html = render_products(&[]).unwrap();
        assert!(html.contains("No products found"));
        assert!(!html.contains("product-card"));
    }

    #[test]
    fn test_product_card_contents() {
        let product = bolt();
        let html = render_products(&[&product]).unwrap();

        assert!(html.contains(r#"data-product-id="101""#));
        assert!(html.contains(r#"href="/product/101""#));
        assert!(html.contains("add-to-cart"));
        assert!(html.contains("Fischer"));
        assert!(html.contains("DIN 933"));
        assert!(!html.contains("Material"));
        assert!(html.contains(FALLBACK_IMAGE));
        assert!(!html.contains("No products found"));
    }

    #[test]
    fn test_product_names_are_escaped() {
        let product = bolt();
        let html = render_products(&[&product]).unwrap();
        assert!(!html.contains("Bolt <M8>"));
        assert!(html.contains("Bolt &#60;M8&#62;") || html.contains("Bolt &lt;M8&gt;"));
    }

    #[test]
    fn test_categories_mark_selection() {
        let categories = vec![Category::new("bolts", "Bolts"), Category::new("nuts", "Nuts")];

        let html = render_categories(&categories, &CategoryFilter::All).unwrap();
        assert!(html.contains(r#"btn category-filter btn-secondary" data-category="all""#));
        assert_eq!(html.matches("btn-outline-secondary").count(), 2);

        let html = render_categories(&categories, &CategoryFilter::parse("nuts")).unwrap();
        assert!(html.contains(r#"btn category-filter btn-secondary" data-category="nuts""#));
        assert!(html.contains(r#"btn category-filter btn-outline-secondary" data-category="all""#));
    }

    #[test]
    fn test_cart_items_render() {
        let mut cart = Cart::new();
        assert!(render_cart_items(&cart).unwrap().contains("Cart is empty"));

        cart.add(ProductId::new("A"), "Anchor");
        cart.set_quantity(&ProductId::new("A"), 12);
        let html = render_cart_items(&cart).unwrap();
        assert!(html.contains("quantity-minus"));
        assert!(html.contains("quantity-plus"));
        assert!(html.contains("remove-from-cart"));
        assert!(html.contains(r#"value="12""#));
        assert!(html.contains("12 pcs"));
    }

    #[test]
    fn test_min_order_warning_shows_total() {
        let summary = CartSummary {
            distinct_items: 2,
            total_quantity: 99,
        };
        let html = render_min_order_warning(&summary).unwrap();
        assert!(html.contains("Minimum order: 100 pcs"));
        assert!(html.contains("In your cart: 99 pcs"));
    }

    #[test]
    fn test_modal_summary_total() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("A"), "Anchor");
        cart.add(ProductId::new("B"), "Bolt");
        cart.add(ProductId::new("B"), "Bolt");

        let html = render_modal_summary(&cart).unwrap();
        assert!(html.contains("Anchor"));
        assert!(html.contains("Total:"));
        assert!(html.contains("3 pcs"));
    }

    #[test]
    fn test_submit_label() {
        assert_eq!(submit_label(SubmitState::Enabled), "Submit request");
        assert_eq!(submit_label(SubmitState::Disabled), "Minimum 100 pcs");
    }
}
