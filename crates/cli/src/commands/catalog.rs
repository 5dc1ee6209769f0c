//! Catalog listing.
//!
//! # Usage
//!
//! ```bash
//! mx-cli catalog
//! mx-cli catalog --search "din 933" --sort name-desc
//! mx-cli catalog --category bolts --html
//! ```
//!
//! # Environment Variables
//!
//! - `METRIKS_BASE_URL` - Site serving the catalog page

use metriks_core::{CategoryFilter, SortOrder};
use metriks_storefront::catalog::CatalogLoader;
use metriks_storefront::config::WidgetConfig;
use metriks_storefront::dom::{Document, ids};
use metriks_storefront::storage::MemoryStorage;
use metriks_storefront::widget::{Action, Widget};

/// Filter and sort options of `mx-cli catalog`.
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: SortOrder,
    pub html: bool,
}

/// Load the catalog, apply the query and print the result.
///
/// The options are applied in the order a visitor would: category first,
/// then the search (which resets the category), then the sort.
///
/// # Errors
///
/// Returns an error if a template fails to render.
#[allow(clippy::print_stdout)]
pub async fn show(config: &WidgetConfig, query: &CatalogQuery) -> metriks_storefront::Result<()> {
    let loader = CatalogLoader::new(config.catalog_url());
    let page = Document::with_elements(ids::CATALOG_PAGE.iter().copied());
    let mut widget = Widget::new(page, MemoryStorage::new())?;
    widget.load_catalog(&loader, None).await?;

    if let Some(category) = &query.category {
        widget.dispatch(Action::SelectCategory(CategoryFilter::parse(category)))?;
    }
    if let Some(search) = &query.search {
        widget.dispatch(Action::Search(search.clone()))?;
    }
    if query.sort != SortOrder::Default {
        widget.dispatch(Action::Sort(query.sort))?;
    }

    if query.html {
        println!("{}", widget.dom().content(ids::PRODUCTS_CONTAINER));
        return Ok(());
    }

    let session = widget.session();
    let visible = session.visible();
    if visible.is_empty() {
        println!("No products found");
        return Ok(());
    }
    for product in &visible {
        println!(
            "{:<10} {:<16} {}",
            product.id.as_str(),
            product.category.as_str(),
            product.name
        );
    }
    println!();
    println!(
        "{} of {} products, category: {}, sort: {}",
        visible.len(),
        session.products().len(),
        session.filter().category,
        session.sort_order()
    );
    Ok(())
}
