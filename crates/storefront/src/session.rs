//! Catalog session: the loaded products, the categories and the current
//! filter and sort choices.

use tracing::debug;
use url::Url;

use metriks_core::{Catalog, Category, CategoryFilter, FilterState, Product, SortOrder, SortedProducts};

use crate::navigation::initial_category;
/// Catalog regions an action invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogChange {
    pub products: bool,
    pub categories: bool,
}

impl CatalogChange {
    /// Both regions.
    pub const ALL: Self = Self {
        products: true,
        categories: true,
    };

    /// The product grid only.
    pub const PRODUCTS: Self = Self {
        products: true,
        categories: false,
    };
}

/// State behind the catalog page.
#[derive(Debug, Clone, Default)]
pub struct Session {
    products: SortedProducts,
    categories: Vec<Category>,
    filter: FilterState,
}

impl Session {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            products: SortedProducts::new(catalog.products),
            categories: catalog.categories,
            filter: FilterState::default(),
        }
    }

    /// All loaded products in the current sort order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        self.products.as_slice()
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub const fn sort_order(&self) -> SortOrder {
        self.products.order()
    }

    /// Products that pass the current filter, in the current sort order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Product> {
        self.filter.apply(self.products.as_slice())
    }

    pub fn search(&mut self, query: &str) -> CatalogChange {
        if self.filter.set_search(query) {
            CatalogChange::ALL
        } else {
            CatalogChange::PRODUCTS
        }
    }

    pub fn clear_search(&mut self) -> CatalogChange {
        self.filter.clear();
        CatalogChange::ALL
    }

    pub fn select_category(&mut self, category: CategoryFilter) -> CatalogChange {
        self.filter.select_category(category);
        CatalogChange::ALL
    }

    pub fn sort(&mut self, order: SortOrder) -> CatalogChange {
        self.products.apply(order);
        CatalogChange::PRODUCTS
    }

    /// Apply a `?category=` deep link. Returns the change if the URL named a
    /// known category.
    pub fn apply_url_category(&mut self, page_url: &Url) -> Option<CatalogChange> {
        let category = initial_category(page_url, &self.categories)?;
        debug!(category = %category, "Applying category from URL");
        Some(self.select_category(category))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Catalog {
            products: vec![
                Product::new("1", "washer", "washers"),
                Product::new("2", "Bolt M8", "bolts"),
                Product::new("3", "anchor", "anchors"),
                Product::new("4", "Bolt M10", "bolts"),
            ],
            categories: vec![
                Category::new("anchors", "Anchors"),
                Category::new("bolts", "Bolts"),
                Category::new("washers", "Washers"),
            ],
        })
    }

    fn visible_ids(session: &Session) -> Vec<&str> {
        session.visible().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_search_resets_category() {
        let mut session = session();
        session.select_category(CategoryFilter::parse("anchors"));
        assert_eq!(session.search("bolt"), CatalogChange::ALL);
        assert!(session.filter().category.is_all());
        assert_eq!(visible_ids(&session), ["2", "4"]);

        assert_eq!(session.search("m10"), CatalogChange::PRODUCTS);
        assert_eq!(visible_ids(&session), ["4"]);
    }

    #[test]
    fn test_clear_search() {
        let mut session = session();
        session.search("bolt");
        session.select_category(CategoryFilter::parse("bolts"));
        session.clear_search();
        assert_eq!(session.filter(), &FilterState::default());
        assert_eq!(session.visible().len(), 4);
    }

    #[test]
    fn test_sort_persists_across_filters() {
        let mut session = session();
        session.sort(SortOrder::NameAsc);
        assert_eq!(visible_ids(&session), ["3", "4", "2", "1"]);

        session.select_category(CategoryFilter::parse("bolts"));
        assert_eq!(visible_ids(&session), ["4", "2"]);
        assert_eq!(session.sort_order(), SortOrder::NameAsc);

        session.sort(SortOrder::Default);
        assert_eq!(visible_ids(&session), ["2", "4"]);
    }

    #[test]
    fn test_url_category() {
        let mut session = session();
        let url = Url::parse("http://localhost/catalog?category=washers").unwrap();
        assert_eq!(session.apply_url_category(&url), Some(CatalogChange::ALL));
        assert_eq!(visible_ids(&session), ["1"]);

        let unknown = Url::parse("http://localhost/catalog?category=nails").unwrap();
        assert_eq!(session.apply_url_category(&unknown), None);
        assert_eq!(visible_ids(&session), ["1"]);
    }
}
