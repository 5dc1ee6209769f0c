//! Category and free-text filtering, plus the catalog sort orders.
//!
//! All functions here are pure transformations over in-memory product
//! lists. The widget re-runs them on every filter, search or sort change.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::types::{CategoryId, Product};

/// Value of the "show all" category button and URL parameter.
pub const ALL_CATEGORIES: &str = "all";

/// Which category the product grid is restricted to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(CategoryId),
}

impl CategoryFilter {
    /// Parse a category button value. `"all"` and `""` both mean no filter.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Category(CategoryId::new(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Category(id) => id.as_str(),
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns true if the category id is the selected one.
    #[must_use]
    pub fn is_selected(&self, id: &CategoryId) -> bool {
        matches!(self, Self::Category(selected) if selected == id)
    }

    #[must_use]
    pub fn admits(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => product.category == *id,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient filter state of the catalog page. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub search_query: String,
}

impl FilterState {
    /// Update the search query.
    ///
    /// Search is global: a non-empty query forces the category back to
    /// "all". Returns true if that reset happened, so the caller knows the
    /// category bar needs a re-render too.
    pub fn set_search(&mut self, query: impl Into<String>) -> bool {
        self.search_query = query.into();
        if !self.search_query.is_empty() && !self.category.is_all() {
            self.category = CategoryFilter::All;
            return true;
        }
        false
    }

    pub fn select_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    /// Reset both the query and the category.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Apply this state to a product list.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        filter(products, &self.category, &self.search_query)
    }
}

/// Keep products in `category` whose searchable fields contain `query`.
///
/// An empty query matches everything. Matching is a case-insensitive
/// substring test; absent optional fields never match. Relative order is
/// preserved.
#[must_use]
pub fn filter<'a>(products: &'a [Product], category: &CategoryFilter, query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| category.admits(product))
        .filter(|product| needle.is_empty() || product.matches_lowercase(&needle))
        .collect()
}

/// Order of the product grid, as chosen in the sort select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Order in which the catalog page listed the products.
    #[default]
    Default,
    NameAsc,
    NameDesc,
    Category,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::Category => "category",
        }
    }
}

impl FromStr for SortOrder {
    type Err = std::convert::Infallible;

    /// Unknown keys fall back to [`SortOrder::Default`], like an unmatched
    /// select option.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "name-asc" => Self::NameAsc,
            "name-desc" => Self::NameDesc,
            "category" => Self::Category,
            _ => Self::Default,
        })
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locale-style string comparison: case-folded first, then exact.
///
/// Good enough for product names mixing Latin and Cyrillic; a full collation
/// table is not needed for a catalog of this size.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

/// Sort a product list in place. Sorting is stable.
///
/// [`SortOrder::Default`] leaves the slice untouched; restoring the load
/// order is the job of [`SortedProducts`], which still has it.
pub fn sort(products: &mut [Product], order: SortOrder) {
    match order {
        SortOrder::Default => {}
        SortOrder::NameAsc => products.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
        SortOrder::NameDesc => products.sort_by(|a, b| locale_cmp(&b.name, &a.name)),
        SortOrder::Category => products.sort_by(|a, b| a.category.cmp(&b.category)),
    }
}

/// The working product list of a session.
///
/// Keeps the load order next to the current order so that choosing
/// "default" after a name sort brings the original listing back. Any other
/// sort re-sorts the current list, so ties keep the previous order.
#[derive(Debug, Clone, Default)]
pub struct SortedProducts {
    load_order: Vec<Product>,
    current: Vec<Product>,
    order: SortOrder,
}

impl SortedProducts {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            current: products.clone(),
            load_order: products,
            order: SortOrder::Default,
        }
    }

    pub fn apply(&mut self, order: SortOrder) {
        self.order = order;
        if order == SortOrder::Default {
            self.current.clone_from(&self.load_order);
        } else {
            sort(&mut self.current, order);
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Product] {
        &self.current
    }

    #[must_use]
    pub const fn order(&self) -> SortOrder {
        self.order
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn product(id: &str, name: &str, category: &str) -> Product {
        Product::new(id, name, category)
    }

    fn sample() -> Vec<Product> {
        let mut anchor = product("3", "Anchor bolt", "anchors");
        anchor.brand = Some("Hilti".to_string());
        let mut screw = product("2", "Screw", "screws");
        screw.description = Some("Self-tapping, for BOLT-free fixing".to_string());
        vec![product("1", "hex bolt", "bolts"), screw, anchor, product("4", "Nut", "bolts")]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_filter_by_category_keeps_order() {
        let products = sample();
        let result = filter(&products, &CategoryFilter::parse("bolts"), "");
        assert_eq!(ids(&result), ["1", "4"]);
    }

    #[test]
    fn test_filter_all_and_empty_mean_no_filter() {
        let products = sample();
        assert_eq!(filter(&products, &CategoryFilter::parse("all"), "").len(), 4);
        assert_eq!(filter(&products, &CategoryFilter::parse(""), "").len(), 4);
    }

    #[test]
    fn test_filter_query_is_case_insensitive_across_fields() {
        let products = sample();
        let result = filter(&products, &CategoryFilter::All, "BOLT");
        assert_eq!(ids(&result), ["1", "2", "3"]);

        let result = filter(&products, &CategoryFilter::All, "hilti");
        assert_eq!(ids(&result), ["3"]);
    }

    #[test]
    fn test_filter_composes_category_and_query() {
        let products = sample();
        let result = filter(&products, &CategoryFilter::parse("bolts"), "bolt");
        assert_eq!(ids(&result), ["1"]);
    }

    #[test]
    fn test_set_search_forces_all_categories() {
        let mut state = FilterState::default();
        state.select_category(CategoryFilter::parse("bolts"));

        assert!(state.set_search("nut"));
        assert!(state.category.is_all());

        // Clearing the query does not restore the previous category.
        assert!(!state.set_search(""));
        assert!(state.category.is_all());
    }

    #[test]
    fn test_category_click_while_searching_composes() {
        let products = sample();
        let mut state = FilterState::default();
        state.set_search("bolt");
        state.select_category(CategoryFilter::parse("anchors"));
        assert_eq!(ids(&state.apply(&products)), ["3"]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut state = FilterState {
            category: CategoryFilter::parse("bolts"),
            search_query: "m8".to_string(),
        };
        state.clear();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("name-asc".parse::<SortOrder>().unwrap(), SortOrder::NameAsc);
        assert_eq!("name-desc".parse::<SortOrder>().unwrap(), SortOrder::NameDesc);
        assert_eq!("category".parse::<SortOrder>().unwrap(), SortOrder::Category);
        assert_eq!("price".parse::<SortOrder>().unwrap(), SortOrder::Default);
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let mut products = sample();
        sort(&mut products, SortOrder::NameAsc);
        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Anchor bolt", "hex bolt", "Nut", "Screw"]);

        sort(&mut products, SortOrder::NameDesc);
        assert_eq!(products[0].name, "Screw");
    }

    #[test]
    fn test_sort_by_category_is_stable() {
        let mut products = sample();
        sort(&mut products, SortOrder::Category);
        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["3", "1", "4", "2"]);
    }

    #[test]
    fn test_sorted_products_default_restores_load_order() {
        let mut list = SortedProducts::new(sample());
        list.apply(SortOrder::NameDesc);
        assert_eq!(list.as_slice()[0].id.as_str(), "2");

        list.apply(SortOrder::Default);
        let ids: Vec<_> = list.as_slice().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
        assert_eq!(list.order(), SortOrder::Default);
    }

    #[test]
    fn test_locale_cmp_cyrillic() {
        assert_eq!(locale_cmp("анкер", "Болт"), Ordering::Less);
        assert_eq!(locale_cmp("Болт", "болт"), Ordering::Less);
    }

    fn arb_products() -> impl Strategy<Value = Vec<Product>> {
        prop::collection::vec(
            ("[a-zA-Z ]{0,12}", prop::option::of("[a-z]{0,8}"), "[abc]"),
            0..24,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, brand, category))| {
                    let mut p = Product::new(i.to_string(), name, category);
                    p.brand = brand;
                    p
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_category_filter_is_exact_ordered_subset(products in arb_products(), category in "[abc]") {
            let expected: Vec<&Product> = products
                .iter()
                .filter(|p| p.category.as_str() == category)
                .collect();
            let result = filter(&products, &CategoryFilter::parse(&category), "");
            prop_assert_eq!(result, expected);
        }

        #[test]
        fn prop_every_result_contains_query(products in arb_products(), query in "[a-zA-Z]{1,3}") {
            let needle = query.to_lowercase();
            for p in filter(&products, &CategoryFilter::All, &query) {
                let hit = p.name.to_lowercase().contains(&needle)
                    || p.brand.as_ref().is_some_and(|b| b.to_lowercase().contains(&needle));
                prop_assert!(hit);
            }
        }
    }
}
