//! Navigation: product detail paths and the `?category=` deep link.

use url::Url;

use metriks_core::{Category, CategoryFilter, ProductId};

/// Query parameter naming the category to preselect.
pub const CATEGORY_PARAM: &str = "category";

/// Path of a product's detail page.
#[must_use]
pub fn product_path(id: &ProductId) -> String {
    format!("/product/{}", urlencoding::encode(id.as_str()))
}

/// Category requested by the page URL, if it names a known category.
///
/// Applied once at startup after the catalog has loaded. Unknown ids are
/// ignored rather than producing an empty grid.
#[must_use]
pub fn initial_category(page_url: &Url, categories: &[Category]) -> Option<CategoryFilter> {
    let requested = page_url
        .query_pairs()
        .find_map(|(key, value)| (key == CATEGORY_PARAM).then_some(value))?;
    if !categories.iter().any(|c| !c.id.is_empty() && c.id.as_str() == requested) {
        return None;
    }
    Some(CategoryFilter::parse(&requested))
}

/// What a click on a product card landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTarget {
    /// The card body, image or text.
    Body,
    /// An embedded button (add to cart).
    Button,
    /// An embedded link (details).
    Link,
}

/// Resolve a card click to a navigation target.
///
/// Only clicks on the card body navigate; buttons and links handle
/// themselves.
#[must_use]
pub fn card_click(id: &ProductId, target: CardTarget) -> Option<String> {
    match target {
        CardTarget::Body if !id.is_empty() => Some(product_path(id)),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec![Category::new("bolts", "Bolts"), Category::new("анкеры", "Анкеры")]
    }

    #[test]
    fn test_product_path_encodes_id() {
        assert_eq!(product_path(&ProductId::new("123")), "/product/123");
        assert_eq!(product_path(&ProductId::new("a b/c")), "/product/a%20b%2Fc");
    }

    #[test]
    fn test_initial_category_known() {
        let url = Url::parse("https://metriks.example/catalog?category=bolts").unwrap();
        assert_eq!(
            initial_category(&url, &categories()),
            Some(CategoryFilter::parse("bolts"))
        );
    }

    #[test]
    fn test_initial_category_percent_encoded() {
        let url = Url::parse("https://metriks.example/catalog?category=%D0%B0%D0%BD%D0%BA%D0%B5%D1%80%D1%8B").unwrap();
        assert_eq!(
            initial_category(&url, &categories()),
            Some(CategoryFilter::parse("анкеры"))
        );
    }

    #[test]
    fn test_initial_category_unknown_or_missing() {
        let unknown = Url::parse("https://metriks.example/catalog?category=nails").unwrap();
        let missing = Url::parse("https://metriks.example/catalog").unwrap();
        assert_eq!(initial_category(&unknown, &categories()), None);
        assert_eq!(initial_category(&missing, &categories()), None);
    }

    #[test]
    fn test_card_click_only_body_navigates() {
        let id = ProductId::new("42");
        assert_eq!(card_click(&id, CardTarget::Body).as_deref(), Some("/product/42"));
        assert_eq!(card_click(&id, CardTarget::Button), None);
        assert_eq!(card_click(&id, CardTarget::Link), None);
    }
}
