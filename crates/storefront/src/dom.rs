//! DOM adapter.
//!
//! The widget never touches a document directly. It reads and writes through
//! the [`Dom`] trait, addressing elements by the fixed ids the host page
//! provides (see [`ids`]). A browser binding implements the trait over the
//! real document; [`Document`] is the in-memory implementation used by the
//! CLI and the tests.
//!
//! Writes to elements the page does not have are silently ignored, the same
//! way the catalog page and the cart page each carry only part of the
//! contract.

use std::collections::{BTreeMap, BTreeSet};

/// Element ids of the host page contract.
pub mod ids {
    pub const SEARCH_INPUT: &str = "search-input";
    pub const CLEAR_SEARCH: &str = "clear-search";
    pub const SORT_SELECT: &str = "sort-select";
    pub const CATEGORIES_CONTAINER: &str = "categories-container";
    pub const PRODUCTS_CONTAINER: &str = "products-container";
    pub const CART_COUNT: &str = "cart-count";
    pub const CART_ITEMS: &str = "cart-items";
    pub const MIN_ORDER_WARNING: &str = "min-order-warning";
    pub const TOTAL_ITEMS: &str = "total-items";
    pub const TOTAL_QUANTITY: &str = "total-quantity";
    pub const SUBMIT_REQUEST_BTN: &str = "submit-request-btn";
    pub const REQUEST_MODAL: &str = "requestModal";
    pub const MODAL_CART_SUMMARY: &str = "modal-cart-summary";

    /// Elements of the catalog page.
    pub const CATALOG_PAGE: &[&str] = &[
        SEARCH_INPUT,
        CLEAR_SEARCH,
        SORT_SELECT,
        CATEGORIES_CONTAINER,
        PRODUCTS_CONTAINER,
        CART_COUNT,
    ];

    /// Elements of the cart page, including the request dialog.
    pub const CART_PAGE: &[&str] = &[
        CART_COUNT,
        CART_ITEMS,
        MIN_ORDER_WARNING,
        TOTAL_ITEMS,
        TOTAL_QUANTITY,
        SUBMIT_REQUEST_BTN,
        REQUEST_MODAL,
        MODAL_CART_SUMMARY,
    ];
}

/// Class names the widget toggles.
pub mod classes {
    /// Bootstrap's "display: none".
    pub const HIDDEN: &str = "d-none";
    /// Marks an open modal dialog.
    pub const SHOW: &str = "show";
    pub const BTN_PRIMARY: &str = "btn-primary";
    pub const BTN_SECONDARY: &str = "btn-secondary";
}

/// Read/write access to the host page.
pub trait Dom {
    /// Returns true if the page has an element with this id.
    fn exists(&self, id: &str) -> bool;

    /// Replace the element's inner HTML.
    fn set_inner_html(&mut self, id: &str, html: &str);

    /// Replace the element's text content.
    fn set_text(&mut self, id: &str, text: &str);

    fn add_class(&mut self, id: &str, class: &str);

    fn remove_class(&mut self, id: &str, class: &str);

    fn has_class(&self, id: &str, class: &str) -> bool;

    fn set_disabled(&mut self, id: &str, disabled: bool);

    /// Set the value of an input element.
    fn set_value(&mut self, id: &str, value: &str);

    /// Add `class` if `on`, remove it otherwise.
    fn toggle_class(&mut self, id: &str, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }
}

/// State of one element in a [`Document`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Inner HTML (text writes are stored here too).
    pub content: String,
    pub classes: BTreeSet<String>,
    pub disabled: bool,
    pub value: String,
}

/// In-memory document holding only the elements the page declares.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: BTreeMap<String, Element>,
}

impl Document {
    /// A document with the given (empty) elements.
    #[must_use]
    pub fn with_elements<'a>(element_ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            elements: element_ids
                .into_iter()
                .map(|id| (id.to_owned(), Element::default()))
                .collect(),
        }
    }

    /// A document carrying both the catalog and the cart page contract.
    #[must_use]
    pub fn full_page() -> Self {
        Self::with_elements(ids::CATALOG_PAGE.iter().chain(ids::CART_PAGE).copied())
    }

    /// Inner HTML of an element, or `""` if the page does not have it.
    #[must_use]
    pub fn content(&self, id: &str) -> &str {
        self.elements.get(id).map_or("", |e| e.content.as_str())
    }

    #[must_use]
    pub fn is_disabled(&self, id: &str) -> bool {
        self.elements.get(id).is_some_and(|e| e.disabled)
    }

    #[must_use]
    pub fn value(&self, id: &str) -> &str {
        self.elements.get(id).map_or("", |e| e.value.as_str())
    }
}

impl Dom for Document {
    fn exists(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn set_inner_html(&mut self, id: &str, html: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            html.clone_into(&mut element.content);
        }
    }

    fn set_text(&mut self, id: &str, text: &str) {
        self.set_inner_html(id, text);
    }

    fn add_class(&mut self, id: &str, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.classes.insert(class.to_owned());
        }
    }

    fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.classes.remove(class);
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|e| e.classes.contains(class))
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            element.disabled = disabled;
        }
    }

    fn set_value(&mut self, id: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            value.clone_into(&mut element.value);
        }
    }
}
