//! Event wiring.
//!
//! A [`Widget`] owns the catalog [`Session`], the [`CartStore`] and the page
//! it draws on. Every user action is an [`Action`] passed to
//! [`Widget::dispatch`], which applies the state transition and then
//! re-renders exactly the regions that action touches.
//!
//! The catalog and the cart share nothing but the page: catalog actions
//! never read the cart and cart actions never re-render the grid.

use tracing::{debug, instrument};
use url::Url;

use metriks_core::{Adjustment, Catalog, CategoryFilter, ProductId, SortOrder, SubmitState};

use crate::cart_store::CartStore;
use crate::catalog::CatalogLoader;
use crate::dom::{Dom, classes, ids};
use crate::navigation::{CardTarget, card_click};
use crate::render::{
    RenderError, render_cart_items, render_categories, render_min_order_warning,
    render_modal_summary, render_products, submit_label,
};
use crate::session::{CatalogChange, Session};
use crate::storage::Storage;

/// A user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Text typed into the search input.
    Search(String),
    ClearSearch,
    SelectCategory(CategoryFilter),
    Sort(SortOrder),
    /// Click somewhere on a product card.
    CardClicked { id: ProductId, target: CardTarget },
    AddToCart { id: ProductId, name: String },
    RemoveFromCart(ProductId),
    Adjust { id: ProductId, adjustment: Adjustment },
    /// A quantity input lost focus with this raw text.
    SetQuantityInput { id: ProductId, raw: String },
    OpenRequestModal,
    CloseRequestModal,
}

/// What the host should do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The page was updated in place.
    Rendered,
    /// Navigate the browser to this path.
    Navigate(String),
}

/// The catalog and cart widget bound to one page.
#[derive(Debug)]
pub struct Widget<D: Dom, S: Storage> {
    dom: D,
    session: Session,
    cart: CartStore<S>,
}

impl<D: Dom, S: Storage> Widget<D, S> {
    /// Start the widget: load the stored cart and draw the cart regions.
    /// The catalog regions stay untouched until a catalog is installed.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if a cart template fails to render.
    pub fn new(dom: D, storage: S) -> Result<Self, RenderError> {
        let mut widget = Self {
            dom,
            session: Session::default(),
            cart: CartStore::load(storage),
        };
        widget.refresh_cart()?;
        Ok(widget)
    }

    #[must_use]
    pub const fn dom(&self) -> &D {
        &self.dom
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// Fetch the catalog and install it. A failed fetch installs an empty
    /// catalog, so the grid shows the "not found" placeholder.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if a catalog template fails to render.
    #[instrument(skip_all)]
    pub async fn load_catalog(
        &mut self,
        loader: &CatalogLoader,
        page_url: Option<&Url>,
    ) -> Result<(), RenderError> {
        let catalog = loader.load().await;
        self.install_catalog(catalog, page_url)
    }

    /// Replace the catalog, render it, then apply the page's `?category=`
    /// once if it names a known category.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if a catalog template fails to render.
    pub fn install_catalog(
        &mut self,
        catalog: Catalog,
        page_url: Option<&Url>,
    ) -> Result<(), RenderError> {
        self.session = Session::new(catalog);
        self.render_catalog(CatalogChange::ALL)?;
        if let Some(change) = page_url.and_then(|url| self.session.apply_url_category(url)) {
            self.render_catalog(change)?;
        }
        Ok(())
    }

    /// Apply one user action and re-render what it changed.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if a template fails to render. The state
    /// transition has already happened at that point.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, RenderError> {
        debug!(?action, "Dispatching action");
        match action {
            Action::Search(query) => {
                self.dom.set_value(ids::SEARCH_INPUT, &query);
                let change = self.session.search(&query);
                self.render_catalog(change)?;
            }
            Action::ClearSearch => {
                self.dom.set_value(ids::SEARCH_INPUT, "");
                let change = self.session.clear_search();
                self.render_catalog(change)?;
            }
            Action::SelectCategory(category) => {
                let change = self.session.select_category(category);
                self.render_catalog(change)?;
            }
            Action::Sort(order) => {
                self.dom.set_value(ids::SORT_SELECT, order.as_str());
                let change = self.session.sort(order);
                self.render_catalog(change)?;
            }
            Action::CardClicked { id, target } => {
                if let Some(path) = card_click(&id, target) {
                    return Ok(Outcome::Navigate(path));
                }
            }
            Action::AddToCart { id, name } => {
                self.cart.add(id, name);
                self.refresh_cart()?;
            }
            Action::RemoveFromCart(id) => {
                self.cart.remove(&id);
                self.refresh_cart()?;
            }
            Action::Adjust { id, adjustment } => {
                self.cart.adjust(&id, adjustment);
                self.refresh_cart()?;
            }
            Action::SetQuantityInput { id, raw } => {
                self.cart.set_quantity_input(&id, &raw);
                self.refresh_cart()?;
            }
            Action::OpenRequestModal => {
                self.dom.add_class(ids::REQUEST_MODAL, classes::SHOW);
                let html = render_modal_summary(self.cart.cart())?;
                self.dom.set_inner_html(ids::MODAL_CART_SUMMARY, &html);
            }
            Action::CloseRequestModal => {
                self.dom.remove_class(ids::REQUEST_MODAL, classes::SHOW);
            }
        }
        Ok(Outcome::Rendered)
    }

    fn render_catalog(&mut self, change: CatalogChange) -> Result<(), RenderError> {
        if change.products && self.dom.exists(ids::PRODUCTS_CONTAINER) {
            let visible = self.session.visible();
            debug!(
                visible = visible.len(),
                total = self.session.products().len(),
                "Rendering catalog"
            );
            let html = render_products(&visible)?;
            self.dom.set_inner_html(ids::PRODUCTS_CONTAINER, &html);
        }
        if change.categories && self.dom.exists(ids::CATEGORIES_CONTAINER) {
            let html = render_categories(self.session.categories(), &self.session.filter().category)?;
            self.dom.set_inner_html(ids::CATEGORIES_CONTAINER, &html);
        }
        Ok(())
    }

    /// Redraw every cart region from the current cart.
    fn refresh_cart(&mut self) -> Result<(), RenderError> {
        let summary = self.cart.summary();
        let state = summary.submit_state();
        let enabled = state == SubmitState::Enabled;

        self.dom
            .set_text(ids::CART_COUNT, &summary.total_quantity.to_string());
        self.dom
            .toggle_class(ids::CART_COUNT, classes::HIDDEN, summary.total_quantity == 0);

        if self.dom.exists(ids::CART_ITEMS) {
            let html = render_cart_items(self.cart.cart())?;
            self.dom.set_inner_html(ids::CART_ITEMS, &html);
        }

        if self.dom.exists(ids::MIN_ORDER_WARNING) {
            if enabled {
                self.dom.add_class(ids::MIN_ORDER_WARNING, classes::HIDDEN);
            } else {
                let html = render_min_order_warning(&summary)?;
                self.dom.set_inner_html(ids::MIN_ORDER_WARNING, &html);
                self.dom.remove_class(ids::MIN_ORDER_WARNING, classes::HIDDEN);
            }
        }

        self.dom
            .set_text(ids::TOTAL_ITEMS, &summary.distinct_items.to_string());
        self.dom
            .set_text(ids::TOTAL_QUANTITY, &summary.total_quantity.to_string());

        self.dom.set_disabled(ids::SUBMIT_REQUEST_BTN, !enabled);
        self.dom.set_text(ids::SUBMIT_REQUEST_BTN, &submit_label(state));
        self.dom
            .toggle_class(ids::SUBMIT_REQUEST_BTN, classes::BTN_PRIMARY, enabled);
        self.dom
            .toggle_class(ids::SUBMIT_REQUEST_BTN, classes::BTN_SECONDARY, !enabled);

        if self.dom.has_class(ids::REQUEST_MODAL, classes::SHOW) {
            let html = render_modal_summary(self.cart.cart())?;
            self.dom.set_inner_html(ids::MODAL_CART_SUMMARY, &html);
        }
        Ok(())
    }
}
