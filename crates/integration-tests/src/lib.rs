//! Integration test fixtures for the Metriks catalog widget.
//!
//! [`TestSite`] runs a small axum server on an ephemeral port that plays the
//! host site: it serves a catalog page with the two embedded JSON blocks and
//! accepts order requests on `/api/submit-request`, recording each form it
//! receives.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p metriks-integration-tests
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use metriks_core::MIN_ORDER_QUANTITY;
use metriks_storefront::config::WidgetConfig;

/// Path that always answers 503.
pub const UNAVAILABLE_PATH: &str = "/unavailable";

/// One recorded order request form.
pub type Submission = HashMap<String, String>;

#[derive(Clone)]
struct SiteState {
    catalog_page: Arc<String>,
    submissions: Arc<Mutex<Vec<Submission>>>,
}

/// A running fixture site. The server stops when this is dropped.
pub struct TestSite {
    base_url: Url,
    submissions: Arc<Mutex<Vec<Submission>>>,
    server: JoinHandle<()>,
}

impl TestSite {
    /// Serve `catalog_page` at `/catalog`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start(catalog_page: impl Into<String>) -> Self {
        let submissions = Arc::new(Mutex::new(Vec::new()));
        let state = SiteState {
            catalog_page: Arc::new(catalog_page.into()),
            submissions: Arc::clone(&submissions),
        };

        let app = Router::new()
            .route("/catalog", get(catalog))
            .route("/api/submit-request", post(submit_request))
            .route(UNAVAILABLE_PATH, get(unavailable))
            .with_state(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("listener address");
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}")).expect("valid fixture URL"),
            submissions,
            server,
        }
    }

    /// Widget configuration pointing at this site.
    ///
    /// # Panics
    ///
    /// Panics if the fixture URL is rejected, which would be a fixture bug.
    #[must_use]
    pub fn config(&self) -> WidgetConfig {
        WidgetConfig::for_base_url(self.base_url.as_str()).expect("fixture URL is valid config")
    }

    /// URL of a path on this site.
    ///
    /// # Panics
    ///
    /// Panics if `path` does not form a valid URL.
    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.base_url.join(path).expect("valid fixture path")
    }

    /// Order request forms received so far.
    #[must_use]
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for TestSite {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn catalog(State(state): State<SiteState>) -> Html<String> {
    Html(state.catalog_page.as_str().to_owned())
}

async fn unavailable() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

async fn submit_request(
    State(state): State<SiteState>,
    Form(form): Form<Submission>,
) -> Json<Value> {
    let total = form
        .get("total_quantity")
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or_default();
    if total < u64::from(MIN_ORDER_QUANTITY) {
        return Json(json!({
            "success": false,
            "message": format!("Minimum order is {MIN_ORDER_QUANTITY} pcs"),
        }));
    }

    state
        .submissions
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(form);
    Json(json!({"success": true, "message": "Request received"}))
}

/// Build a catalog page embedding `products` and `categories` the way the
/// host site does.
#[must_use]
pub fn catalog_page(products: &Value, categories: &Value) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head><title>Catalog</title></head>
<body>
  <input id="search-input" type="text">
  <div id="categories-container"></div>
  <div id="products-container" class="row"></div>
  <script type="application/json" id="products-data">{products}</script>
  <script type="application/json" id="categories-data">{categories}</script>
  <script src="/static/js/app.js"></script>
</body>
</html>"#
    )
}

/// A small fastener catalog.
#[must_use]
pub fn sample_products() -> Value {
    json!([
        {"id": 1, "name": "Bolt M8x40", "category": "bolts", "brand": "Fischer", "sku": "B-M8-40", "standard": "DIN 933"},
        {"id": 2, "name": "Anchor bolt 10x80", "category": "anchors", "description": "Wedge anchor for concrete"},
        {"id": "3", "name": "Washer M8", "category": "washers", "material": "Zinc-plated steel"},
        {"id": "4", "name": "bolt M6x30", "category": "bolts", "image": ""}
    ])
}

/// Categories matching [`sample_products`].
#[must_use]
pub fn sample_categories() -> Value {
    json!([
        {"id": "bolts", "name": "Bolts"},
        {"id": "anchors", "name": "Anchors"},
        {"id": "washers", "name": "Washers"}
    ])
}
