//! Catalog loader.
//!
//! Fetches the server-rendered catalog page and extracts the two JSON arrays
//! it embeds:
//!
//! ```html
//! <script type="application/json" id="products-data">[...]</script>
//! <script type="application/json" id="categories-data">[...]</script>
//! ```
//!
//! Loading is a single attempt with no retry and no caching. Failures are
//! logged and leave the affected list empty.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

use metriks_core::{Catalog, Category, Product};

/// Element id of the embedded products array.
pub const PRODUCTS_DATA_ID: &str = "products-data";

/// Element id of the embedded categories array.
pub const CATEGORIES_DATA_ID: &str = "categories-data";

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("catalog page returned HTTP {0}")]
    Status(u16),

    /// An embedded block is not a JSON array.
    #[error("invalid JSON in #{block}: {source}")]
    Parse {
        block: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script\s*>").expect("script block regex is valid")
});

static ID_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)id\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
        .expect("id attribute regex is valid")
});

/// Find the text content of the `<script>` element with the given id.
#[must_use]
pub fn script_text<'a>(html: &'a str, element_id: &str) -> Option<&'a str> {
    SCRIPT_BLOCK.captures_iter(html).find_map(|block| {
        let attributes = block.get(1)?.as_str();
        let id = ID_ATTRIBUTE.captures(attributes)?;
        let value = id.get(1).or_else(|| id.get(2)).or_else(|| id.get(3))?;
        (value.as_str() == element_id).then(|| block.get(2).map_or("", |m| m.as_str()))
    })
}

/// Parse one embedded array. Entries that do not fit `T` are logged and
/// skipped; the rest of the array is kept.
fn parse_block<T: DeserializeOwned>(html: &str, block: &'static str) -> Result<Vec<T>, CatalogError> {
    let Some(text) = script_text(html, block) else {
        debug!(block, "embedded data block not present");
        return Ok(Vec::new());
    };
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(text.trim()).map_err(|source| CatalogError::Parse { block, source })?;
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            serde_json::from_value::<T>(entry)
                .map_err(|e| warn!(block, index, error = %e, "Skipping invalid entry"))
                .ok()
        })
        .collect())
}

/// Extract products and categories from a catalog page.
///
/// The two blocks are independent: a malformed categories array is logged
/// and yields no categories, but valid products are still returned.
#[must_use]
pub fn parse_catalog_page(html: &str) -> Catalog {
    let products = parse_block::<Product>(html, PRODUCTS_DATA_ID).unwrap_or_else(|e| {
        warn!(error = %e, "Error parsing products data");
        Vec::new()
    });
    let categories = parse_block::<Category>(html, CATEGORIES_DATA_ID).unwrap_or_else(|e| {
        warn!(error = %e, "Error parsing categories data");
        Vec::new()
    });
    Catalog {
        products,
        categories,
    }
}

/// Fetches the catalog page over HTTP.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    client: reqwest::Client,
    url: Url,
}

impl CatalogLoader {
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    #[must_use]
    pub const fn with_client(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }

    /// Fetch the raw catalog page.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure or a non-success status.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<String, CatalogError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }

    /// Fetch and parse the catalog. Never fails: errors are logged and an
    /// empty catalog is returned.
    pub async fn load(&self) -> Catalog {
        match self.fetch().await {
            Ok(html) => {
                let catalog = parse_catalog_page(&html);
                info!(
                    products = catalog.products.len(),
                    categories = catalog.categories.len(),
                    "Catalog loaded"
                );
                catalog
            }
            Err(e) => {
                warn!(error = %e, "Error loading products");
                Catalog::default()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html><head><script src="/static/js/app.js"></script></head>
<body>
  <div id="products-container"></div>
  <script type="application/json" id="products-data">
    [{"id": "1", "name": "Bolt M8", "category": "bolts", "brand": "Fischer"},
     {"id": 2, "name": "Anchor 10x80", "category": "anchors"}]
  </script>
  <script id='categories-data' type="application/json">[{"id": "bolts", "name": "Bolts"}, {"id": "anchors", "name": "Anchors"}]</script>
</body></html>"#;

    #[test]
    fn test_script_text_finds_by_id() {
        let text = script_text(PAGE, CATEGORIES_DATA_ID).unwrap();
        assert!(text.starts_with("[{\"id\": \"bolts\""));
        assert!(script_text(PAGE, "missing").is_none());
    }

    #[test]
    fn test_script_text_unquoted_id() {
        let html = "<SCRIPT id=products-data>[]</SCRIPT>";
        assert_eq!(script_text(html, PRODUCTS_DATA_ID), Some("[]"));
    }

    #[test]
    fn test_parse_catalog_page() {
        let catalog = parse_catalog_page(PAGE);
        assert_eq!(catalog.products.len(), 2);
        assert_eq!(catalog.products[1].id.as_str(), "2");
        assert_eq!(catalog.categories.len(), 2);
        assert_eq!(catalog.categories[1].id.as_str(), "anchors");
    }

    #[test]
    fn test_malformed_block_only_empties_that_list() {
        let html = r#"<script id="products-data">[{"id": "1", "name": "Bolt", "category": "bolts"}]</script>
<script id="categories-data">[{"id": "bolts",</script>"#;
        let catalog = parse_catalog_page(html);
        assert_eq!(catalog.products.len(), 1);
        assert!(catalog.categories.is_empty());
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        let html = r#"<script id="products-data">[
  {"id": "1", "name": "Bolt M8", "category": "bolts", "brand": 5},
  {"id": "2", "name": null, "category": "bolts"},
  {"id": "3", "name": "Anchor", "category": "anchors"},
  "not an object"
]</script>
<script id="categories-data">[{"id": "anchors", "name": "Anchors"}, {"name": "Orphan"}]</script>"#;
        let catalog = parse_catalog_page(html);
        assert_eq!(catalog.products.len(), 1);
        assert_eq!(catalog.products[0].id.as_str(), "3");
        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.categories[0].id.as_str(), "anchors");
    }

    #[test]
    fn test_non_array_block_is_empty() {
        let html = r#"<script id="products-data">{"id": "1", "name": "Bolt"}</script>"#;
        assert!(parse_catalog_page(html).products.is_empty());
    }

    #[test]
    fn test_page_without_blocks_is_empty() {
        assert!(parse_catalog_page("<html><body>maintenance</body></html>").is_empty());
    }

    #[tokio::test]
    async fn test_load_unreachable_server_is_empty() {
        // Port 9 (discard) on localhost is closed in test environments.
        let loader = CatalogLoader::new(Url::parse("http://127.0.0.1:9/catalog").unwrap());
        assert!(loader.load().await.is_empty());
    }
}
