//! Catalog entries as embedded in the server-rendered catalog page.

use serde::{Deserialize, Deserializer, Serialize};

use super::id::{CategoryId, ProductId};

/// A product card in the catalog.
///
/// Products are immutable for the lifetime of a session; the server page is
/// the source of truth. Optional attributes that arrive as empty strings are
/// normalised to `None` so that "absent" has a single representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub standard: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub material: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub application: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub analogs: Option<String>,
    /// References [`Category::id`].
    #[serde(default)]
    pub category: CategoryId,
    #[serde(default, deserialize_with = "non_empty")]
    pub image: Option<String>,
}

impl Product {
    /// Create a product with only the required fields set.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, category: impl Into<CategoryId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            brand: None,
            sku: None,
            standard: None,
            material: None,
            application: None,
            analogs: None,
            category: category.into(),
            image: None,
        }
    }

    /// Fields the free-text search looks at, in match priority order.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.name.as_str()),
            self.description.as_deref(),
            self.brand.as_deref(),
            self.sku.as_deref(),
        ]
        .into_iter()
        .flatten()
    }

    /// Case-insensitive substring match against name, description, brand or SKU.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.searchable_fields()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    #[must_use]
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Everything extracted from one catalog page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

impl Catalog {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.categories.is_empty()
    }
}

/// Deserialize an optional string, treating `""` and whitespace as absent.
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
