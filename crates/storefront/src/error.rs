//! Unified error type for the widget.
//!
//! Most widget paths degrade instead of failing (an unreachable catalog leaves
//! an empty grid, a corrupt cart starts empty), so `AppError` mainly surfaces
//! to callers that drive the widget explicitly, such as the CLI.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::order::OrderError;
use crate::render::RenderError;
use crate::storage::StorageError;

/// Application-level error type for the widget.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog page could not be fetched or parsed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Local storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Order request was rejected or could not be sent.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
