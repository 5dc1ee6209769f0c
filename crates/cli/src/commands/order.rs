//! Order request submission.
//!
//! # Usage
//!
//! ```bash
//! mx-cli order submit -n "Ivan Petrov" -e ivan@example.com -p "+7 900 123-45-67" \
//!     -c "Delivery to the warehouse"
//! ```
//!
//! # Environment Variables
//!
//! - `METRIKS_BASE_URL` - Site accepting `/api/submit-request`
//! - `METRIKS_CART_PATH` - File holding the stored cart

use thiserror::Error;

use metriks_storefront::config::WidgetConfig;
use metriks_storefront::order::{OrderClient, OrderError, OrderRequest};

use super::cart;

/// Errors that can occur while submitting an order.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The cart could not be opened.
    #[error(transparent)]
    Cart(#[from] metriks_storefront::AppError),

    /// The request was invalid or could not be sent.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The server answered but refused the request.
    #[error("request was not accepted: {0}")]
    Rejected(String),
}

/// Contact fields from the command line.
#[derive(Debug, Clone, Copy)]
pub struct Contact<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub comment: &'a str,
}

/// Submit an order request for the stored cart.
///
/// The cart is left as it is; a successful request does not empty it.
///
/// # Errors
///
/// Returns `SubmitError` if the cart is below the minimum, the contact data
/// is invalid, the request fails or the server reports `success: false`.
#[allow(clippy::print_stdout)]
pub async fn submit(config: &WidgetConfig, contact: &Contact<'_>) -> Result<(), SubmitError> {
    let page = cart::open(config)?;
    let request = OrderRequest::from_form(
        contact.name,
        contact.email,
        contact.phone,
        contact.comment,
        page.cart().cart(),
    )?;

    let client = OrderClient::new(config.submit_url());
    let reply = client.submit(&request).await?;
    if !reply.success {
        return Err(SubmitError::Rejected(reply.message));
    }

    println!("{}", reply.message);
    Ok(())
}
