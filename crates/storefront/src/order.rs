//! Order request submission.
//!
//! Once the cart reaches the minimum quantity the customer can send a
//! request with their contact details. The request is posted form-encoded to
//! `/api/submit-request`; the server answers `{"success": bool, "message": ..}`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument, warn};
use url::Url;

use metriks_core::{Cart, CartItem, ContactDetails, ContactError, MIN_ORDER_QUANTITY};

/// Errors from building or sending an order request.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("minimum order is {min} pcs, cart has {total}", min = MIN_ORDER_QUANTITY)]
    BelowMinimum { total: u64 },

    #[error("invalid contact details: {0}")]
    Contact(#[from] ContactError),

    #[error("failed to encode cart items: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("submission endpoint returned HTTP {0}")]
    Status(u16),
}

/// Form body of an order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Cart items as a JSON array of `{id, name, quantity}`.
    pub items: String,
    pub total_quantity: u64,
    pub comment: String,
}

impl OrderRequest {
    /// Build a request from validated contact details and the current cart.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` for an empty cart and
    /// `OrderError::BelowMinimum` when the total is under the threshold.
    pub fn from_cart(
        contact: &ContactDetails,
        comment: &str,
        cart: &Cart,
    ) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let total = cart.total_quantity();
        if total < u64::from(MIN_ORDER_QUANTITY) {
            return Err(OrderError::BelowMinimum { total });
        }

        Ok(Self {
            name: contact.name.clone(),
            email: contact.email.as_str().to_owned(),
            phone: contact.phone.as_str().to_owned(),
            items: serde_json::to_string::<[CartItem]>(cart.items())?,
            total_quantity: total,
            comment: comment.trim().to_owned(),
        })
    }

    /// Parse raw contact fields and build the request.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Contact` if a contact field is invalid, otherwise
    /// the same errors as [`OrderRequest::from_cart`].
    pub fn from_form(
        name: &str,
        email: &str,
        phone: &str,
        comment: &str,
        cart: &Cart,
    ) -> Result<Self, OrderError> {
        let contact = ContactDetails::parse(name, email, phone)?;
        Self::from_cart(&contact, comment, cart)
    }
}

/// Server reply to a submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Posts order requests to the site.
#[derive(Debug, Clone)]
pub struct OrderClient {
    client: reqwest::Client,
    url: Url,
}

impl OrderClient {
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// Submit a request. Single attempt; a `success: false` reply is returned
    /// as-is, not as an error.
    ///
    /// # Errors
    ///
    /// Returns `OrderError` on transport failure or a non-success status.
    #[instrument(skip(self, request), fields(url = %self.url, total = request.total_quantity))]
    pub async fn submit(&self, request: &OrderRequest) -> Result<SubmitResponse, OrderError> {
        let response = self
            .client
            .post(self.url.clone())
            .form(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Order submission rejected");
            return Err(OrderError::Status(status.as_u16()));
        }

        let reply: SubmitResponse = response.json().await?;
        info!(success = reply.success, message = %reply.message, "Order submitted");
        Ok(reply)
    }
}
