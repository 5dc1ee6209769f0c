//! The client-local cart and the minimum-order rule.
//!
//! A [`Cart`] is an ordered list of [`CartItem`]s, unique by product id. No
//! item ever has quantity zero: every operation that would bring a quantity
//! below one deletes the item instead.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::ProductId;

/// Total quantity below which an order request cannot be submitted.
pub const MIN_ORDER_QUANTITY: u32 = 100;

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    /// Denormalised copy of the product name at the time it was added.
    pub name: String,
    pub quantity: u32,
}

/// Direction of a +/- quantity button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Plus,
    Minus,
}

/// An ordered, id-unique list of cart items.
///
/// Serializes as a bare JSON array of items, which is the format kept in
/// local storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from raw items, restoring the invariants: zero-quantity
    /// items are dropped and duplicate ids collapse to the first occurrence.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 || cart.position(&item.id).is_some() {
                continue;
            }
            cart.items.push(item);
        }
        cart
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id == *id)
    }

    /// Add one unit of a product, appending a new line if needed.
    pub fn add(&mut self, id: ProductId, name: impl Into<String>) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem {
                id,
                name: name.into(),
                quantity: 1,
            });
        }
    }

    /// Remove a line. Returns false if the product was not in the cart.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != *id);
        self.items.len() != before
    }

    /// Apply a +/- button press.
    ///
    /// Minus at quantity one removes the line. Returns false if the product
    /// was not in the cart.
    pub fn adjust(&mut self, id: &ProductId, adjustment: Adjustment) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let current = self.items.get(index).map_or(0, |item| item.quantity);
        match adjustment {
            Adjustment::Minus if current <= 1 => {
                self.items.remove(index);
            }
            Adjustment::Minus => self.set_at(index, current - 1),
            Adjustment::Plus => self.set_at(index, current.saturating_add(1)),
        }
        true
    }

    fn set_at(&mut self, index: usize, quantity: u32) {
        if let Some(item) = self.items.get_mut(index) {
            item.quantity = quantity;
        }
    }

    /// Set a line's quantity exactly. Anything below one removes the line.
    ///
    /// Returns false if the product was not in the cart.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        if quantity < 1 {
            return self.remove(id);
        }
        match self.items.iter_mut().find(|item| item.id == *id) {
            Some(item) => {
                item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    #[must_use]
    pub fn distinct_items(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            distinct_items: self.distinct_items(),
            total_quantity: self.total_quantity(),
        }
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CartItem>::deserialize(deserializer).map(Self::from_items)
    }
}

/// Enablement of the order-submission control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    /// Total quantity is below [`MIN_ORDER_QUANTITY`].
    Disabled,
    Enabled,
}

/// Aggregates shown next to the cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartSummary {
    pub distinct_items: usize,
    pub total_quantity: u64,
}

impl CartSummary {
    #[must_use]
    pub fn submit_state(&self) -> SubmitState {
        if self.total_quantity >= u64::from(MIN_ORDER_QUANTITY) {
            SubmitState::Enabled
        } else {
            SubmitState::Disabled
        }
    }

    /// Units still missing to reach the minimum order.
    #[must_use]
    pub fn shortfall(&self) -> u64 {
        u64::from(MIN_ORDER_QUANTITY).saturating_sub(self.total_quantity)
    }
}

/// Interpret the text of a quantity input.
///
/// Reads the leading integer (optional sign, then digits) and ignores the
/// rest. Unparseable input and zero both yield 1; negative values are
/// returned as-is so the caller removes the line. Digit runs too long for
/// an `i64` clamp to `i64::MAX` with their sign.
#[must_use]
pub fn parse_quantity_input(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();

    if digits.is_empty() {
        return 1;
    }
    // An all-digit run only fails to parse on overflow.
    match digits.parse::<i64>() {
        Ok(0) => 1,
        Ok(value) => sign * value,
        Err(_) => sign * i64::MAX,
    }
}
