//! Cart and line item types.

use std::collections::HashSet;

use crate::error::CommerceError;
use crate::ids::BookId;
use crate::money::Kobo;
use serde::{Deserialize, Serialize};

/// Quantity of every line item. The store sells single copies only.
pub const ITEM_QTY: u32 = 1;

fn default_qty() -> u32 {
    ITEM_QTY
}

/// A line item in the cart.
///
/// Field names are the persisted JSON names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItem {
    /// Catalog identity.
    pub id: BookId,
    /// Book title (denormalized for display).
    #[serde(default)]
    pub title: String,
    /// Unit price.
    pub price_kobo: Kobo,
    /// Always [`ITEM_QTY`].
    #[serde(default = "default_qty")]
    pub qty: u32,
}

impl CartItem {
    /// Line total (price * qty).
    pub fn line_total(&self) -> Result<Kobo, CommerceError> {
        self.price_kobo
            .checked_mul(self.qty)
            .ok_or(CommerceError::Overflow)
    }
}

/// What a caller supplies when adding a book; the cart fixes the quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub id: BookId,
    pub title: String,
    pub price_kobo: Kobo,
}

impl NewCartItem {
    pub fn new(id: BookId, title: impl Into<String>, price_kobo: Kobo) -> Self {
        Self {
            id,
            title: title.into(),
            price_kobo,
        }
    }
}

/// A shopping cart: distinct books in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Check if the cart holds `id`.
    pub fn contains(&self, id: BookId) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    /// Get an item by book ID.
    pub fn get(&self, id: BookId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Add a book.
    ///
    /// Returns [`CommerceError::AlreadyInCart`] and leaves the cart
    /// untouched if the book is already present.
    pub fn add(&mut self, item: NewCartItem) -> Result<(), CommerceError> {
        if self.contains(item.id) {
            return Err(CommerceError::AlreadyInCart(item.id));
        }

        self.items.push(CartItem {
            id: item.id,
            title: item.title,
            price_kobo: item.price_kobo,
            qty: ITEM_QTY,
        });
        Ok(())
    }

    /// Remove every item with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: BookId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() < len_before
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.qty)).sum()
    }

    /// Get number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line totals.
    pub fn total(&self) -> Result<Kobo, CommerceError> {
        let lines = self
            .items
            .iter()
            .map(CartItem::line_total)
            .collect::<Result<Vec<_>, _>>()?;
        Kobo::try_sum(lines).ok_or(CommerceError::Overflow)
    }

    /// Restore the cart invariants on data read from storage: keep the
    /// first item per id and force every quantity to [`ITEM_QTY`].
    ///
    /// Returns the number of items changed or dropped.
    pub fn normalize(&mut self) -> usize {
        let mut seen = HashSet::new();
        let mut fixed = 0;

        self.items.retain(|i| {
            let first = seen.insert(i.id);
            if !first {
                fixed += 1;
            }
            first
        });

        for item in &mut self.items {
            if item.qty != ITEM_QTY {
                item.qty = ITEM_QTY;
                fixed += 1;
            }
        }

        fixed
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Self { items }
    }
}
