//! Bookstore cart domain types and logic.
//!
//! - **Money**: integer kobo amounts and naira formatting
//! - **Catalog**: book listings parsed from catalog card attributes
//! - **Cart**: the persisted set of distinct books, each with quantity 1
//! - **Checkout**: the order request the checkout page submits
//!
//! # Example
//!
//! ```rust
//! use bookcart_cache::MemoryStorage;
//! use bookcart_commerce::prelude::*;
//! use bookcart_observability::StructuredLogger;
//!
//! let store = CartStore::new(MemoryStorage::new(), StructuredLogger::new("cart"));
//! store
//!     .add_to_cart(NewCartItem::new(BookId::new(1), "Things Fall Apart", Kobo::new(450_000)))
//!     .unwrap();
//!
//! assert_eq!(store.cart_total_kobo().unwrap().display(), "\u{20a6}4,500.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use cart::{Cart, CartItem, CartStore, NewCartItem};
pub use error::CommerceError;
pub use ids::BookId;
pub use money::{format_kobo, Kobo, CURRENCY_SYMBOL};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::BookId;
    pub use crate::money::{format_kobo, Kobo, CURRENCY_SYMBOL};

    pub use crate::cart::{Cart, CartItem, CartStore, NewCartItem, DEFAULT_CART_KEY};
    pub use crate::catalog::BookListing;
    pub use crate::checkout::{CheckoutLine, CheckoutRequest};
}
