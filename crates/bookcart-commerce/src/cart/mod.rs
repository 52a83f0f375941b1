//! Shopping cart module.
//!
//! Contains the cart value type and the store that persists it.

mod cart;
mod store;

pub use cart::{Cart, CartItem, NewCartItem, ITEM_QTY};
pub use store::{CartStore, DEFAULT_CART_KEY};
