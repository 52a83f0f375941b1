//! Cart persistence.

use bookcart_cache::{Cache, Storage};
use bookcart_observability::StructuredLogger;

use crate::cart::{Cart, NewCartItem};
use crate::error::CommerceError;
use crate::ids::BookId;
use crate::money::Kobo;

/// Storage key the cart has always lived under.
pub const DEFAULT_CART_KEY: &str = "bookstore_cart_v1";

/// The cart, persisted as one JSON value under a single key.
///
/// Every read goes back to storage and every mutation rewrites the value
/// in full, so a page never works from a stale copy. Reads never fail:
/// an absent value is an empty cart, and an unreadable one is logged and
/// treated as empty until the next write replaces it.
#[derive(Debug)]
pub struct CartStore<S> {
    cache: Cache<S>,
    key: String,
    logger: StructuredLogger,
}

impl<S: Storage> CartStore<S> {
    /// Create a store over `storage` using [`DEFAULT_CART_KEY`].
    pub fn new(storage: S, logger: StructuredLogger) -> Self {
        Self {
            cache: Cache::new(storage),
            key: DEFAULT_CART_KEY.to_string(),
            logger,
        }
    }

    /// Use a different storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// The storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Access the storage backend.
    pub fn storage(&self) -> &S {
        self.cache.store()
    }

    /// Read the current cart.
    pub fn get_cart(&self) -> Cart {
        match self.cache.get::<Option<Cart>>(&self.key) {
            Ok(stored) => {
                let mut cart = stored.flatten().unwrap_or_default();
                let fixed = cart.normalize();
                if fixed > 0 {
                    self.logger
                        .warn_builder("stored cart violated invariants; normalized")
                        .field_u64("fixed", fixed as u64)
                        .emit();
                }
                cart
            }
            Err(e) => {
                self.logger
                    .error_builder("cart parse error")
                    .field("key", self.key.as_str())
                    .error(&e)
                    .emit();
                Cart::new()
            }
        }
    }

    /// Add a book with quantity 1 and persist.
    ///
    /// Returns [`CommerceError::AlreadyInCart`] without writing if the id
    /// is already present.
    pub fn add_to_cart(&self, item: NewCartItem) -> Result<Cart, CommerceError> {
        let mut cart = self.get_cart();
        let id = item.id;
        if let Err(e) = cart.add(item) {
            self.logger
                .debug_builder("duplicate add rejected")
                .field_u64("id", id.get())
                .emit();
            return Err(e);
        }

        self.save(&cart)?;
        self.logger
            .debug_builder("added to cart")
            .field_u64("id", id.get())
            .field_u64("count", cart.item_count())
            .emit();
        Ok(cart)
    }

    /// Persist the cart without `id`. Removing an absent id rewrites the
    /// same cart.
    pub fn remove_from_cart(&self, id: BookId) -> Result<Cart, CommerceError> {
        let mut cart = self.get_cart();
        let removed = cart.remove(id);
        self.save(&cart)?;
        self.logger
            .debug_builder("removed from cart")
            .field_u64("id", id.get())
            .field_bool("present", removed)
            .emit();
        Ok(cart)
    }

    /// Empty the cart (after a completed order).
    pub fn clear_cart(&self) -> Result<(), CommerceError> {
        self.save(&Cart::new())
    }

    /// Sum of `price_kobo * qty`; zero for an empty cart.
    pub fn cart_total_kobo(&self) -> Result<Kobo, CommerceError> {
        self.get_cart().total()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.get_cart().item_count()
    }

    fn save(&self, cart: &Cart) -> Result<(), CommerceError> {
        self.cache.set(&self.key, cart)?;
        Ok(())
    }
}
