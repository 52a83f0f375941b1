//! Key-value store wrapper with automatic serialization.

use crate::{CacheError, Storage};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over a [`Storage`] backend.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Values are always written in full.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: Storage> Cache<S> {
    /// Wrap a storage backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist. Stored text that does not
    /// deserialize into `T` is reported as [`CacheError::SerializeError`].
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Vec<CartItem>> = cache.get("bookstore_cart_v1")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get_item(key)? {
            Some(text) => {
                let value: T = serde_json::from_str(&text)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get the raw stored text without deserializing it.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.store.get_item(key)
    }

    /// Set a value in the cache, replacing whatever was there.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("bookstore_cart_v1", &items)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let text = serde_json::to_string(value)?;
        self.store.set_item(key, &text)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.remove_item(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.store.get_item(key)?.is_some())
    }
}
