//! Commerce error types.

use thiserror::Error;

use crate::BookId;

/// Errors that can occur in cart operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// The book is already in the cart; duplicates are rejected, not merged.
    #[error("Book already in cart: {0}")]
    AlreadyInCart(BookId),

    /// A catalog data attribute is missing or malformed.
    #[error("Invalid attribute {name}: {value:?}")]
    InvalidAttribute { name: String, value: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Storage error.
    #[error("Cache error: {0}")]
    Cache(#[from] bookcart_cache::CacheError),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl CommerceError {
    pub(crate) fn invalid_attribute(name: &str, value: impl Into<String>) -> Self {
        CommerceError::InvalidAttribute {
            name: name.to_string(),
            value: value.into(),
        }
    }
}
