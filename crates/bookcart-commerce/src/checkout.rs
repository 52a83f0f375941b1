//! The order request the checkout page submits.
//!
//! The server re-prices every line from its own catalog, so only book ids
//! and quantities are sent.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::ids::BookId;

/// One requested book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub book_id: BookId,
    pub qty: u32,
}

/// Body of `POST /api/checkout/create-order/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub items: Vec<CheckoutLine>,
}

impl CheckoutRequest {
    /// Build a request for the given customer and cart. Contact fields are
    /// trimmed.
    pub fn from_cart(name: &str, email: &str, phone: &str, cart: &Cart) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
            items: cart
                .items()
                .iter()
                .map(|i| CheckoutLine {
                    book_id: i.id,
                    qty: i.qty,
                })
                .collect(),
        }
    }

    /// Apply the rules the server enforces, so the page can refuse early.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.name.is_empty() || self.email.is_empty() {
            return Err(CommerceError::ValidationError(
                "name and email are required".to_string(),
            ));
        }
        if self.items.is_empty() {
            return Err(CommerceError::ValidationError(
                "cart items required".to_string(),
            ));
        }
        Ok(())
    }

    /// Serialize to the JSON body.
    pub fn to_json(&self) -> Result<String, CommerceError> {
        serde_json::to_string(self).map_err(|e| CommerceError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::NewCartItem;
    use crate::money::Kobo;

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(NewCartItem::new(BookId::new(4), "A", Kobo::new(500)))
            .unwrap();
        cart.add(NewCartItem::new(BookId::new(9), "B", Kobo::new(800)))
            .unwrap();
        cart
    }

    #[test]
    fn test_from_cart() {
        let request = CheckoutRequest::from_cart(" Ada ", "ada@example.com ", "", &cart());
        assert_eq!(request.name, "Ada");
        assert_eq!(request.email, "ada@example.com");
        assert!(request.validate().is_ok());
        assert_eq!(
            request.to_json().unwrap(),
            r#"{"name":"Ada","email":"ada@example.com","phone":"","items":[{"book_id":4,"qty":1},{"book_id":9,"qty":1}]}"#
        );
    }

    #[test]
    fn test_requires_contact() {
        let request = CheckoutRequest::from_cart("  ", "ada@example.com", "", &cart());
        assert!(matches!(
            request.validate(),
            Err(CommerceError::ValidationError(_))
        ));
    }

    #[test]
    fn test_requires_items() {
        let request = CheckoutRequest::from_cart("Ada", "ada@example.com", "", &Cart::new());
        assert!(request.validate().is_err());
    }
}
