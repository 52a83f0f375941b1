//! Book listings as the catalog page describes them.
//!
//! Catalog cards carry their book's identity and price in data attributes.
//! Everything read off the page is validated here before it can reach the
//! cart: ids and prices must be non-negative integers.

use crate::cart::NewCartItem;
use crate::error::CommerceError;
use crate::ids::BookId;
use crate::money::Kobo;

/// Raw attribute values read from a catalog card (or the modal's add button).
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingAttributes<'a> {
    pub id: Option<&'a str>,
    pub title: Option<&'a str>,
    pub price_kobo: Option<&'a str>,
    pub author: Option<&'a str>,
    pub cover: Option<&'a str>,
}

/// A validated book listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookListing {
    pub id: BookId,
    pub title: String,
    pub price_kobo: Kobo,
    pub author: Option<String>,
    pub cover: Option<String>,
}

impl BookListing {
    /// Validate raw attributes.
    ///
    /// - `id` is required and must be a non-negative integer.
    /// - `price_kobo` must be a non-negative integer; absent or blank means 0.
    /// - `title` defaults to empty; blank `author`/`cover` count as absent.
    pub fn from_attributes(attrs: ListingAttributes<'_>) -> Result<Self, CommerceError> {
        let raw_id = attrs.id.unwrap_or_default();
        let id = raw_id
            .parse::<BookId>()
            .map_err(|_| CommerceError::invalid_attribute("id", raw_id))?;

        let price_kobo = match non_blank(attrs.price_kobo) {
            Some(raw) => raw
                .parse::<Kobo>()
                .map_err(|_| CommerceError::invalid_attribute("price_kobo", raw))?,
            None => Kobo::ZERO,
        };

        Ok(Self {
            id,
            title: attrs.title.unwrap_or_default().to_string(),
            price_kobo,
            author: non_blank(attrs.author).map(str::to_string),
            cover: non_blank(attrs.cover).map(str::to_string),
        })
    }

    /// The "By ..." byline shown in the detail modal; empty without an author.
    pub fn byline(&self) -> String {
        self.author
            .as_deref()
            .map(|a| format!("By {}", a))
            .unwrap_or_default()
    }

    /// The item to add to the cart.
    pub fn to_cart_item(&self) -> NewCartItem {
        NewCartItem::new(self.id, self.title.clone(), self.price_kobo)
    }
}

impl From<BookListing> for NewCartItem {
    fn from(listing: BookListing) -> Self {
        NewCartItem::new(listing.id, listing.title, listing.price_kobo)
    }
}

/// Price for display-only elements: unreadable values show as zero.
pub fn display_price(raw: Option<&str>) -> Kobo {
    non_blank(raw)
        .and_then(|r| r.parse().ok())
        .unwrap_or(Kobo::ZERO)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
