//! Widget configuration.
//!
//! Every field has a default matching the bookstore's templates, so an
//! empty document is a valid configuration. Pages may override any part
//! of it with an inline JSON block; TOML is accepted for native tooling.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use bookcart_commerce::cart::DEFAULT_CART_KEY;
use bookcart_observability::{LogFormat, LogLevel, LogSink, StructuredLogger};

/// Widget configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Local storage key holding the cart.
    pub storage_key: String,

    /// Where the checkout button navigates.
    pub checkout_path: String,

    /// How long "Added ✓" stays on an add button, in milliseconds.
    pub feedback_ms: u64,

    /// Logging configuration.
    pub log: LogConfig,

    /// Element ids and classes the widget binds to.
    pub dom: DomConfig,

    /// User-facing strings.
    pub text: TextConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_CART_KEY.to_string(),
            checkout_path: "/checkout/".to_string(),
            feedback_ms: 900,
            log: LogConfig::default(),
            dom: DomConfig::default(),
            text: TextConfig::default(),
        }
    }
}

impl WidgetConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML widget config")
    }

    /// Parse a JSON document (the inline page config format).
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse JSON widget config")
    }

    /// Build the root logger described by `log`, writing to `sink`.
    pub fn logger(&self, sink: impl LogSink + 'static) -> StructuredLogger {
        StructuredLogger::new("bookcart")
            .with_min_level(self.log.level)
            .with_format(self.log.format)
            .with_sink(sink)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Human,
        }
    }
}

/// The page contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomConfig {
    pub badge_id: String,
    pub cart_root_id: String,
    pub checkout_button_id: String,

    /// Class of elements whose text is a formatted price.
    pub price_class: String,
    /// Attribute on price elements holding the amount in kobo.
    pub price_attribute: String,

    pub card_class: String,
    pub add_button_class: String,
    pub details_button_class: String,
    pub cover_class: String,
    pub remove_button_class: String,

    pub modal_id: String,
    pub modal_title_id: String,
    pub modal_author_id: String,
    pub modal_price_id: String,
    pub modal_cover_id: String,
    pub modal_add_id: String,
    /// Event the modal library fires once the dialog is fully hidden.
    pub modal_hidden_event: String,

    /// Present only on the order confirmation page.
    pub order_complete_id: String,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            badge_id: "cart-badge".to_string(),
            cart_root_id: "cart-root".to_string(),
            checkout_button_id: "proceed-to-checkout".to_string(),
            price_class: "price-value".to_string(),
            price_attribute: "data-kobo".to_string(),
            card_class: "book-card".to_string(),
            add_button_class: "add-to-cart".to_string(),
            details_button_class: "view-details".to_string(),
            cover_class: "cover".to_string(),
            remove_button_class: "remove-item".to_string(),
            modal_id: "product-modal".to_string(),
            modal_title_id: "modal-title".to_string(),
            modal_author_id: "modal-author".to_string(),
            modal_price_id: "modal-price".to_string(),
            modal_cover_id: "modal-cover-img".to_string(),
            modal_add_id: "modal-add".to_string(),
            modal_hidden_event: "hidden.bs.modal".to_string(),
            order_complete_id: "order-complete".to_string(),
        }
    }
}

impl DomConfig {
    /// Selector for price elements that carry an amount.
    pub fn price_selector(&self) -> String {
        format!(".{}[{}]", self.price_class, self.price_attribute)
    }
}

/// Selector matching elements with `class`.
pub fn class_selector(class: &str) -> String {
    format!(".{}", class)
}

/// User-facing strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub add_label: String,
    pub added_label: String,
    pub duplicate_notice: String,
    pub empty_cart: String,
    pub remove_label: String,
    pub checkout_label: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            add_label: "Add to cart".to_string(),
            added_label: "Added \u{2713}".to_string(),
            duplicate_notice: "This book is already in your cart.".to_string(),
            empty_cart: "Your cart is empty.".to_string(),
            remove_label: "Remove".to_string(),
            checkout_label: "Proceed to Checkout".to_string(),
        }
    }
}
