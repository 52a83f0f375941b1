//! Bookstore cart widget - browser workload.
//!
//! Keeps the visitor's cart in local storage and wires it into the
//! server-rendered catalog and cart pages:
//! - a badge with the item count
//! - naira formatting for every kobo price on the page
//! - add-to-cart buttons on catalog cards, with brief "Added ✓" feedback
//! - a product detail modal opened by click or Enter
//! - the cart page table with remove buttons, total and checkout
//!
//! The widget talks to the page only through [`UiPort`], so the whole flow
//! runs against an in-memory surface in tests. Build with the `browser`
//! feature for `wasm32-unknown-unknown` to get the DOM binding and the
//! `wasm-bindgen` start function.

pub mod config;
pub mod render;
pub mod ui;

mod modal;
mod widget;

#[cfg(all(feature = "browser", target_arch = "wasm32"))]
pub mod dom;

pub use config::WidgetConfig;
pub use ui::{Callback, KeyCallback, UiPort};
pub use widget::{storage_or_memory, Widget};
