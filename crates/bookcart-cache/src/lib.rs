//! Type-safe key-value storage layer for the bookstore cart.
//!
//! The cart lives under a single key in a string key-value store. In the
//! browser that store is `window.localStorage`; in tests it is an in-memory
//! map. [`Cache`] adds automatic JSON serialization on top of any
//! [`Storage`] backend.
//!
//! # Example
//!
//! ```rust
//! use bookcart_cache::{Cache, MemoryStorage};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Line {
//!     id: u64,
//! }
//!
//! let cache = Cache::new(MemoryStorage::new());
//! cache.set("cart", &vec![Line { id: 1 }]).unwrap();
//!
//! let lines: Option<Vec<Line>> = cache.get("cart").unwrap();
//! assert_eq!(lines, Some(vec![Line { id: 1 }]));
//! ```

mod error;
mod kv;
mod storage;

pub use error::CacheError;
pub use kv::Cache;
pub use storage::{MemoryStorage, Storage};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, MemoryStorage, Storage};
}
