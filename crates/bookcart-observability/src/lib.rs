//! Structured logging for the bookstore cart widget.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with component/page context
//! - `LogSink` - Where formatted entries go (stderr, `tracing`, memory)

mod logging;
mod sink;

pub use logging::*;
pub use sink::*;
