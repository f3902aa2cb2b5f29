//! Observability for chatblocks
//!
//! Structured logging through `tracing`, plus span macros for render passes
//! and documentation fetches.

pub mod logging;

pub use logging::{init_default_logging, init_logging, parse_level, LogFormat};

// Span macros for structured logging
pub use logging::{fetch_span, render_span};
