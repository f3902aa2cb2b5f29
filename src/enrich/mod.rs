//! Server entry enrichment
//!
//! For every server entry found in a directory reply, fetch the server's
//! documentation and look for its registration snippet. Lookups run
//! concurrently and independently; a failed fetch only affects its own entry.

pub mod resolver;
pub mod source;

pub use resolver::{ConfigLookup, ConfigResolver, EnrichedEntry};
pub use source::{DocumentSource, HttpDocumentSource};
