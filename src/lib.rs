//! chatblocks - agent reply post-processing
//!
//! Converts raw text produced by a language-model agent into typed render
//! blocks, and recognizes structured payloads embedded in that text so a chat
//! UI can show dedicated widgets instead of prose.
//!
//! # Overview
//!
//! - [`blocks`]: line tokenizer and inline bold segmentation
//! - [`detect`]: server-directory, route, trip and config-snippet detectors
//! - [`render`]: dispatch between a server directory and a block document
//! - [`enrich`]: concurrent documentation fetches for discovered servers
//! - [`directory`]: scraping and formatting of the server directory itself
//!
//! # Quick Start
//!
//! ```rust
//! use chatblocks::blocks::{tokenize, Block};
//! use chatblocks::render::{render_reply, RenderedReply};
//!
//! let blocks = tokenize("# Plan\n- [x] pick a route\n5. ride");
//! assert_eq!(blocks[0], Block::Heading { level: 1, text: "Plan".to_string() });
//! assert_eq!(blocks[2], Block::Ordered { text: "ride".to_string(), number: 5 });
//!
//! let reply = render_reply("Origin: (40.7589, -73.9851), Destination: (40.7794, -73.9632)");
//! match reply {
//!     RenderedReply::Document { route, .. } => assert!(route.is_some()),
//!     RenderedReply::ServerDirectory { .. } => unreachable!(),
//! }
//! ```

pub mod blocks;
pub mod config;
pub mod detect;
pub mod directory;
pub mod enrich;
pub mod error;
pub mod observability;
pub mod render;
pub mod testing;

pub use blocks::{segment, tokenize, Block};
pub use config::{ConfigError, ReplyConfig};
pub use detect::{
    detect_route, detect_server_list, detect_trip_summary, extract_config_snippet, ConfigSnippet,
    DocsLocator, RouteCoordinates, ServerEntry, TripSummary,
};
pub use enrich::{ConfigLookup, ConfigResolver, DocumentSource, HttpDocumentSource};
pub use error::{FetchError, ReplyError, ReplyResult};
pub use render::{render_reply, RenderedReply};
