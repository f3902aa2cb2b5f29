//! Structured payload detection
//!
//! Pure extractors that scan raw agent text (never the tokenized blocks) for
//! shapes the UI renders with a dedicated widget. A detector that finds
//! nothing returns `None`; that is the expected path, not an error.

pub mod config_snippet;
pub mod route;
pub mod server_list;
pub mod trip;

pub use config_snippet::{extract_config_snippet, ConfigSnippet, DocsLocator};
pub use route::{detect_route, LatLon, RouteCoordinates};
pub use server_list::{detect_server_list, ServerEntry};
pub use trip::{detect_trip_summary, TripSummary};
