//! Reply dispatch
//!
//! Decides what the UI receives for one agent message. Structured payload
//! detectors run first against the raw text; a server directory replaces
//! block rendering entirely, while route and trip payloads ride along with
//! the block sequence.

use crate::blocks::{tokenize, Block};
use crate::detect::{
    detect_route, detect_server_list, detect_trip_summary, RouteCoordinates, ServerEntry,
    TripSummary,
};
use crate::render_span;
use serde::Serialize;
use tracing::debug;

/// Renderable form of one agent message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedReply {
    /// Directory listing; rendered as server cards instead of text
    ServerDirectory { entries: Vec<ServerEntry> },
    /// Ordinary reply with optional widgets next to it
    Document {
        blocks: Vec<Block>,
        #[serde(skip_serializing_if = "Option::is_none")]
        route: Option<RouteCoordinates>,
        #[serde(skip_serializing_if = "Option::is_none")]
        trip: Option<TripSummary>,
    },
}

impl RenderedReply {
    pub fn blocks(&self) -> &[Block] {
        match self {
            RenderedReply::Document { blocks, .. } => blocks,
            RenderedReply::ServerDirectory { .. } => &[],
        }
    }

    pub fn server_entries(&self) -> Option<&[ServerEntry]> {
        match self {
            RenderedReply::ServerDirectory { entries } => Some(entries),
            RenderedReply::Document { .. } => None,
        }
    }
}

/// Classify one agent message
pub fn render_reply(text: &str) -> RenderedReply {
    let span = render_span!(bytes = text.len());
    let _guard = span.enter();

    if let Some(entries) = detect_server_list(text) {
        debug!(entries = entries.len(), "Rendering as server directory");
        return RenderedReply::ServerDirectory { entries };
    }

    let blocks = tokenize(text);
    let route = detect_route(text);
    let trip = detect_trip_summary(text);
    debug!(
        blocks = blocks.len(),
        route = route.is_some(),
        trip = trip.is_some(),
        "Rendering as document"
    );

    RenderedReply::Document {
        blocks,
        route,
        trip,
    }
}
