//! Inline bold segmentation
//!
//! Splits one line into alternating plain and bold spans using `**...**` as
//! the delimiter. Only the markers are dropped; every other character of the
//! line ends up in exactly one emitted block, in order.

use super::Block;
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) static BOLD_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold span pattern is valid"));

/// Split `line` into paragraph and bold blocks
///
/// Empty plain spans (between adjacent bold spans, or at the line edges) and
/// whitespace-only bold spans are dropped. Everything else is kept verbatim,
/// whitespace included.
pub fn segment(line: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut cursor = 0;

    for caps in BOLD_SPAN.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        push_plain(&mut blocks, &line[cursor..whole.start()]);
        if !inner.as_str().trim().is_empty() {
            blocks.push(Block::bold(inner.as_str()));
        }
        cursor = whole.end();
    }

    push_plain(&mut blocks, &line[cursor..]);
    blocks
}

fn push_plain(blocks: &mut Vec<Block>, span: &str) {
    if !span.is_empty() {
        blocks.push(Block::paragraph(span));
    }
}
