//! Typed render blocks for agent replies
//!
//! Agent text is classified line by line into [`Block`] values. The block
//! sequence is produced fresh for every message and carries no identity
//! beyond its position.

pub mod emphasis;
pub mod tokenizer;

pub use emphasis::segment;
pub use tokenizer::tokenize;

use serde::{Deserialize, Serialize};

/// One classified, renderable unit derived from a line or span of agent text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// `#`, `##` or `###` heading
    Heading { level: u8, text: String },
    /// Bold span with its markers stripped
    Bold { text: String },
    /// Italic span with its markers stripped
    Italic { text: String },
    /// `-` or `*` list item
    Bullet { text: String },
    /// Numbered list item, `number` is the one written in the source
    Ordered { text: String, number: u64 },
    /// `- [ ]` / `- [x]` task item
    Checklist { text: String, checked: bool },
    /// Fenced code region; `language` is empty when the fence declared none
    Code { code: String, language: String },
    /// First backtick span found on a line
    InlineCode { code: String },
    /// First `[text](url)` found on a line
    Link { text: String, url: String },
    /// Anything else
    Paragraph { text: String },
}

impl Block {
    /// Visible text of the block, without any markup
    pub fn text(&self) -> &str {
        match self {
            Block::Heading { text, .. }
            | Block::Bold { text }
            | Block::Italic { text }
            | Block::Bullet { text }
            | Block::Ordered { text, .. }
            | Block::Checklist { text, .. }
            | Block::Link { text, .. }
            | Block::Paragraph { text } => text,
            Block::Code { code, .. } | Block::InlineCode { code } => code,
        }
    }

    /// Variant name as it appears in serialized output
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Bold { .. } => "bold",
            Block::Italic { .. } => "italic",
            Block::Bullet { .. } => "bullet",
            Block::Ordered { .. } => "ordered",
            Block::Checklist { .. } => "checklist",
            Block::Code { .. } => "code",
            Block::InlineCode { .. } => "inline_code",
            Block::Link { .. } => "link",
            Block::Paragraph { .. } => "paragraph",
        }
    }

    pub(crate) fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    pub(crate) fn bold(text: impl Into<String>) -> Self {
        Block::Bold { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_serializes_with_type_tag() {
        let block = Block::Ordered {
            text: "skip ahead".to_string(),
            number: 5,
        };

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({"type": "ordered", "text": "skip ahead", "number": 5})
        );
    }

    #[test]
    fn test_inline_code_tag_is_snake_case() {
        let block = Block::InlineCode {
            code: "cargo run".to_string(),
        };

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "inline_code");
        assert_eq!(block.kind(), "inline_code");
    }

    #[test]
    fn test_text_returns_code_for_code_blocks() {
        let block = Block::Code {
            code: "fn main() {}\n".to_string(),
            language: "rust".to_string(),
        };
        assert_eq!(block.text(), "fn main() {}\n");
    }

    #[test]
    fn test_block_deserializes_from_tagged_json() {
        let block: Block =
            serde_json::from_value(json!({"type": "checklist", "text": "done", "checked": true}))
                .unwrap();
        assert_eq!(
            block,
            Block::Checklist {
                text: "done".to_string(),
                checked: true
            }
        );
    }
}
