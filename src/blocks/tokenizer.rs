//! Line-oriented block tokenizer
//!
//! Classifies agent text one line at a time. The only state carried between
//! lines is the open code fence, if any, which is threaded through a fold over
//! the input instead of living in shared mutable state.
//!
//! Outside a fence the first matching rule wins:
//!
//! 1. heading (`### `, `## `, `# `)
//! 2. checklist (`- [ ] `, `- [x] `)
//! 3. bullet (`- `, `* `)
//! 4. ordered (`12. `)
//! 5. inline code (first backtick span)
//! 6. link (first `[text](url)`)
//! 7. whole-line bold (`**...**` or `__...__`)
//! 8. inline bold segmentation
//! 9. italic (first `*...*`)
//! 10. paragraph
//!
//! Rules 5, 6 and 9 keep only the matched span; the rest of the line is
//! discarded. Consumers depend on that, so it is preserved as-is.

use super::emphasis::{segment, BOLD_SPAN};
use super::Block;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*```(\S*)").expect("fence pattern is valid"));
static CHECKLIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^- \[([ xX])\] (.*)$").expect("checklist pattern is valid"));
static ORDERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\. (.*)$").expect("ordered pattern is valid"));
static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("inline code pattern is valid"));
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid"));
static ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*]+)\*").expect("italic pattern is valid"));

const HEADING_PREFIXES: [(&str, u8); 3] = [("### ", 3), ("## ", 2), ("# ", 1)];
const BOLD_MARKERS: [&str; 2] = ["**", "__"];

/// Convert raw agent text into an ordered block sequence
///
/// Never fails. Blank lines, and lines left empty once their markers are
/// stripped, produce nothing. Text after an unterminated opening fence is
/// never emitted.
pub fn tokenize(text: &str) -> Vec<Block> {
    text.lines()
        .fold(TokenizerState::default(), TokenizerState::feed)
        .finish()
}

/// Code fence that has been opened but not yet closed
#[derive(Debug, Default)]
struct OpenFence {
    language: String,
    code: String,
}

/// Accumulator threaded through the line fold
#[derive(Debug, Default)]
struct TokenizerState {
    blocks: Vec<Block>,
    fence: Option<OpenFence>,
}

impl TokenizerState {
    fn feed(mut self, line: &str) -> Self {
        if let Some(caps) = FENCE.captures(line) {
            match self.fence.take() {
                Some(open) => self.blocks.push(Block::Code {
                    code: open.code,
                    language: open.language,
                }),
                None => {
                    self.fence = Some(OpenFence {
                        language: caps
                            .get(1)
                            .map(|m| m.as_str().to_string())
                            .unwrap_or_default(),
                        code: String::new(),
                    })
                }
            }
            return self;
        }

        match self.fence.as_mut() {
            Some(open) => {
                open.code.push_str(line);
                open.code.push('\n');
            }
            None => classify_line(line, &mut self.blocks),
        }
        self
    }

    fn finish(self) -> Vec<Block> {
        if let Some(open) = &self.fence {
            trace!(
                language = %open.language,
                dropped_bytes = open.code.len(),
                "Unterminated code fence, dropping its content"
            );
        }
        self.blocks
    }
}

/// Apply the outside-fence rules to one line, appending whatever it produces
fn classify_line(line: &str, blocks: &mut Vec<Block>) {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return;
    }

    if let Some((level, rest)) = heading(line) {
        push_non_empty(blocks, rest, |text| Block::Heading { level, text });
        return;
    }

    if let Some(caps) = CHECKLIST.captures(line) {
        let checked = &caps[1] != " ";
        push_non_empty(blocks, &caps[2], |text| Block::Checklist { text, checked });
        return;
    }

    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        push_non_empty(blocks, rest, |text| Block::Bullet { text });
        return;
    }

    if let Some(caps) = ORDERED.captures(line) {
        let number = leading_number(line);
        push_non_empty(blocks, &caps[2], |text| Block::Ordered { text, number });
        return;
    }

    if let Some(caps) = INLINE_CODE.captures(line) {
        push_non_empty(blocks, &caps[1], |code| Block::InlineCode { code });
        return;
    }

    if let Some(caps) = LINK.captures(line) {
        let url = caps[2].trim().to_string();
        push_non_empty(blocks, &caps[1], |text| Block::Link { text, url });
        return;
    }

    if let Some(inner) = whole_line_bold(trimmed) {
        push_non_empty(blocks, inner, |text| Block::Bold { text });
        return;
    }

    if BOLD_SPAN.is_match(line) {
        blocks.extend(segment(line));
        return;
    }

    if let Some(caps) = ITALIC.captures(line) {
        push_non_empty(blocks, &caps[1], |text| Block::Italic { text });
        return;
    }

    blocks.push(Block::paragraph(line));
}

fn heading(line: &str) -> Option<(u8, &str)> {
    HEADING_PREFIXES
        .iter()
        .find_map(|(prefix, level)| line.strip_prefix(prefix).map(|rest| (*level, rest)))
}

/// Inner text when the whole (trimmed) line is exactly one bold span
fn whole_line_bold(trimmed: &str) -> Option<&str> {
    BOLD_MARKERS.iter().find_map(|marker| {
        let inner = trimmed.strip_prefix(marker)?.strip_suffix(marker)?;
        (!inner.contains(marker)).then_some(inner)
    })
}

/// Number formed by the leading digit run of the line
fn leading_number(line: &str) -> u64 {
    let digits: String = line.chars().take_while(char::is_ascii_digit).collect();
    // Runs too long for u64 saturate rather than fail
    digits.parse().unwrap_or(u64::MAX)
}

fn push_non_empty(blocks: &mut Vec<Block>, raw: &str, build: impl FnOnce(String) -> Block) {
    let text = raw.trim();
    if !text.is_empty() {
        blocks.push(build(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paragraph(text: &str) -> Block {
        Block::paragraph(text)
    }

    #[test]
    fn test_fenced_code_with_language() {
        let blocks = tokenize("```lang\nA\nB\n```");
        assert_eq!(
            blocks,
            vec![Block::Code {
                code: "A\nB\n".to_string(),
                language: "lang".to_string()
            }]
        );
    }

    #[test]
    fn test_fence_without_language_keeps_blank_lines() {
        let blocks = tokenize("```\nfirst\n\nthird\n```\nafter");
        assert_eq!(
            blocks,
            vec![
                Block::Code {
                    code: "first\n\nthird\n".to_string(),
                    language: String::new()
                },
                paragraph("after"),
            ]
        );
    }

    #[test]
    fn test_markup_inside_fence_is_not_classified() {
        let blocks = tokenize("```md\n# not a heading\n- not a bullet\n```");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), "# not a heading\n- not a bullet\n");
    }

    #[test]
    fn test_unterminated_fence_is_dropped() {
        let blocks = tokenize("before\n```rust\nfn main() {}\n");
        assert_eq!(blocks, vec![paragraph("before")]);
    }

    #[test]
    fn test_heading_levels_longest_prefix_first() {
        let blocks = tokenize("# One\n## Two\n### Three");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "One".to_string()
                },
                Block::Heading {
                    level: 2,
                    text: "Two".to_string()
                },
                Block::Heading {
                    level: 3,
                    text: "Three".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_four_hashes_is_not_a_heading() {
        assert_eq!(tokenize("#### Deep"), vec![paragraph("#### Deep")]);
    }

    #[test]
    fn test_checklist_states() {
        let blocks = tokenize("- [ ] buy milk\n- [x] done\n- [X] also done");
        assert_eq!(
            blocks,
            vec![
                Block::Checklist {
                    text: "buy milk".to_string(),
                    checked: false
                },
                Block::Checklist {
                    text: "done".to_string(),
                    checked: true
                },
                Block::Checklist {
                    text: "also done".to_string(),
                    checked: true
                },
            ]
        );
    }

    #[test]
    fn test_malformed_checklist_falls_through_to_bullet() {
        let blocks = tokenize("- [ buy milk\n- [y] maybe");
        assert_eq!(
            blocks,
            vec![
                Block::Bullet {
                    text: "[ buy milk".to_string()
                },
                Block::Bullet {
                    text: "[y] maybe".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_bullets_with_dash_and_star() {
        let blocks = tokenize("- apples\n* pears");
        assert_eq!(
            blocks,
            vec![
                Block::Bullet {
                    text: "apples".to_string()
                },
                Block::Bullet {
                    text: "pears".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_bolded_bullet_stays_a_bullet() {
        let blocks = tokenize("- **important** item");
        assert_eq!(
            blocks,
            vec![Block::Bullet {
                text: "**important** item".to_string()
            }]
        );
    }

    #[test]
    fn test_ordered_uses_source_number() {
        let blocks = tokenize("5. skip ahead\n12. twelfth");
        assert_eq!(
            blocks,
            vec![
                Block::Ordered {
                    text: "skip ahead".to_string(),
                    number: 5
                },
                Block::Ordered {
                    text: "twelfth".to_string(),
                    number: 12
                },
            ]
        );
    }

    #[test]
    fn test_empty_after_marker_is_dropped() {
        assert!(tokenize("# \n-  \n3.  \n- [x]  ").is_empty());
    }

    #[test]
    fn test_whitespace_only_spans_are_dropped() {
        assert!(tokenize("** **\nx ` ` y\n[ ](u)\na *  * b\n__  __").is_empty());
    }

    #[test]
    fn test_span_text_is_trimmed() {
        let blocks = tokenize(
            "** padded **\nsee [ docs ]( https://x.dev )\nrun ` ls ` now\nan * aside * here",
        );
        assert_eq!(
            blocks,
            vec![
                Block::bold("padded"),
                Block::Link {
                    text: "docs".to_string(),
                    url: "https://x.dev".to_string()
                },
                Block::InlineCode {
                    code: "ls".to_string()
                },
                Block::Italic {
                    text: "aside".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_inline_code_discards_surrounding_text() {
        let blocks = tokenize("Run `cargo test` and then `cargo run`");
        assert_eq!(
            blocks,
            vec![Block::InlineCode {
                code: "cargo test".to_string()
            }]
        );
    }

    #[test]
    fn test_inline_code_wins_over_link() {
        let blocks = tokenize("see `x` at [docs](https://example.com)");
        assert_eq!(blocks[0].kind(), "inline_code");
    }

    #[test]
    fn test_link_discards_surrounding_text() {
        let blocks = tokenize("Read the [guide](https://example.com/guide) first.");
        assert_eq!(
            blocks,
            vec![Block::Link {
                text: "guide".to_string(),
                url: "https://example.com/guide".to_string()
            }]
        );
    }

    #[test]
    fn test_link_url_with_emphasis_chars_is_not_italic() {
        let blocks = tokenize("[a](https://example.com/*path*)");
        assert_eq!(blocks[0].kind(), "link");
    }

    #[test]
    fn test_whole_line_bold_both_markers() {
        let blocks = tokenize("  **Summary**  \n__Notes__");
        assert_eq!(blocks, vec![Block::bold("Summary"), Block::bold("Notes")]);
    }

    #[test]
    fn test_two_bold_spans_are_segmented_not_merged() {
        let blocks = tokenize("**a** and **b**");
        assert_eq!(
            blocks,
            vec![
                Block::bold("a"),
                Block::paragraph(" and "),
                Block::bold("b"),
            ]
        );
    }

    #[test]
    fn test_inline_bold_segmentation() {
        let blocks = tokenize("Hello **world** and **you**");
        let kinds: Vec<_> = blocks.iter().map(Block::kind).collect();
        assert_eq!(kinds, vec!["paragraph", "bold", "paragraph", "bold"]);
        let text: String = blocks.iter().map(Block::text).collect();
        assert_eq!(text, "Hello world and you");
    }

    #[test]
    fn test_italic_keeps_first_span_only() {
        let blocks = tokenize("this is *very* and *quite* nice");
        assert_eq!(
            blocks,
            vec![Block::Italic {
                text: "very".to_string()
            }]
        );
    }

    #[test]
    fn test_paragraph_keeps_raw_line() {
        let blocks = tokenize("   indented text  ");
        assert_eq!(blocks, vec![paragraph("   indented text  ")]);
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let blocks = tokenize("one\n\n   \n\ttwo");
        assert_eq!(blocks, vec![paragraph("one"), paragraph("\ttwo")]);
    }

    #[test]
    fn test_crlf_input() {
        let blocks = tokenize("# Title\r\nbody\r\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1], paragraph("body"));
    }

    #[test]
    fn test_leading_number_saturates() {
        assert_eq!(leading_number("99999999999999999999999. x"), u64::MAX);
    }

    proptest! {
        #[test]
        fn plain_lines_become_one_paragraph_each(
            lines in proptest::collection::vec("[a-zA-Z][a-zA-Z ,.!?]{0,30}", 0..8)
        ) {
            let text = lines.join("\n");
            let blocks = tokenize(&text);
            let expected: Vec<Block> = lines.iter().map(|l| Block::paragraph(l.as_str())).collect();
            prop_assert_eq!(blocks, expected);
        }

        #[test]
        fn reserialized_paragraphs_tokenize_identically(
            lines in proptest::collection::vec("[a-zA-Z][a-zA-Z ,.!?]{0,30}", 0..8)
        ) {
            let first = tokenize(&lines.join("\n"));
            let reserialized = first.iter().map(Block::text).collect::<Vec<_>>().join("\n");
            prop_assert_eq!(tokenize(&reserialized), first);
        }

        #[test]
        fn tokenize_never_panics(text in "\\PC{0,200}") {
            let _ = tokenize(&text);
        }
    }
}
