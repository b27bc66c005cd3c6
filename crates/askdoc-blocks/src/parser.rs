//! Line-oriented parser from model responses to blocks.
//!
//! Each line outside a code fence is classified by an ordered rule list;
//! the first matching rule wins. Fenced code is collected verbatim until the
//! closing marker and emitted as a single code block.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::block::Block;
use crate::factory;

/// Opening and closing marker of a code fence.
const FENCE: &str = "```";

static NUMBERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\. ").unwrap());

/// Classification of a single line outside a code fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Heading { level: u8, text: &'a str },
    Toggle(&'a str),
    ToDo { checked: bool, text: &'a str },
    Bulleted(&'a str),
    Numbered(&'a str),
    Quote(&'a str),
    Divider,
    Blank,
    Paragraph(&'a str),
}

impl LineKind<'_> {
    /// Build the block for this line, if any.
    #[must_use]
    pub fn into_block(self) -> Option<Block> {
        match self {
            Self::Heading { level, text } => Some(factory::heading(text, level)),
            Self::Toggle(text) => Some(factory::toggle(text)),
            Self::ToDo { checked, text } => Some(factory::to_do(text, checked)),
            Self::Bulleted(text) => Some(factory::bulleted_list_item(text)),
            Self::Numbered(text) => Some(factory::numbered_list_item(text)),
            Self::Quote(text) => Some(factory::quote(text)),
            Self::Divider => Some(factory::divider()),
            Self::Blank => None,
            Self::Paragraph(text) => Some(factory::paragraph(text)),
        }
    }
}

/// A classification rule: returns `Some` when the line matches.
type Rule = fn(&str) -> Option<LineKind<'_>>;

/// Rules in priority order.
///
/// Heading levels are tested deepest first so `"## x"` never reaches the
/// level-1 rule, and to-do markers precede the generic bullet marker.
const RULES: &[Rule] = &[
    heading_3,
    heading_2,
    heading_1,
    toggle,
    unchecked_to_do,
    checked_to_do,
    bulleted,
    numbered,
    quote,
    divider,
    blank,
];

fn heading_3(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("### ")
        .map(|text| LineKind::Heading { level: 3, text })
}

fn heading_2(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("## ")
        .map(|text| LineKind::Heading { level: 2, text })
}

fn heading_1(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("# ")
        .map(|text| LineKind::Heading { level: 1, text })
}

fn toggle(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("::toggle ").map(LineKind::Toggle)
}

fn unchecked_to_do(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("- [ ] ").map(|text| LineKind::ToDo {
        checked: false,
        text,
    })
}

fn checked_to_do(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("- [x] ")
        .or_else(|| line.strip_prefix("- [X] "))
        .map(|text| LineKind::ToDo {
            checked: true,
            text,
        })
}

fn bulleted(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("- ").map(LineKind::Bulleted)
}

fn numbered(line: &str) -> Option<LineKind<'_>> {
    NUMBERED_RE
        .find(line)
        .map(|m| LineKind::Numbered(&line[m.end()..]))
}

fn quote(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("> ").map(LineKind::Quote)
}

fn divider(line: &str) -> Option<LineKind<'_>> {
    is_divider(line.trim()).then_some(LineKind::Divider)
}

fn blank(line: &str) -> Option<LineKind<'_>> {
    line.trim().is_empty().then_some(LineKind::Blank)
}

/// Whether a trimmed line is three or more identical `-`, `*` or `_`.
fn is_divider(trimmed: &str) -> bool {
    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && trimmed.len() >= 3 && chars.all(|c| c == first)
}

/// Classify a line that is outside any code fence.
///
/// The line is expected to have trailing whitespace stripped already.
#[must_use]
pub fn classify(line: &str) -> LineKind<'_> {
    RULES
        .iter()
        .find_map(|rule| rule(line))
        .unwrap_or(LineKind::Paragraph(line))
}

/// Code fence being collected.
#[derive(Debug)]
struct PendingFence {
    language: String,
    lines: Vec<String>,
}

/// Per-invocation parser state.
#[derive(Debug, Default)]
struct ParseState {
    fence: Option<PendingFence>,
    blocks: Vec<Block>,
}

impl ParseState {
    fn feed(&mut self, raw: &str) {
        let line = raw.trim_end();
        let trimmed = line.trim();

        if let Some(fence) = &mut self.fence {
            if trimmed == FENCE {
                let content = fence.lines.join("\n");
                self.blocks.push(factory::code(&content, &fence.language));
                self.fence = None;
            } else {
                fence.lines.push(line.to_owned());
            }
            return;
        }

        if let Some(language) = trimmed.strip_prefix(FENCE) {
            self.fence = Some(PendingFence {
                language: language.trim().to_owned(),
                lines: Vec::new(),
            });
            return;
        }

        if let Some(block) = classify(line).into_block() {
            self.blocks.push(block);
        }
    }

    fn finish(self) -> Vec<Block> {
        if let Some(fence) = self.fence {
            debug!(
                lines = fence.lines.len(),
                "Dropping unterminated code fence"
            );
        }
        self.blocks
    }
}

/// Parse a model response into an ordered list of blocks.
///
/// Never fails. An unterminated code fence at end of input is dropped.
///
/// # Examples
///
/// ```
/// use askdoc_blocks::parse_response;
///
/// let blocks = parse_response("# Title\n- item");
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].kind(), "heading_1");
/// assert_eq!(blocks[1].kind(), "bulleted_list_item");
/// ```
#[must_use]
pub fn parse_response(text: &str) -> Vec<Block> {
    let mut state = ParseState::default();
    for line in text.split('\n') {
        state.feed(line);
    }
    let blocks = state.finish();
    debug!(count = blocks.len(), "Parsed response into blocks");
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::RichText;
    use crate::factory::{
        bulleted_list_item, code, divider, heading, numbered_list_item, paragraph, quote, to_do,
        toggle,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn test_end_to_end_scenario() {
        let text = "# Title\n\nSome `code` here.\n- item one\n- [x] done\n```python\nprint(1)\n```";
        assert_eq!(
            parse_response(text),
            vec![
                heading("Title", 1),
                Block::Paragraph {
                    rich_text: vec![
                        RichText::plain("Some "),
                        RichText::code("code"),
                        RichText::plain(" here."),
                    ],
                },
                bulleted_list_item("item one"),
                to_do("done", true),
                code("print(1)", "python"),
            ]
        );
    }

    #[test]
    fn test_fenced_code_multiline() {
        let text = "```rust\nfn main() {\n    println!(\"hi\");\n}\n```";
        assert_eq!(
            parse_response(text),
            vec![code("fn main() {\n    println!(\"hi\");\n}", "rust")]
        );
    }

    #[test]
    fn test_fence_unknown_language_falls_back() {
        let blocks = parse_response("```brainfuck\n+++\n```");
        assert_eq!(blocks, vec![code("+++", "plain text")]);
        assert!(matches!(&blocks[0], Block::Code { language, .. } if language == "plain text"));
    }

    #[test]
    fn test_fence_without_language() {
        assert_eq!(parse_response("```\nx\n```"), vec![code("x", "plain text")]);
    }

    #[test]
    fn test_fence_language_case_and_whitespace() {
        assert_eq!(
            parse_response("```  JSON  \n{}\n```"),
            vec![code("{}", "json")]
        );
    }

    #[test]
    fn test_fence_interior_not_classified() {
        let text = "```markdown\n# not a heading\n- not a bullet\n\n---\n```";
        assert_eq!(
            parse_response(text),
            vec![code("# not a heading\n- not a bullet\n\n---", "markdown")]
        );
    }

    #[test]
    fn test_indented_fence_markers() {
        let text = "  ```bash\n  ls -la\n  ```";
        assert_eq!(parse_response(text), vec![code("  ls -la", "bash")]);
    }

    #[test]
    fn test_empty_fence() {
        assert_eq!(parse_response("```python\n```"), vec![code("", "python")]);
    }

    #[test]
    fn test_unterminated_fence_dropped() {
        let text = "intro\n```python\nprint(1)\nprint(2)";
        assert_eq!(parse_response(text), vec![paragraph("intro")]);
    }

    #[test]
    fn test_fence_with_trailing_text_does_not_close() {
        let text = "```python\nx\n```python\ny\n```";
        assert_eq!(
            parse_response(text),
            vec![code("x\n```python\ny", "python")]
        );
    }

    #[test]
    fn test_text_after_fence_resumes_classification() {
        let text = "```\na\n```\n## Next";
        assert_eq!(
            parse_response(text),
            vec![code("a", "plain text"), heading("Next", 2)]
        );
    }

    #[test]
    fn test_heading_precedence() {
        assert_eq!(parse_response("### x"), vec![heading("x", 3)]);
        assert_eq!(parse_response("## x"), vec![heading("x", 2)]);
        assert_eq!(parse_response("# x"), vec![heading("x", 1)]);
        assert_eq!(parse_response("#### x"), vec![paragraph("#### x")]);
        assert_eq!(parse_response("#x"), vec![paragraph("#x")]);
    }

    #[test]
    fn test_to_do_precedence() {
        assert_eq!(parse_response("- [ ] task"), vec![to_do("task", false)]);
        assert_eq!(parse_response("- [x] task"), vec![to_do("task", true)]);
        assert_eq!(parse_response("- [X] task"), vec![to_do("task", true)]);
        assert_eq!(
            parse_response("- [y] task"),
            vec![bulleted_list_item("[y] task")]
        );
    }

    #[test]
    fn test_toggle() {
        assert_eq!(
            parse_response("::toggle Details"),
            vec![toggle("Details")]
        );
        assert_eq!(
            parse_response("::toggle"),
            vec![paragraph("::toggle")]
        );
    }

    #[test]
    fn test_numbered_items() {
        assert_eq!(
            parse_response("1. first\n12. twelfth"),
            vec![numbered_list_item("first"), numbered_list_item("twelfth")]
        );
        assert_eq!(
            parse_response("3. a. b"),
            vec![numbered_list_item("a. b")]
        );
        assert_eq!(parse_response("1.no space"), vec![paragraph("1.no space")]);
    }

    #[test]
    fn test_quote() {
        assert_eq!(parse_response("> wise words"), vec![quote("wise words")]);
        assert_eq!(parse_response(">tight"), vec![paragraph(">tight")]);
    }

    #[test]
    fn test_dividers() {
        assert_eq!(parse_response("---"), vec![divider()]);
        assert_eq!(parse_response("***"), vec![divider()]);
        assert_eq!(parse_response("____"), vec![divider()]);
        assert_eq!(parse_response("   -----   "), vec![divider()]);
    }

    #[test]
    fn test_short_or_mixed_rule_is_paragraph() {
        assert_eq!(parse_response("--"), vec![paragraph("--")]);
        assert_eq!(parse_response("-*-"), vec![paragraph("-*-")]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        assert_eq!(
            parse_response("\n\n  \n- a\n\n- b\n\t\n"),
            vec![bulleted_list_item("a"), bulleted_list_item("b")]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_response("").is_empty());
    }

    #[test]
    fn test_trailing_whitespace_and_crlf_stripped() {
        assert_eq!(
            parse_response("# Title   \r\nbody\r\n"),
            vec![heading("Title", 1), paragraph("body")]
        );
    }

    #[test]
    fn test_leading_whitespace_blocks_prefix_rules() {
        assert_eq!(parse_response("  - nested"), vec![paragraph("  - nested")]);
    }

    #[test]
    fn test_classify_rules_individually() {
        assert_eq!(
            classify("### h"),
            LineKind::Heading { level: 3, text: "h" }
        );
        assert_eq!(
            classify("- [ ] t"),
            LineKind::ToDo {
                checked: false,
                text: "t"
            }
        );
        assert_eq!(classify("- b"), LineKind::Bulleted("b"));
        assert_eq!(classify("7. n"), LineKind::Numbered("n"));
        assert_eq!(classify("> q"), LineKind::Quote("q"));
        assert_eq!(classify("***"), LineKind::Divider);
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("text"), LineKind::Paragraph("text"));
    }

    #[test]
    fn test_one_block_per_line_in_order() {
        let text = "# a\n## b\n- c\n1. d\n> e\n---\nf";
        let kinds: Vec<_> = parse_response(text).iter().map(Block::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "heading_1",
                "heading_2",
                "bulleted_list_item",
                "numbered_list_item",
                "quote",
                "divider",
                "paragraph",
            ]
        );
    }
}
