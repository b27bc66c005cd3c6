//! Block constructors.
//!
//! One constructor per block kind. Constructors never fail: empty content
//! yields a block with a single empty run.

use crate::block::{Block, HeadingLevel, RichText};
use crate::inline::split_inline_code;

/// Heading level used when none is specified.
pub const DEFAULT_HEADING_LEVEL: u8 = 3;

/// Code language used when none is specified.
pub const DEFAULT_CODE_LANGUAGE: &str = "python";

/// Language tag substituted for anything outside [`CODE_LANGUAGES`].
pub const FALLBACK_LANGUAGE: &str = "plain text";

/// Emoji used for callouts when none is specified.
pub const DEFAULT_CALLOUT_EMOJI: &str = "❓";

/// Language tags accepted by the page-database service.
pub const CODE_LANGUAGES: &[&str] = &[
    "python",
    "javascript",
    "bash",
    "html",
    "css",
    "json",
    "java",
    "c",
    "c++",
    "c#",
    "markdown",
    "typescript",
    "yaml",
    "sql",
    "swift",
    "go",
    "ruby",
    "rust",
    "plain text",
    "shell",
    "php",
    "kotlin",
    "dart",
    "vb.net",
    "xml",
    "scss",
    "lua",
    "perl",
    "r",
    "haskell",
    "scala",
    "elixir",
];

/// Normalize a code language tag.
///
/// Tags are trimmed and lowercased; unrecognized tags become
/// [`FALLBACK_LANGUAGE`].
///
/// # Examples
///
/// ```
/// use askdoc_blocks::sanitize_language;
///
/// assert_eq!(sanitize_language(" Rust "), "rust");
/// assert_eq!(sanitize_language("brainfuck"), "plain text");
/// ```
#[must_use]
pub fn sanitize_language(language: &str) -> String {
    let normalized = language.trim().to_lowercase();
    if CODE_LANGUAGES.contains(&normalized.as_str()) {
        normalized
    } else {
        FALLBACK_LANGUAGE.to_owned()
    }
}

fn single_run(content: &str) -> Vec<RichText> {
    vec![RichText::plain(content)]
}

/// Paragraph block; inline code spans become annotated runs.
#[must_use]
pub fn paragraph(content: &str) -> Block {
    Block::Paragraph {
        rich_text: split_inline_code(content),
    }
}

/// Heading block. Levels outside 1-3 become level 3.
#[must_use]
pub fn heading(content: &str, level: u8) -> Block {
    Block::Heading {
        level: HeadingLevel::from_level(level),
        rich_text: single_run(content),
    }
}

/// Code block with a sanitized language tag.
#[must_use]
pub fn code(content: &str, language: &str) -> Block {
    Block::Code {
        rich_text: single_run(content),
        language: sanitize_language(language),
    }
}

#[must_use]
pub fn bulleted_list_item(content: &str) -> Block {
    Block::BulletedListItem {
        rich_text: single_run(content),
    }
}

#[must_use]
pub fn numbered_list_item(content: &str) -> Block {
    Block::NumberedListItem {
        rich_text: single_run(content),
    }
}

#[must_use]
pub fn to_do(content: &str, checked: bool) -> Block {
    Block::ToDo {
        rich_text: single_run(content),
        checked,
    }
}

#[must_use]
pub fn quote(content: &str) -> Block {
    Block::Quote {
        rich_text: single_run(content),
    }
}

/// Toggle block with no children.
#[must_use]
pub fn toggle(content: &str) -> Block {
    Block::Toggle {
        rich_text: single_run(content),
    }
}

#[must_use]
pub fn callout(content: &str, emoji: &str) -> Block {
    Block::Callout {
        rich_text: single_run(content),
        emoji: emoji.to_owned(),
    }
}

#[must_use]
pub fn divider() -> Block {
    Block::Divider
}
