//! Block model and its wire representation.
//!
//! Blocks serialize to the fixed page-database schema:
//!
//! ```text
//! {"object": "block", "type": K, K: {"rich_text": [...], ...kind fields}}
//! ```

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A span of text inside a block, optionally annotated as inline code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichText {
    /// Plain text content.
    pub content: String,
    /// Whether the run carries the code annotation.
    pub code: bool,
}

impl RichText {
    /// Create a plain-text run.
    #[must_use]
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            code: false,
        }
    }

    /// Create a run annotated as inline code.
    #[must_use]
    pub fn code(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            code: true,
        }
    }
}

impl Serialize for RichText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Text<'a> {
            content: &'a str,
        }

        #[derive(Serialize)]
        struct Annotations {
            code: bool,
        }

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "text")?;
        map.serialize_entry(
            "text",
            &Text {
                content: &self.content,
            },
        )?;
        if self.code {
            map.serialize_entry("annotations", &Annotations { code: true })?;
        }
        map.end()
    }
}

/// Heading level supported by the page-database schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Map a numeric level to a heading level.
    ///
    /// Anything outside 1-2 maps to [`HeadingLevel::H3`].
    #[must_use]
    pub fn from_level(level: u8) -> Self {
        match level {
            1 => Self::H1,
            2 => Self::H2,
            _ => Self::H3,
        }
    }
}

/// One typed unit of document content.
///
/// Blocks are built by the functions in [`crate::factory`] and are never
/// mutated afterwards; the appender consumes them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Paragraph with inline-code aware runs.
    Paragraph { rich_text: Vec<RichText> },
    /// Heading of level 1-3.
    Heading {
        level: HeadingLevel,
        rich_text: Vec<RichText>,
    },
    /// Bulleted list item.
    BulletedListItem { rich_text: Vec<RichText> },
    /// Numbered list item.
    NumberedListItem { rich_text: Vec<RichText> },
    /// To-do item.
    ToDo {
        rich_text: Vec<RichText>,
        checked: bool,
    },
    /// Quote.
    Quote { rich_text: Vec<RichText> },
    /// Toggle. Children are always empty.
    Toggle { rich_text: Vec<RichText> },
    /// Fenced code with a sanitized language tag.
    Code {
        rich_text: Vec<RichText>,
        language: String,
    },
    /// Callout with an emoji icon.
    Callout {
        rich_text: Vec<RichText>,
        emoji: String,
    },
    /// Horizontal divider.
    Divider,
}

impl Block {
    /// Discriminator name used on the wire.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Paragraph { .. } => "paragraph",
            Self::Heading { level, .. } => match level {
                HeadingLevel::H1 => "heading_1",
                HeadingLevel::H2 => "heading_2",
                HeadingLevel::H3 => "heading_3",
            },
            Self::BulletedListItem { .. } => "bulleted_list_item",
            Self::NumberedListItem { .. } => "numbered_list_item",
            Self::ToDo { .. } => "to_do",
            Self::Quote { .. } => "quote",
            Self::Toggle { .. } => "toggle",
            Self::Code { .. } => "code",
            Self::Callout { .. } => "callout",
            Self::Divider => "divider",
        }
    }

    /// Rich-text runs of the block (empty for dividers).
    #[must_use]
    pub fn rich_text(&self) -> &[RichText] {
        match self {
            Self::Paragraph { rich_text }
            | Self::Heading { rich_text, .. }
            | Self::BulletedListItem { rich_text }
            | Self::NumberedListItem { rich_text }
            | Self::ToDo { rich_text, .. }
            | Self::Quote { rich_text }
            | Self::Toggle { rich_text }
            | Self::Code { rich_text, .. }
            | Self::Callout { rich_text, .. } => rich_text,
            Self::Divider => &[],
        }
    }

    /// Concatenated content of all runs.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.rich_text().iter().map(|r| r.content.as_str()).collect()
    }
}

const NO_CHILDREN: &[Block] = &[];

/// Kind-named payload object.
#[derive(Serialize)]
struct Payload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    rich_text: Option<&'a [RichText]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    checked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<Icon<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<&'a [Block]>,
}

#[derive(Serialize)]
struct Icon<'a> {
    #[serde(rename = "type")]
    icon_type: &'static str,
    emoji: &'a str,
}

impl Block {
    fn payload(&self) -> Payload<'_> {
        let mut payload = Payload {
            rich_text: None,
            language: None,
            checked: None,
            icon: None,
            children: None,
        };
        if !matches!(self, Self::Divider) {
            payload.rich_text = Some(self.rich_text());
        }
        match self {
            Self::ToDo { checked, .. } => payload.checked = Some(*checked),
            Self::Toggle { .. } => payload.children = Some(NO_CHILDREN),
            Self::Code { language, .. } => payload.language = Some(language.as_str()),
            Self::Callout { emoji, .. } => {
                payload.icon = Some(Icon {
                    icon_type: "emoji",
                    emoji: emoji.as_str(),
                });
            }
            _ => {}
        }
        payload
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("object", "block")?;
        map.serialize_entry("type", kind)?;
        map.serialize_entry(kind, &self.payload())?;
        map.end()
    }
}
