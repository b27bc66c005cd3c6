//! Request and response payloads for the page-database API.

use std::collections::BTreeMap;

use askdoc_blocks::Block;
use serde::{Deserialize, Serialize};

/// Database that new conversation pages are created in.
#[derive(Debug, Clone)]
pub struct DatabaseTarget {
    /// Parent database ID.
    pub database_id: String,
    /// Name of the title property.
    pub title_property: String,
    /// Name of the date property (`None` skips the date).
    pub date_property: Option<String>,
}

/// Body of `POST /pages`.
#[derive(Debug, Serialize)]
pub(crate) struct CreatePageRequest<'a> {
    pub(crate) parent: Parent<'a>,
    pub(crate) properties: BTreeMap<&'a str, PropertyValue<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Parent<'a> {
    pub(crate) database_id: &'a str,
}

/// Page property value.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PropertyValue<'a> {
    Title(Vec<TitleText<'a>>),
    Date { start: String },
}

#[derive(Debug, Serialize)]
pub(crate) struct TitleText<'a> {
    pub(crate) text: TextContent<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TextContent<'a> {
    pub(crate) content: &'a str,
}

impl<'a> CreatePageRequest<'a> {
    /// Build a page creation request for `title`, dated `date` when the
    /// target has a date property.
    pub(crate) fn new(target: &'a DatabaseTarget, title: &'a str, date: String) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(
            target.title_property.as_str(),
            PropertyValue::Title(vec![TitleText {
                text: TextContent { content: title },
            }]),
        );
        if let Some(date_property) = target.date_property.as_deref() {
            properties.insert(date_property, PropertyValue::Date { start: date });
        }
        Self {
            parent: Parent {
                database_id: &target.database_id,
            },
            properties,
        }
    }
}

/// Body of `PATCH /blocks/{id}/children`.
#[derive(Debug, Serialize)]
pub(crate) struct AppendChildrenRequest<'a> {
    pub(crate) children: &'a [Block],
}

/// Subset of the page object returned on creation.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Web URL of the page.
    #[serde(default)]
    pub url: Option<String>,
}
