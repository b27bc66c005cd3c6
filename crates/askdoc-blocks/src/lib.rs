//! Markdown-to-block transpiler.
//!
//! Converts free-form language-model responses into the typed content blocks
//! accepted by the page-database service:
//!
//! - [`parse_response`] classifies lines and collects fenced code
//! - [`split_inline_code`] splits paragraph text into plain and code runs
//! - [`factory`] builds one well-formed block per kind
//!
//! Parsing is pure and infallible. Lossy inputs are handled by policy: unknown
//! code languages become `"plain text"` and an unterminated fence is dropped.
//!
//! # Example
//!
//! ```
//! use askdoc_blocks::{Block, parse_response};
//!
//! let blocks = parse_response("## Setup\n```bash\ncargo build\n```");
//! assert_eq!(blocks[0].kind(), "heading_2");
//! assert!(matches!(&blocks[1], Block::Code { language, .. } if language == "bash"));
//! ```

mod block;
pub mod factory;
mod inline;
mod parser;

pub use block::{Block, HeadingLevel, RichText};
pub use factory::{CODE_LANGUAGES, FALLBACK_LANGUAGE, sanitize_language};
pub use inline::{render_inline, split_inline_code};
pub use parser::{LineKind, classify, parse_response};
