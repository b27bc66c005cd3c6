//! `askdoc convert` command implementation.

use std::path::PathBuf;

use askdoc_blocks::parse_response;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Path to the markdown file.
    file: PathBuf,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let text = std::fs::read_to_string(&self.file)?;
        let json = convert(&text, self.pretty)?;
        output.data(&json)?;

        Ok(())
    }
}

/// Render `text` as the JSON array of blocks it parses into.
fn convert(text: &str, pretty: bool) -> Result<String, serde_json::Error> {
    let blocks = parse_response(text);
    if pretty {
        serde_json::to_string_pretty(&blocks)
    } else {
        serde_json::to_string(&blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    #[test]
    fn test_convert_emits_block_array() {
        let json = convert("# Title\n---", false).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value,
            json!([
                {
                    "object": "block",
                    "type": "heading_1",
                    "heading_1": {"rich_text": [{"type": "text", "text": {"content": "Title"}}]}
                },
                {"object": "block", "type": "divider", "divider": {}}
            ])
        );
    }

    #[test]
    fn test_convert_empty_input() {
        assert_eq!(convert("", false).unwrap(), "[]");
    }

    #[test]
    fn test_convert_pretty_is_multiline() {
        let json = convert("hello", true).unwrap();
        assert!(json.contains('\n'));
    }
}
