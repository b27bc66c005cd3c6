//! Inline code span splitting.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::RichText;

/// Backtick-delimited span; shortest match, no escapes or nesting.
static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Split a line into plain and inline-code runs.
///
/// Delimiters are stripped from code runs. An unmatched backtick stays in the
/// surrounding plain run. The result always holds at least one run.
///
/// # Examples
///
/// ```
/// use askdoc_blocks::{RichText, split_inline_code};
///
/// assert_eq!(
///     split_inline_code("run `ls` now"),
///     vec![RichText::plain("run "), RichText::code("ls"), RichText::plain(" now")],
/// );
/// ```
#[must_use]
pub fn split_inline_code(line: &str) -> Vec<RichText> {
    let mut runs = Vec::new();
    let mut last = 0;

    for caps in INLINE_CODE_RE.captures_iter(line) {
        let (Some(span), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if span.start() > last {
            runs.push(RichText::plain(&line[last..span.start()]));
        }
        runs.push(RichText::code(inner.as_str()));
        last = span.end();
    }

    if last < line.len() || runs.is_empty() {
        runs.push(RichText::plain(&line[last..]));
    }

    runs
}

/// Render runs back to inline markdown, wrapping code runs in backticks.
#[must_use]
pub fn render_inline(runs: &[RichText]) -> String {
    let mut out = String::new();
    for run in runs {
        if run.code {
            out.push('`');
            out.push_str(&run.content);
            out.push('`');
        } else {
            out.push_str(&run.content);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_spans() {
        assert_eq!(
            split_inline_code("just text"),
            vec![RichText::plain("just text")]
        );
    }

    #[test]
    fn test_empty_line_yields_one_run() {
        assert_eq!(split_inline_code(""), vec![RichText::plain("")]);
    }

    #[test]
    fn test_span_in_middle() {
        assert_eq!(
            split_inline_code("Some `code` here."),
            vec![
                RichText::plain("Some "),
                RichText::code("code"),
                RichText::plain(" here."),
            ]
        );
    }

    #[test]
    fn test_whole_line_is_span() {
        assert_eq!(split_inline_code("`x`"), vec![RichText::code("x")]);
    }

    #[test]
    fn test_adjacent_spans_kept_in_order() {
        assert_eq!(
            split_inline_code("`a``b`"),
            vec![RichText::code("a"), RichText::code("b")]
        );
    }

    #[test]
    fn test_unmatched_trailing_backtick_is_literal() {
        assert_eq!(
            split_inline_code("a `b` c `d"),
            vec![
                RichText::plain("a "),
                RichText::code("b"),
                RichText::plain(" c `d"),
            ]
        );
    }

    #[test]
    fn test_lone_backtick_is_literal() {
        assert_eq!(split_inline_code("`"), vec![RichText::plain("`")]);
    }

    #[test]
    fn test_double_backtick_is_not_a_span() {
        assert_eq!(split_inline_code("a `` b"), vec![RichText::plain("a `` b")]);
    }

    #[test]
    fn test_multibyte_text_around_spans() {
        assert_eq!(
            split_inline_code("변수 `값` 확인"),
            vec![
                RichText::plain("변수 "),
                RichText::code("값"),
                RichText::plain(" 확인"),
            ]
        );
    }

    #[test]
    fn test_render_reconstructs_line() {
        for line in [
            "",
            "plain",
            "Some `code` here.",
            "`a``b` and `c`",
            "trailing `span`",
            "`leading` span",
        ] {
            assert_eq!(render_inline(&split_inline_code(line)), line);
        }
    }

    #[test]
    fn test_concatenated_content_drops_only_delimiters() {
        let runs = split_inline_code("call `f()` then `g()`");
        let joined: String = runs.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(joined, "call f() then g()");
    }
}
