//! Line Grammar Patterns
//!
//! The restricted grammar classifies whole lines; there is no token-level
//! lexing. Two shapes exist for content lines, and they are tried in this
//! specific order (important for correctness):
//!
//! 1. Sequence item with an inline key: `<indent> - <key>: <rest>`
//! 2. Plain sequence item `<indent> - <rest>` or key line
//!    `<indent><key>: <rest>`
//!
//! A non-blank line matching neither shape is a syntax error. A key is any
//! run of characters that are neither whitespace nor `:`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Blank or comment line: optional whitespace, then an optional `#` comment
/// running to end of line.
pub static RE_BLANK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(?:#.*)?$").unwrap());

/// Leading indentation of a content line.
//                                                           1=indent
pub static RE_INDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)\S.*$").unwrap());

/// Plain sequence item or key line.
//                  1=indent  2=seq 3=map key         4=literal (optional)
pub static RE_SEQ_OR_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)(?:(-)|([^\s:]+)\s*:)\s*(.*)$").unwrap());

/// Sequence item carrying an inline key, tried before [`RE_SEQ_OR_KEY`].
//                   1=indent 2=seq 3=map key         4=literal (optional)
pub static RE_SEQ_AND_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)(-)\s*([^\s:]+)\s*:\s*(.*)$").unwrap());

/// Indentation scope width: a whitespace character count, not a rendered
/// column width. Tabs and spaces are not normalized.
pub fn indent_width(indent: &str) -> usize {
    indent.chars().count()
}

/// Leading indentation of `line`, or `None` for whitespace-only lines.
pub fn leading_indent(line: &str) -> Option<&str> {
    RE_INDENT
        .captures(line)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str()))
}
