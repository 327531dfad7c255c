//! Document Parser
//!
//! Single-pass recursive descent over clean lines, scoped by indentation
//! width. Each scope level is one `parse_into` frame: lines at the frame's
//! indentation become siblings in the frame's container, a shallower line is
//! pushed back for an ancestor frame, and a deeper line is only legal through
//! the explicit peek-and-recurse step after a bare `key:` or `-` entry.
//!
//! The document proper is framed by a `---` line and a `...` line; everything
//! outside the markers is ignored.

use std::borrow::Cow;

use super::block::Block;
use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::grammar::{indent_width, leading_indent, RE_SEQ_AND_KEY, RE_SEQ_OR_KEY};
use super::input::Input;

const DOC_START: &str = "---";
const DOC_END: &str = "...";

/// Parse a complete document into its root block.
///
/// All failures are fatal to the call: the first error encountered is
/// returned, stamped with the best-known 1-based line number, and no partial
/// tree is surfaced.
pub fn parse(source: &str) -> ParseResult<Block> {
    let mut input = Input::new(source);

    // Skip everything (directives included) until the document starts.
    while let Some(line) = input.read_line() {
        if line == DOC_START {
            return parse_document(&mut input);
        }
    }

    Err(framing_error(
        "Document marker not found (aka c-directives-end). Tip: start your document with '---'.",
        &input,
    ))
}

fn parse_document(input: &mut Input) -> ParseResult<Block> {
    let mut doc = Block::new();

    // The first content line seeds the root indentation scope.
    let indent = match input.read_line() {
        Some(line) => {
            let indent = leading_indent(&line).unwrap_or("").to_string();
            input.unread_line(line);
            indent
        }
        None => return Err(missing_end_marker(input)),
    };

    parse_into(input, &mut doc, &indent)?;

    match input.read_line() {
        Some(line) if line == DOC_END => Ok(doc),
        _ => Err(missing_end_marker(input)),
    }
}

// A key or sequence entry covers 3 cases:
// 1- a new sequence item:        ^ - optional_literal
// 2- a new key:value item:       ^ key: optional_value
// 3- a new sequence item containing a new key:value item:
//                                ^ - key: optional_value
// Case 3 is an empty sequence item followed by a key:value one scope deeper:
// the line is re-queued with the `-` blanked out and re-parsed there.
fn parse_into(input: &mut Input, container: &mut Block, indent: &str) -> ParseResult<()> {
    let scope = indent_width(indent);

    while let Some(line) = input.read_line() {
        if line == DOC_END {
            input.unread_line(line);
            return Ok(());
        }

        // The combined sequence+key shape is tried first.
        let (width, dash, key, rest) = match RE_SEQ_AND_KEY
            .captures(&line)
            .or_else(|| RE_SEQ_OR_KEY.captures(&line))
        {
            Some(caps) => (
                indent_width(caps.get(1).map_or("", |m| m.as_str())),
                caps.get(2).map(|m| m.start()),
                caps.get(3).map(|m| m.as_str().to_string()),
                caps.get(4).map_or("", |m| m.as_str()).trim().to_string(),
            ),
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::Syntax,
                    format!("'key:' or '- sequence' expected, found: {}", line),
                )
                .at_line(input.line_count()))
            }
        };

        if width > scope {
            return Err(ParseError::new(
                ParseErrorKind::Indentation,
                format!("Mismatched map indentation, expected {} but was {}", scope, width),
            )
            .at_line(input.line_count()));
        }
        if width < scope {
            // The line belongs to an ancestor scope.
            input.unread_line(line);
            return Ok(());
        }

        let stamp = input.line_count();
        let mut inline_value = true;
        let child = match (dash, key) {
            (Some(dash_at), inline_key) => {
                let child = container
                    .append_to_sequence(Block::new())
                    .map_err(|e| e.at_line(stamp))?;
                if inline_key.is_some() {
                    // Combined form: re-queue the line with the dash blanked
                    // out; the key:value parses into the fresh sequence item
                    // through the peek-and-recurse step below.
                    let raw: &str = &line;
                    let rewritten = format!("{} {}", &raw[..dash_at], &raw[dash_at + 1..]);
                    input.unread_line(Cow::Owned(rewritten));
                    inline_value = false;
                }
                child
            }
            (None, Some(key)) => container
                .set_key_value(key, Block::new())
                .map_err(|e| e.at_line(stamp))?,
            (None, None) => {
                return Err(ParseError::new(
                    ParseErrorKind::Syntax,
                    format!("Internal error; unmatched syntax: {}", line),
                )
                .at_line(stamp))
            }
        };

        if inline_value {
            if rest == "|" {
                let text = read_literal_block(input, scope);
                child.set_literal(text).map_err(|e| e.at_line(input.line_count()))?;
            } else if !rest.is_empty() {
                child.set_literal(rest).map_err(|e| e.at_line(stamp))?;
            }
        }

        if child.is_empty() {
            // The entry may still grow a nested structure: peek the next
            // clean line and recurse when it opens a deeper scope.
            if let Some(peek) = input.read_line() {
                let deeper = leading_indent(&peek)
                    .filter(|i| indent_width(i) > scope)
                    .map(str::to_string);
                input.unread_line(peek);
                if let Some(child_indent) = deeper {
                    parse_into(input, child, &child_indent)?;
                }
            }
            // At end of input the child stays empty; the caller's framing
            // check reports the missing end marker.
        }
    }

    Ok(())
}

// Multi-line literal capture for the `|` form. Clean lines are taken
// verbatim with a newline appended each, until the document terminator or a
// line that classifies as a key or sequence entry at or above the owning
// scope; that line is pushed back, not consumed. Blank and comment lines are
// skipped, not captured.
fn read_literal_block(input: &mut Input, scope: usize) -> String {
    let mut text = String::new();
    while let Some(line) = input.read_line() {
        if line == DOC_END {
            input.unread_line(line);
            break;
        }
        let ends_scope = RE_SEQ_OR_KEY
            .captures(&line)
            .is_some_and(|caps| indent_width(caps.get(1).map_or("", |m| m.as_str())) <= scope);
        if ends_scope {
            input.unread_line(line);
            break;
        }
        text.push_str(&line);
        text.push('\n');
    }
    text
}

fn missing_end_marker(input: &Input) -> ParseError {
    framing_error(
        "Document end marker not found (aka c-document-end). Tip: end your document with '...' or check indentation levels.",
        input,
    )
}

fn framing_error(message: &str, input: &Input) -> ParseError {
    ParseError::new(ParseErrorKind::Framing, message).at_line(input.line_count())
}
