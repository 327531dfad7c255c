//! Error types for parsing and block access
//!
//! Every failure funnels through [`ParseError`]: a kind, a message, and an
//! optional 1-based line number. The rendered form `[line {n}] {message}` is
//! part of the observable contract and is matched verbatim by callers.

use std::fmt;

/// Classification of a parse or access failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A block already committed to one kind received an operation for a
    /// different kind.
    TypeConflict,
    /// A line matched neither the key-line nor the sequence-line shape.
    Syntax,
    /// A child line was indented deeper than its declared scope allows.
    Indentation,
    /// Missing `---` start marker or missing/mismatched `...` end marker.
    Framing,
    /// A literal's text is not parseable as the requested numeric type.
    NumberFormat,
    /// A typed accessor was invoked on a block of the wrong kind.
    TypeAccess,
}

/// Error raised by the parser or by typed access to a parsed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    line: Option<usize>,
    message: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            line: None,
            message: message.into(),
        }
    }

    /// Stamp a line number onto an error that does not carry one yet.
    ///
    /// Failures raised below the parse frames (block mutations, numeric
    /// conversions) have no position of their own; the nearest enclosing
    /// frame stamps its current line count before propagating. A line number
    /// that is already present is kept.
    pub fn at_line(mut self, line: usize) -> Self {
        if self.line.is_none() {
            self.line = Some(line);
        }
        self
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// 1-based line number, when known.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "[line {}] {}", line, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Alias for results produced by the parser and block accessors.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_line() {
        let err = ParseError::new(ParseErrorKind::Syntax, "bad line");
        assert_eq!(err.to_string(), "bad line");
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_display_with_line() {
        let err = ParseError::new(ParseErrorKind::Syntax, "bad line").at_line(7);
        assert_eq!(err.to_string(), "[line 7] bad line");
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn test_at_line_keeps_existing_stamp() {
        let err = ParseError::new(ParseErrorKind::TypeConflict, "mixed kinds")
            .at_line(3)
            .at_line(9);
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.kind(), ParseErrorKind::TypeConflict);
    }
}
