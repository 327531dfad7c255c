//! Line Source
//!
//! Wraps the raw document text and deals lines out to the parser. Two read
//! modes exist: clean reads skip blank and comment lines, raw reads return
//! every line verbatim. One line of pushback is available; the grammar is
//! LL(1) over clean lines, so no deeper buffer is ever needed.
//!
//! Charset decisions belong to the caller: the source is already a `&str`
//! and line breaks may be LF, CR, or CR+LF.

use std::borrow::Cow;

use super::grammar::RE_BLANK_LINE;

/// Line source over a document string with a one-slot pushback buffer.
///
/// Lines borrow from the source; the single rewritten line the parser pushes
/// back (the combined sequence+key form) rides in the owned half of the
/// `Cow`.
pub struct Input<'a> {
    src: &'a str,
    unread: Option<Cow<'a, str>>,
    line_count: usize,
}

impl<'a> Input<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            unread: None,
            line_count: 0,
        }
    }

    /// 1-based count of raw lines consumed from the source so far.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Returns the next clean document line, skipping blank and comment
    /// lines. A pushed-back line that turned out blank is dropped the same
    /// way.
    pub fn read_line(&mut self) -> Option<Cow<'a, str>> {
        if let Some(line) = self.unread.take() {
            if !RE_BLANK_LINE.is_match(&line) {
                return Some(line);
            }
        }

        while let Some(line) = self.next_raw() {
            if !RE_BLANK_LINE.is_match(line) {
                return Some(Cow::Borrowed(line));
            }
        }
        None
    }

    /// Returns the next raw line, including blank and comment lines.
    pub fn read_literal_line(&mut self) -> Option<Cow<'a, str>> {
        if let Some(line) = self.unread.take() {
            return Some(line);
        }
        self.next_raw().map(Cow::Borrowed)
    }

    /// Pushes one line back; the next read returns it before touching the
    /// source. The slot holds a single line: a second pushback before the
    /// first drains can only come from a parser bug, and asserts.
    pub fn unread_line(&mut self, line: Cow<'a, str>) {
        assert!(
            self.unread.is_none(),
            "Internal Error: can only unread 1 line"
        );
        self.unread = Some(line);
    }

    // Splits the next line off the source, accepting LF, CR, and CR+LF
    // terminators. A final line without a terminator is still yielded.
    fn next_raw(&mut self) -> Option<&'a str> {
        if self.src.is_empty() {
            return None;
        }
        let line = match self.src.find(|c: char| c == '\n' || c == '\r') {
            Some(pos) => {
                let line = &self.src[..pos];
                let rest = &self.src[pos..];
                self.src = if rest.starts_with("\r\n") {
                    &rest[2..]
                } else {
                    &rest[1..]
                };
                line
            }
            None => {
                let line = self.src;
                self.src = "";
                line
            }
        };
        self.line_count += 1;
        Some(line)
    }
}
