//! Block value tree
//!
//! A parsed document is a tree of blocks. A block starts out empty and
//! commits to exactly one kind on its first mutation: literal, mapping, or
//! sequence. Operations of a different kind are rejected with a type
//! conflict; operations of the same kind accumulate. The sum type makes
//! "more than one kind at once" unrepresentable.
//!
//! Mapping iteration and rendering order is lexicographic by key, not
//! insertion order. Sequence order is insertion order. Both orderings are
//! observable contracts.

use std::collections::BTreeMap;
use std::fmt;

use super::error::{ParseError, ParseErrorKind, ParseResult};

/// The kind a block currently reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Empty,
    Literal,
    Mapping,
    Sequence,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockKind::Empty => "empty",
            BlockKind::Literal => "literal",
            BlockKind::Mapping => "mapping",
            BlockKind::Sequence => "sequence",
        };
        f.write_str(name)
    }
}

/// A node in the parsed document tree.
///
/// Mapping values and sequence items are themselves full blocks, so
/// mapping-in-sequence and sequence-in-mapping nest arbitrarily; the grammar
/// rules out deeper combinations without an intermediate key level.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Block {
    /// The initial state; holds no data.
    #[default]
    Empty,
    /// An untyped scalar. Numeric conversions parse the text on demand.
    Literal(String),
    /// Key/value entries; `BTreeMap` makes lexicographic key order structural.
    Mapping(BTreeMap<String, Block>),
    /// Ordered items, insertion order preserved.
    Sequence(Vec<Block>),
}

impl Block {
    pub fn new() -> Self {
        Block::Empty
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Empty => BlockKind::Empty,
            Block::Literal(_) => BlockKind::Literal,
            Block::Mapping(_) => BlockKind::Mapping,
            Block::Sequence(_) => BlockKind::Sequence,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Block::Empty)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Block::Literal(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Block::Mapping(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Block::Sequence(_))
    }

    fn conflict(&self, target: BlockKind) -> ParseError {
        ParseError::new(
            ParseErrorKind::TypeConflict,
            format!(
                "Block of type '{}' can't be converted to type '{}'",
                self.kind(),
                target
            ),
        )
    }

    fn bad_access(&self, target: BlockKind) -> ParseError {
        ParseError::new(
            ParseErrorKind::TypeAccess,
            format!(
                "Block of type '{}' can't be accessed as type '{}'",
                self.kind(),
                target
            ),
        )
    }

    // --- Literal container

    /// Set or overwrite the literal text. Fails with a type conflict if the
    /// block is already a mapping or a sequence.
    pub fn set_literal(&mut self, text: impl Into<String>) -> ParseResult<()> {
        match self {
            Block::Mapping(_) | Block::Sequence(_) => Err(self.conflict(BlockKind::Literal)),
            _ => {
                *self = Block::Literal(text.into());
                Ok(())
            }
        }
    }

    /// The literal text.
    pub fn as_str(&self) -> ParseResult<&str> {
        match self {
            Block::Literal(text) => Ok(text),
            other => Err(other.bad_access(BlockKind::Literal)),
        }
    }

    /// The literal text parsed as a float.
    pub fn as_f64(&self) -> ParseResult<f64> {
        let text = self.as_str()?;
        text.parse().map_err(|_| {
            ParseError::new(
                ParseErrorKind::NumberFormat,
                format!("'{}' is not a valid number", text),
            )
        })
    }

    /// The literal text parsed as an integer.
    pub fn as_i64(&self) -> ParseResult<i64> {
        let text = self.as_str()?;
        text.parse().map_err(|_| {
            ParseError::new(
                ParseErrorKind::NumberFormat,
                format!("'{}' is not a valid integer", text),
            )
        })
    }

    // --- Mapping container

    /// Insert or replace `key -> value`. The first successful call turns an
    /// empty block into a mapping; literal and sequence blocks reject the
    /// operation. Returns the inserted slot.
    pub fn set_key_value(&mut self, key: impl Into<String>, value: Block) -> ParseResult<&mut Block> {
        if self.is_empty() {
            *self = Block::Mapping(BTreeMap::new());
        }
        match self {
            Block::Mapping(entries) => {
                let slot = entries.entry(key.into()).or_insert(Block::Empty);
                *slot = value;
                Ok(slot)
            }
            other => Err(other.conflict(BlockKind::Mapping)),
        }
    }

    /// The mapping entries, keyed lexicographically.
    pub fn as_mapping(&self) -> ParseResult<&BTreeMap<String, Block>> {
        match self {
            Block::Mapping(entries) => Ok(entries),
            other => Err(other.bad_access(BlockKind::Mapping)),
        }
    }

    /// Value for `key`, or `None` when the key is absent or the block is not
    /// a mapping.
    pub fn get(&self, key: &str) -> Option<&Block> {
        match self {
            Block::Mapping(entries) => entries.get(key),
            _ => None,
        }
    }

    /// Keys in lexicographic order.
    pub fn keys(&self) -> ParseResult<impl Iterator<Item = &str> + std::fmt::Debug> {
        Ok(self
            .as_mapping()?
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .into_iter())
    }

    /// Shortcut for looking up a string-literal value, with a default for
    /// absent keys. A present key of any other kind is an error, never a
    /// coercion.
    pub fn get_key_str<'a>(&'a self, key: &str, default: &'a str) -> ParseResult<&'a str> {
        match self.as_mapping()?.get(key) {
            None => Ok(default),
            Some(value) if value.is_literal() => value.as_str(),
            Some(value) => Err(ParseError::new(
                ParseErrorKind::TypeConflict,
                format!("Key '{}' is of type '{}', not literal", key, value.kind()),
            )),
        }
    }

    /// Shortcut for looking up a float value, with a default for absent keys.
    pub fn get_key_f64(&self, key: &str, default: f64) -> ParseResult<f64> {
        match self.as_mapping()?.get(key) {
            None => Ok(default),
            Some(value) => value.as_f64(),
        }
    }

    /// Shortcut for looking up an integer value, with a default for absent
    /// keys.
    pub fn get_key_i64(&self, key: &str, default: i64) -> ParseResult<i64> {
        match self.as_mapping()?.get(key) {
            None => Ok(default),
            Some(value) => value.as_i64(),
        }
    }

    // --- Sequence container

    /// Append `value`. The first successful call turns an empty block into a
    /// sequence; literal and mapping blocks reject the operation. Returns the
    /// appended slot.
    pub fn append_to_sequence(&mut self, value: Block) -> ParseResult<&mut Block> {
        if self.is_empty() {
            *self = Block::Sequence(Vec::new());
        }
        match self {
            Block::Sequence(items) => {
                items.push(value);
                let last = items.len() - 1;
                Ok(&mut items[last])
            }
            other => Err(other.conflict(BlockKind::Sequence)),
        }
    }

    /// The sequence items in insertion order.
    pub fn as_sequence(&self) -> ParseResult<&[Block]> {
        match self {
            Block::Sequence(items) => Ok(items),
            other => Err(other.bad_access(BlockKind::Sequence)),
        }
    }
}

/// Deterministic debug rendering; tests compare against it verbatim.
///
/// literal -> `'text'`, mapping -> `{k1=v1, k2=v2}` in key order, sequence ->
/// `[v1, v2]` in insertion order, empty -> `<empty container>`.
impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Empty => f.write_str("<empty container>"),
            Block::Literal(text) => write!(f, "'{}'", text),
            Block::Mapping(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                f.write_str("}")
            }
            Block::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_block_is_empty() {
        let block = Block::new();
        assert!(block.is_empty());
        assert_eq!(block.kind(), BlockKind::Empty);
        assert_eq!(block.to_string(), "<empty container>");
    }

    #[test]
    fn test_literal_transition_and_overwrite() {
        let mut block = Block::new();
        block.set_literal("first").unwrap();
        assert_eq!(block.kind(), BlockKind::Literal);
        assert_eq!(block.as_str().unwrap(), "first");

        // Same-kind operations always succeed; a literal overwrites.
        block.set_literal("second").unwrap();
        assert_eq!(block.as_str().unwrap(), "second");
    }

    #[test]
    fn test_literal_rejects_mapping_and_sequence_ops() {
        let mut block = Block::new();
        block.set_literal("text").unwrap();

        let err = block.set_key_value("k", Block::new()).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::TypeConflict);
        assert_eq!(
            err.to_string(),
            "Block of type 'literal' can't be converted to type 'mapping'"
        );

        let err = block.append_to_sequence(Block::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Block of type 'literal' can't be converted to type 'sequence'"
        );
    }

    #[test]
    fn test_mapping_rejects_literal_and_sequence_ops() {
        let mut block = Block::new();
        block.set_key_value("k", Block::new()).unwrap();

        let err = block.set_literal("text").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Block of type 'mapping' can't be converted to type 'literal'"
        );
        let err = block.append_to_sequence(Block::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Block of type 'mapping' can't be converted to type 'sequence'"
        );
    }

    #[test]
    fn test_sequence_rejects_literal_and_mapping_ops() {
        let mut block = Block::new();
        block.append_to_sequence(Block::new()).unwrap();

        let err = block.set_literal("text").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Block of type 'sequence' can't be converted to type 'literal'"
        );
        let err = block.set_key_value("k", Block::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Block of type 'sequence' can't be converted to type 'mapping'"
        );
    }

    #[test]
    fn test_mapping_accumulates_and_replaces() {
        let mut block = Block::new();
        block.set_key_value("b", literal("2")).unwrap();
        block.set_key_value("a", literal("1")).unwrap();
        block.set_key_value("b", literal("3")).unwrap();

        assert_eq!(block.as_mapping().unwrap().len(), 2);
        assert_eq!(block.get("b").unwrap().as_str().unwrap(), "3");
    }

    #[test]
    fn test_mapping_renders_in_key_order() {
        let mut block = Block::new();
        block.set_key_value("zeta", literal("1")).unwrap();
        block.set_key_value("alpha", literal("2")).unwrap();
        block.set_key_value("mid", literal("3")).unwrap();

        assert_eq!(block.to_string(), "{alpha='2', mid='3', zeta='1'}");
        let keys: Vec<&str> = block.keys().unwrap().collect();
        assert_eq!(keys, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_sequence_renders_in_insertion_order() {
        let mut block = Block::new();
        block.append_to_sequence(literal("z")).unwrap();
        block.append_to_sequence(literal("a")).unwrap();
        assert_eq!(block.to_string(), "['z', 'a']");
    }

    #[test]
    fn test_nested_rendering() {
        let mut inner = Block::new();
        inner.set_key_value("k", literal("v")).unwrap();

        let mut block = Block::new();
        block.append_to_sequence(literal("x")).unwrap();
        block.append_to_sequence(inner).unwrap();
        block.append_to_sequence(Block::new()).unwrap();

        assert_eq!(block.to_string(), "['x', {k='v'}, <empty container>]");
    }

    #[test]
    fn test_numeric_accessors() {
        let block = literal("320");
        assert_eq!(block.as_i64().unwrap(), 320);
        assert_eq!(block.as_f64().unwrap(), 320.0);

        let block = literal("1.5");
        assert_eq!(block.as_f64().unwrap(), 1.5);
        let err = block.as_i64().unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::NumberFormat);
        assert_eq!(err.to_string(), "'1.5' is not a valid integer");
    }

    #[test]
    fn test_typed_access_on_wrong_kind_is_an_error() {
        let mut block = Block::new();
        block.set_key_value("k", literal("v")).unwrap();

        let err = block.as_str().unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::TypeAccess);
        assert_eq!(
            err.to_string(),
            "Block of type 'mapping' can't be accessed as type 'literal'"
        );
        assert_eq!(
            block.as_sequence().unwrap_err().kind(),
            ParseErrorKind::TypeAccess
        );
        assert_eq!(
            Block::new().as_mapping().unwrap_err().kind(),
            ParseErrorKind::TypeAccess
        );
    }

    #[test]
    fn test_get_on_non_mapping_is_none() {
        assert!(literal("x").get("k").is_none());
        assert!(Block::new().get("k").is_none());
    }

    #[test]
    fn test_key_lookups_with_defaults() {
        let mut block = Block::new();
        block.set_key_value("name", literal("intro")).unwrap();
        block.set_key_value("dpi", literal("320")).unwrap();
        block.set_key_value("scale", literal("1.5")).unwrap();
        block.set_key_value("nested", Block::new()).unwrap();

        assert_eq!(block.get_key_str("name", "?").unwrap(), "intro");
        assert_eq!(block.get_key_str("missing", "?").unwrap(), "?");
        assert_eq!(block.get_key_i64("dpi", 0).unwrap(), 320);
        assert_eq!(block.get_key_i64("missing", 321).unwrap(), 321);
        assert_eq!(block.get_key_f64("scale", 0.0).unwrap(), 1.5);
        assert_eq!(block.get_key_f64("missing", 2.5).unwrap(), 2.5);

        // Present but not a literal: an error, never a coercion.
        let err = block.get_key_str("nested", "?").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::TypeConflict);
        assert_eq!(err.to_string(), "Key 'nested' is of type 'empty', not literal");
        assert_eq!(
            block.get_key_i64("nested", 0).unwrap_err().kind(),
            ParseErrorKind::TypeAccess
        );
    }

    fn literal(text: &str) -> Block {
        let mut block = Block::new();
        block.set_literal(text).unwrap();
        block
    }
}
