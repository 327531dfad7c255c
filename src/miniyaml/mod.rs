//! Main module for the miniyaml library.
//!
//! The accepted input is a deliberately restricted, line-oriented subset of
//! YAML:
//!
//! ```text
//! ---  <-- start of document (mandatory)
//! #    <-- a comment line, ignored.
//!      <-- blank lines are ignored.
//! key:          <-- starts a key entry in a mapping block.
//! key: literal  <-- literal is untyped and kept as a string.
//! key: |        <-- multi-line literal, captured until a key or sequence
//!                   item at the same indentation or less is found.
//! - entry       <-- an element in a sequence block.
//! ...  <-- end of document (mandatory)
//! ```
//!
//! Anything before the start marker or after the end marker is ignored.
//! Mixing a sequence and a mapping in the same block is an error, as is any
//! flow-style construct (`{}` / `[]`), anchor, tag, or folded scalar.
//!
//! Parsing is single-pass recursive descent scoped by indentation width, with
//! one line of pushback. Entry point: [`parser::parse`].

pub mod block;
pub mod error;
pub mod grammar;
pub mod input;
pub mod parser;

mod serialize;

pub use block::{Block, BlockKind};
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use parser::parse;
