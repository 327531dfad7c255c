//! # miniyaml
//!
//! A reader for a minimal, indentation-based subset of YAML, intended for
//! applications that want a small configuration-file format without pulling
//! in a fully compliant YAML implementation.
//!
//! The library parses a framed document (`---` .. `...`) into a tree of
//! [`miniyaml::block::Block`] values and stops there: no schema layer, no
//! reflection, no flow styles. See the [miniyaml module](miniyaml) for the
//! accepted grammar.
//!
//! For testing guidelines see the integration tests under `tests/`; parser
//! tests assert against whole-document renderings so ordering and literal
//! capture stay part of the observable contract.

#![allow(rustdoc::invalid_html_tags)]

pub mod miniyaml;
