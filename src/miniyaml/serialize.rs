//! serde integration for block trees
//!
//! The wire shape is the tree's natural form, not the enum's tagged form:
//! empty -> unit (JSON `null`), literal -> string, mapping -> map (key order
//! inherited from the tree, so lexicographic), sequence -> seq.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use super::block::Block;

impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Block::Empty => serializer.serialize_unit(),
            Block::Literal(text) => serializer.serialize_str(text),
            Block::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Block::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}
