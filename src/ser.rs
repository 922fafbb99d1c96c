//! [`serde::Serialize`] for the in-memory tree.
//!
//! Compounds become maps in child order, lists and arrays become sequences,
//! scalars map to their Rust types. The output is meant for inspection
//! (dumping a tree as JSON, say); it does not record discriminants, so it is
//! not a lossless encoding.

use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};

use crate::{Compound, List, Payload, Root, Value};

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Payload::Byte(value) => serializer.serialize_i8(*value),
            Payload::Short(value) => serializer.serialize_i16(*value),
            Payload::Int(value) => serializer.serialize_i32(*value),
            Payload::Long(value) => serializer.serialize_i64(*value),
            Payload::Float(value) => serializer.serialize_f32(*value),
            Payload::Double(value) => serializer.serialize_f64(*value),
            Payload::ByteArray(value) => value.serialize(serializer),
            Payload::String(value) => serializer.serialize_str(value),
            Payload::List(list) => list.serialize(serializer),
            Payload::Compound(compound) => compound.serialize(serializer),
            Payload::IntArray(value) => value.serialize(serializer),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.payload().serialize(serializer)
    }
}

impl Serialize for List {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element.payload())?;
        }
        seq.end()
    }
}

impl Serialize for Compound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for child in self {
            map.serialize_entry(child.name(), child.payload())?;
        }
        map.end()
    }
}

impl Serialize for Root {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (**self).serialize(serializer)
    }
}
