//! Text rendering of the tree.
//!
//! The output is SNBT-like: scalars carry a type suffix (`1b`, `2s`, `3`,
//! `4L`, `0.5f`, `0.25d`), arrays are prefixed `B;` or `I;`, strings are
//! quoted, and compound keys are quoted only when they contain characters
//! outside `[A-Za-z0-9_.+-]`. Unlike the serde dump it keeps every
//! discriminant visible.
//!
//! ```
//! use nbt_tree::{List, Tag, make_root};
//!
//! let mut nums = List::new(Tag::Short);
//! nums.add(1i16).unwrap();
//! nums.add(2i16).unwrap();
//!
//! let mut root = make_root("level");
//! root.set("name", "test");
//! root.set("nums", nums);
//! root.set("ids", vec![7i32]);
//!
//! assert_eq!(
//!     root.to_string(),
//!     r#"level: {name: "test", nums: [1s, 2s], ids: [I; 7]}"#
//! );
//! ```

use std::fmt::{self, Display, Write};

use crate::{Compound, List, Payload, Root, Tag, Value};

fn write_key(formatter: &mut fmt::Formatter, key: &str) -> fmt::Result {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '+' | '-'));
    if bare {
        formatter.write_str(key)
    } else {
        write!(formatter, "{key:?}")
    }
}

/// Writes `[kind; a, b, c]`, or `[a, b, c]` without a kind.
fn write_seq<T>(
    formatter: &mut fmt::Formatter,
    kind: Option<char>,
    items: impl IntoIterator<Item = T>,
    mut item: impl FnMut(&mut fmt::Formatter, T) -> fmt::Result,
) -> fmt::Result {
    formatter.write_char('[')?;
    if let Some(kind) = kind {
        write!(formatter, "{kind};")?;
    }
    for (index, value) in items.into_iter().enumerate() {
        if index > 0 {
            formatter.write_char(',')?;
        }
        if index > 0 || kind.is_some() {
            formatter.write_char(' ')?;
        }
        item(formatter, value)?;
    }
    formatter.write_char(']')
}

impl Display for Payload {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Payload::Byte(value) => write!(formatter, "{value}b"),
            Payload::Short(value) => write!(formatter, "{value}s"),
            Payload::Int(value) => write!(formatter, "{value}"),
            Payload::Long(value) => write!(formatter, "{value}L"),
            Payload::Float(value) => write!(formatter, "{value}f"),
            Payload::Double(value) => write!(formatter, "{value}d"),
            Payload::ByteArray(value) => {
                write_seq(formatter, Some('B'), value, |f, v| write!(f, "{v}b"))
            }
            Payload::String(value) => write!(formatter, "{value:?}"),
            Payload::List(list) => Display::fmt(list, formatter),
            Payload::Compound(compound) => Display::fmt(compound, formatter),
            Payload::IntArray(value) => {
                write_seq(formatter, Some('I'), value, |f, v| write!(f, "{v}"))
            }
        }
    }
}

/// A compound child renders as `key: payload`, a list element as its
/// payload alone.
impl Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        if self.parent() != Some(Tag::List) {
            write_key(formatter, self.name())?;
            formatter.write_str(": ")?;
        }
        Display::fmt(self.payload(), formatter)
    }
}

impl Display for List {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write_seq(formatter, None, self, |f, element| {
            Display::fmt(element.payload(), f)
        })
    }
}

impl Display for Compound {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_char('{')?;
        for (index, child) in self.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            Display::fmt(child, formatter)?;
        }
        formatter.write_char('}')
    }
}

impl Display for Root {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        if !self.name().is_empty() {
            write_key(formatter, self.name())?;
            formatter.write_str(": ")?;
        }
        Display::fmt(&**self, formatter)
    }
}
