use std::fmt::{self, Display};

use crate::Error;

/// The discriminant written in front of every named tag and once per list.
///
/// `End` never carries a payload. It only closes the child sequence of a
/// compound and types empty lists.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Tag {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
}

impl Tag {
    /// Returns `true` for the fixed-width scalar tags (and `End`).
    ///
    /// # Example
    ///
    /// ```
    /// use nbt_tree::Tag;
    ///
    /// assert!(Tag::Int.is_primitive());
    /// assert!(!Tag::String.is_primitive());
    /// ```
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::End
                | Self::Byte
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
        )
    }

    /// Returns `true` for the length-prefixed flat arrays.
    pub const fn is_array(self) -> bool {
        matches!(self, Self::ByteArray | Self::IntArray)
    }

    /// Returns `true` for tags that own child nodes.
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::List | Self::Compound)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::End => "End",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::ByteArray => "ByteArray",
            Self::String => "String",
            Self::List => "List",
            Self::Compound => "Compound",
            Self::IntArray => "IntArray",
        }
    }
}

impl TryFrom<u8> for Tag {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::End,
            1 => Self::Byte,
            2 => Self::Short,
            3 => Self::Int,
            4 => Self::Long,
            5 => Self::Float,
            6 => Self::Double,
            7 => Self::ByteArray,
            8 => Self::String,
            9 => Self::List,
            10 => Self::Compound,
            11 => Self::IntArray,
            _ => return Err(Error::InvalidTagType(value)),
        })
    }
}

impl Display for Tag {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.name())
    }
}
