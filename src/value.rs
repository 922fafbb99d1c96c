use std::{io::Write, mem};

use zerocopy::BigEndian;

use crate::{ByteOrder, Compound, Error, List, Result, Tag, error::contract_fault, write::Writer};

/// The data carried by a node, one variant per non-`End` discriminant.
///
/// Every Rust type that can be stored in a tree converts into a `Payload`
/// through `From`, so the discriminant of a node is always decided by an
/// exhaustive match rather than a runtime type lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
}

impl Payload {
    #[inline]
    pub fn tag(&self) -> Tag {
        match self {
            Payload::Byte(_) => Tag::Byte,
            Payload::Short(_) => Tag::Short,
            Payload::Int(_) => Tag::Int,
            Payload::Long(_) => Tag::Long,
            Payload::Float(_) => Tag::Float,
            Payload::Double(_) => Tag::Double,
            Payload::ByteArray(_) => Tag::ByteArray,
            Payload::String(_) => Tag::String,
            Payload::List(_) => Tag::List,
            Payload::Compound(_) => Tag::Compound,
            Payload::IntArray(_) => Tag::IntArray,
        }
    }

    /// Builds the zero value of `tag`: `0`, an empty array or string, an
    /// `End`-typed empty list or an empty compound.
    ///
    /// Fails with [`Error::InvalidPayloadType`] for `Tag::End`.
    pub fn default_for(tag: Tag) -> Result<Self> {
        Ok(match tag {
            Tag::End => return Err(Error::InvalidPayloadType(tag)),
            Tag::Byte => Payload::Byte(0),
            Tag::Short => Payload::Short(0),
            Tag::Int => Payload::Int(0),
            Tag::Long => Payload::Long(0),
            Tag::Float => Payload::Float(0.0),
            Tag::Double => Payload::Double(0.0),
            Tag::ByteArray => Payload::ByteArray(Vec::new()),
            Tag::String => Payload::String(String::new()),
            Tag::List => Payload::List(List::new(Tag::End)),
            Tag::Compound => Payload::Compound(Compound::new()),
            Tag::IntArray => Payload::IntArray(Vec::new()),
        })
    }
}

macro_rules! impl_payload_from {
    ($($type:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$type> for Payload {
                fn from(value: $type) -> Self {
                    Payload::$variant(value)
                }
            }
        )*
    };
}

impl_payload_from!(
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<i8> => ByteArray,
    String => String,
    List => List,
    Compound => Compound,
    Vec<i32> => IntArray,
);

impl From<&[i8]> for Payload {
    fn from(value: &[i8]) -> Self {
        Payload::ByteArray(value.to_vec())
    }
}

impl<const N: usize> From<[i8; N]> for Payload {
    fn from(value: [i8; N]) -> Self {
        Payload::ByteArray(value.to_vec())
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::String(value.to_owned())
    }
}

impl From<&[i32]> for Payload {
    fn from(value: &[i32]) -> Self {
        Payload::IntArray(value.to_vec())
    }
}

impl<const N: usize> From<[i32; N]> for Payload {
    fn from(value: [i32; N]) -> Self {
        Payload::IntArray(value.to_vec())
    }
}

/// A node of the tree: a name, the kind of container that owns it, and its
/// payload.
///
/// Values are only created by the containers that own them, so the parent
/// marker always names the real owner. List elements have an empty name and
/// a `Tag::List` parent; compound children carry their key and a
/// `Tag::Compound` parent. Containers hand out mutable access as a
/// [`MutValue`](crate::MutValue), never as `&mut Value`.
#[derive(Clone, Debug, PartialEq)]
pub struct Value {
    name: String,
    parent: Option<Tag>,
    payload: Payload,
}

macro_rules! scalar_accessor {
    ($($name:ident => $variant:ident: $ret:ty),* $(,)?) => {
        $(
            #[track_caller]
            pub fn $name(&self) -> $ret {
                match self.payload {
                    Payload::$variant(value) => value,
                    _ => self.accessor_fault(Tag::$variant),
                }
            }
        )*
    };
}

macro_rules! ref_accessor {
    ($(#[$doc:meta])* $name:ident => $variant:ident: $ret:ty) => {
        $(#[$doc])*
        #[track_caller]
        pub fn $name(&self) -> &$ret {
            match &self.payload {
                Payload::$variant(value) => value,
                _ => self.accessor_fault(Tag::$variant),
            }
        }
    };
}

impl Value {
    pub(crate) fn new(name: String, parent: Option<Tag>, payload: Payload) -> Self {
        Self {
            name,
            parent,
            payload,
        }
    }

    /// The node's name, empty for list elements.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.payload.tag()
    }

    /// The kind of container owning this node: `Tag::List` or
    /// `Tag::Compound`.
    ///
    /// This is a marker, not a link. It cannot be used to reach the
    /// container; walk down from the [`Root`](crate::Root) instead.
    #[inline]
    pub fn parent(&self) -> Option<Tag> {
        self.parent
    }

    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }

    scalar_accessor!(
        byte => Byte: i8,
        short => Short: i16,
        int => Int: i32,
        long => Long: i64,
        float => Float: f32,
        double => Double: f64,
    );

    ref_accessor!(byte_array => ByteArray: Vec<i8>);
    ref_accessor!(
        /// The string payload.
        ///
        /// # Panics
        ///
        /// Panics if this node is not a `String`. Every typed accessor
        /// behaves the same way for its own discriminant.
        string => String: String
    );
    ref_accessor!(list => List: List);
    ref_accessor!(compound => Compound: Compound);
    ref_accessor!(int_array => IntArray: Vec<i32>);

    #[cold]
    #[track_caller]
    pub(crate) fn accessor_fault(&self, requested: Tag) -> ! {
        contract_fault(format_args!(
            "{requested}() called on non-{requested} tag '{}' ({})",
            self.name,
            self.tag()
        ))
    }

    pub(crate) fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    pub(crate) fn replace_payload(&mut self, payload: Payload) -> Payload {
        mem::replace(&mut self.payload, payload)
    }

    /// Writes this node as a complete named tag in big-endian order.
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        self.save_with::<BigEndian, W>(writer)
    }

    pub fn save_with<O: ByteOrder, W: Write>(&self, writer: W) -> Result<()> {
        Writer::<W, O>::new(writer).write_named(&self.name, &self.payload)
    }
}
