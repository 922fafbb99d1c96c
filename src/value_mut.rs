use std::ops::Deref;

use crate::{Compound, List, Payload, Tag, Value, error::contract_fault};

/// Mutable access to a node owned by a [`List`] or a [`Compound`].
///
/// The view derefs to [`Value`] for reading. Writes go through the typed
/// `_mut` accessors or [`set`](MutValue::set). The node itself is never
/// handed out, so its name and parent marker stay fixed and a list element
/// keeps the list's element type.
///
/// ```compile_fail
/// use nbt_tree::make_root;
///
/// let mut root = make_root("");
/// root.set("a", 1i32);
/// root.set("b", 2i32);
/// let b = root.at("b").unwrap().clone();
/// *root.at_mut("a").unwrap() = b;
/// ```
#[derive(Debug)]
pub struct MutValue<'s> {
    value: &'s mut Value,
}

macro_rules! mut_accessor {
    ($($name:ident => $variant:ident: $ret:ty),* $(,)?) => {
        $(
            #[track_caller]
            pub fn $name(&mut self) -> &mut $ret {
                if self.value.tag() != Tag::$variant {
                    self.value.accessor_fault(Tag::$variant);
                }
                match self.value.payload_mut() {
                    Payload::$variant(value) => value,
                    _ => unreachable!(),
                }
            }
        )*
    };
}

impl<'s> MutValue<'s> {
    #[inline]
    pub(crate) fn new(value: &'s mut Value) -> Self {
        Self { value }
    }

    mut_accessor!(
        byte_array_mut => ByteArray: Vec<i8>,
        string_mut => String: String,
        list_mut => List: List,
        compound_mut => Compound: Compound,
        int_array_mut => IntArray: Vec<i32>,
    );

    /// Replaces the payload, and with it the discriminant, returning the old
    /// payload.
    ///
    /// # Panics
    ///
    /// Panics when this node is a list element. The list owns the element
    /// type, so elements are replaced through [`List::set`].
    #[track_caller]
    pub fn set(&mut self, payload: impl Into<Payload>) -> Payload {
        if self.value.parent() == Some(Tag::List) {
            contract_fault(format_args!(
                "set() must not be called directly on list items, use List::set()"
            ));
        }
        self.value.replace_payload(payload.into())
    }
}

impl Deref for MutValue<'_> {
    type Target = Value;

    #[inline]
    fn deref(&self) -> &Value {
        self.value
    }
}
