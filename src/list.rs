use std::slice;

use crate::{Error, MutValue, Payload, Result, Tag, Value, util::cold_path};

/// An ordered, homogeneous sequence of unnamed nodes.
///
/// Every element has the list's [`element_type`](List::element_type). The
/// list checks this on every insertion and replacement, which is why its
/// elements cannot be changed through [`MutValue::set`].
#[derive(Clone, Debug, PartialEq)]
pub struct List {
    element_type: Tag,
    elements: Vec<Value>,
}

impl Default for List {
    fn default() -> Self {
        Self::new(Tag::End)
    }
}

impl List {
    /// Creates an empty list whose elements must all be `element_type`.
    ///
    /// An `End`-typed list stays empty; this is how empty lists usually
    /// appear on the wire.
    pub fn new(element_type: Tag) -> Self {
        Self {
            element_type,
            elements: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(element_type: Tag, capacity: usize) -> Self {
        Self {
            element_type,
            elements: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn element_type(&self) -> Tag {
        self.element_type
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn at(&self, index: usize) -> Result<&Value> {
        let len = self.len();
        self.elements
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Mutable access to an element, for reaching into nested containers
    /// and arrays. The element's discriminant cannot change through it.
    pub fn at_mut(&mut self, index: usize) -> Result<MutValue<'_>> {
        let len = self.len();
        self.elements
            .get_mut(index)
            .map(MutValue::new)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.elements.iter()
    }

    fn check(&self, payload: &Payload) -> Result<()> {
        let found = payload.tag();
        if found != self.element_type {
            cold_path();
            return Err(Error::TagMismatch {
                expected: self.element_type,
                found,
            });
        }
        Ok(())
    }

    /// Replaces the payload of the element at `index`, returning the old one.
    ///
    /// The index is checked first, then the payload kind against the
    /// element type.
    pub fn set(&mut self, index: usize, payload: impl Into<Payload>) -> Result<Payload> {
        let payload = payload.into();
        let len = self.len();
        if index >= len {
            cold_path();
            return Err(Error::IndexOutOfRange { index, len });
        }
        self.check(&payload)?;
        Ok(self.elements[index].replace_payload(payload))
    }

    /// Appends a new unnamed element.
    pub fn add(&mut self, payload: impl Into<Payload>) -> Result<()> {
        let payload = payload.into();
        self.check(&payload)?;
        self.push_unchecked(payload);
        Ok(())
    }

    /// Appends the zero value of the element type.
    ///
    /// Fails with [`Error::InvalidPayloadType`] on an `End`-typed list.
    pub fn add_default(&mut self) -> Result<()> {
        let payload = Payload::default_for(self.element_type)?;
        self.push_unchecked(payload);
        Ok(())
    }

    /// Removes the element at `index`, shifting the rest down.
    pub fn remove(&mut self, index: usize) -> Result<Payload> {
        let len = self.len();
        if index >= len {
            cold_path();
            return Err(Error::IndexOutOfRange { index, len });
        }
        Ok(self.elements.remove(index).into_payload())
    }

    pub(crate) fn push_unchecked(&mut self, payload: Payload) {
        debug_assert_eq!(payload.tag(), self.element_type);
        self.elements
            .push(Value::new(String::new(), Some(Tag::List), payload));
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
