use std::{io::Write, ops::ControlFlow, slice};

use zerocopy::BigEndian;

use crate::{
    ByteOrder, Error, MutValue, Payload, Result, Tag, Value, util::cold_path, write::Writer,
};

/// Named children with unique names.
///
/// Children are kept in insertion order, so a tree loaded from bytes saves
/// back to the same bytes. Lookup is a linear scan over the names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Compound {
    children: Vec<Value>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|child| child.name() == name)
    }

    /// The child named `name`, or `None`.
    pub fn at(&self, name: &str) -> Option<&Value> {
        self.children.iter().find(|child| child.name() == name)
    }

    /// Mutable access to the child named `name`, or `None`.
    pub fn at_mut(&mut self, name: &str) -> Option<MutValue<'_>> {
        self.child_mut(name).map(MutValue::new)
    }

    fn child_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.children.iter_mut().find(|child| child.name() == name)
    }

    /// Calls `visitor` with every child in insertion order until it breaks.
    ///
    /// # Example
    ///
    /// ```
    /// use std::ops::ControlFlow;
    ///
    /// use nbt_tree::make_root;
    ///
    /// let mut root = make_root("");
    /// root.set("a", 1i32);
    /// root.set("b", 2i32);
    ///
    /// let mut seen = Vec::new();
    /// root.each(|name, _| {
    ///     seen.push(name.to_owned());
    ///     ControlFlow::Break(())
    /// });
    /// assert_eq!(seen, ["a"]);
    /// ```
    pub fn each<F>(&self, mut visitor: F)
    where
        F: FnMut(&str, &Value) -> ControlFlow<()>,
    {
        for child in &self.children {
            if visitor(child.name(), child).is_break() {
                break;
            }
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.children.iter()
    }

    /// Resolves a `/`-separated sequence of child names through nested
    /// compounds.
    ///
    /// Each segment must name a child exactly. Every segment but the last
    /// must name a compound.
    ///
    /// # Example
    ///
    /// ```
    /// use nbt_tree::{Compound, Error, make_root};
    ///
    /// let mut b = Compound::new();
    /// b.set("c", 5i32);
    /// let mut a = Compound::new();
    /// a.set("b", b);
    /// let mut root = make_root("");
    /// root.set("a", a);
    ///
    /// assert_eq!(root.path("a/b/c").unwrap().int(), 5);
    /// assert!(matches!(root.path("a/x"), Err(Error::ChildNotFound(_))));
    /// ```
    pub fn path(&self, path: &str) -> Result<&Value> {
        let (parents, last) = split_path(path);
        let mut current = self;
        for segment in parents {
            current = current.step(segment, path)?;
        }
        current
            .at(last)
            .ok_or_else(|| Error::ChildNotFound(last.to_owned()))
    }

    pub fn path_mut(&mut self, path: &str) -> Result<MutValue<'_>> {
        let (parents, last) = split_path(path);
        let mut current = self;
        for segment in parents {
            current = current.step_mut(segment, path)?;
        }
        current
            .child_mut(last)
            .map(MutValue::new)
            .ok_or_else(|| Error::ChildNotFound(last.to_owned()))
    }

    fn step(&self, segment: &str, path: &str) -> Result<&Compound> {
        let Some(child) = self.at(segment) else {
            cold_path();
            return Err(Error::ChildNotFound(segment.to_owned()));
        };
        match child.payload() {
            Payload::Compound(compound) => Ok(compound),
            _ => {
                cold_path();
                Err(Error::ChildNotACompound {
                    child: segment.to_owned(),
                    path: path.to_owned(),
                })
            }
        }
    }

    fn step_mut(&mut self, segment: &str, path: &str) -> Result<&mut Compound> {
        let Some(child) = self.child_mut(segment) else {
            cold_path();
            return Err(Error::ChildNotFound(segment.to_owned()));
        };
        match child.payload_mut() {
            Payload::Compound(compound) => Ok(compound),
            _ => {
                cold_path();
                Err(Error::ChildNotACompound {
                    child: segment.to_owned(),
                    path: path.to_owned(),
                })
            }
        }
    }

    /// Sets the child named `name` to `payload`, returning the payload it
    /// replaced.
    ///
    /// An existing child is updated in place and may change its
    /// discriminant. Otherwise a new child is appended.
    pub fn set(&mut self, name: &str, payload: impl Into<Payload>) -> Option<Payload> {
        let payload = payload.into();
        match self.position(name) {
            Some(index) => Some(self.children[index].replace_payload(payload)),
            None => {
                self.push_unchecked(name.to_owned(), payload);
                None
            }
        }
    }

    /// Detaches the child named `name` and returns its payload.
    pub fn remove(&mut self, name: &str) -> Result<Payload> {
        match self.position(name) {
            Some(index) => Ok(self.children.remove(index).into_payload()),
            None => {
                cold_path();
                Err(Error::ChildNotFound(name.to_owned()))
            }
        }
    }

    /// Writes this compound as a complete named tag: its header, every child
    /// in [`each`](Compound::each) order, then the `End` byte.
    ///
    /// A compound does not know its own name, so the header name is passed
    /// in. A compound reached through the tree is saved with its own name by
    /// [`Value::save`], and a whole tree by [`Root::save`](crate::Root::save).
    pub fn save<W: Write>(&self, name: &str, writer: W) -> Result<()> {
        self.save_with::<BigEndian, W>(name, writer)
    }

    pub fn save_with<O: ByteOrder, W: Write>(&self, name: &str, writer: W) -> Result<()> {
        Writer::<W, O>::new(writer).write_named_compound(name, self)
    }

    pub(crate) fn push_unchecked(&mut self, name: String, payload: Payload) {
        debug_assert!(self.position(&name).is_none());
        self.children
            .push(Value::new(name, Some(Tag::Compound), payload));
    }
}

/// Splits `a/b/c` into the intermediate segments `a`, `b` and the final `c`.
fn split_path(path: &str) -> (impl Iterator<Item = &str>, &str) {
    match path.rsplit_once('/') {
        Some((parents, last)) => (Some(parents.split('/')).into_iter().flatten(), last),
        None => (None.into_iter().flatten(), path),
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
