use std::{
    io::Write,
    ops::{Deref, DerefMut},
};

use zerocopy::BigEndian;

use crate::{ByteOrder, Compound, Result};

/// The parentless compound at the top of a tree.
///
/// `Root` dereferences to its [`Compound`], so every compound operation is
/// available on it directly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Root {
    name: String,
    compound: Compound,
}

impl Root {
    pub(crate) fn from_parts(name: String, compound: Compound) -> Self {
        Self { name, compound }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_compound(self) -> Compound {
        self.compound
    }

    /// Writes the whole tree in big-endian order.
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        self.compound.save(&self.name, writer)
    }

    pub fn save_with<O: ByteOrder, W: Write>(&self, writer: W) -> Result<()> {
        self.compound.save_with::<O, W>(&self.name, writer)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.save_with::<BigEndian, _>(&mut out)?;
        Ok(out)
    }
}

impl Deref for Root {
    type Target = Compound;

    fn deref(&self) -> &Compound {
        &self.compound
    }
}

impl DerefMut for Root {
    fn deref_mut(&mut self) -> &mut Compound {
        &mut self.compound
    }
}

/// Creates an empty root compound named `name`.
pub fn make_root(name: impl Into<String>) -> Root {
    Root::from_parts(name.into(), Compound::new())
}
