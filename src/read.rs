use std::{io::Read, marker::PhantomData};

use log::{debug, trace};
use zerocopy::{BigEndian, FromBytes, byteorder};

use crate::{
    ByteOrder, Compound, Error, List, Payload, ReadOptions, Result, Root, Tag, cold_path,
};

/// Recursive NBT decoder over any byte source.
///
/// Every primitive is read with `read_exact`, so a truncated stream surfaces
/// as [`Error::EndOfFile`] rather than as zero-filled data.
pub(crate) struct Reader<R, O: ByteOrder> {
    inner: R,
    options: ReadOptions,
    depth: usize,
    _marker: PhantomData<O>,
}

impl<R: Read, O: ByteOrder> Reader<R, O> {
    pub(crate) fn new(inner: R, options: ReadOptions) -> Self {
        Self {
            inner,
            options,
            depth: 0,
            _marker: PhantomData,
        }
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    #[inline]
    fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_array::<1>()?[0] as i8)
    }

    #[inline]
    fn read_i16(&mut self) -> Result<i16> {
        Ok(byteorder::I16::<O>::from_bytes(self.read_array()?).get())
    }

    #[inline]
    fn read_i32(&mut self) -> Result<i32> {
        Ok(byteorder::I32::<O>::from_bytes(self.read_array()?).get())
    }

    #[inline]
    fn read_i64(&mut self) -> Result<i64> {
        Ok(byteorder::I64::<O>::from_bytes(self.read_array()?).get())
    }

    #[inline]
    fn read_f32(&mut self) -> Result<f32> {
        Ok(byteorder::F32::<O>::from_bytes(self.read_array()?).get())
    }

    #[inline]
    fn read_f64(&mut self) -> Result<f64> {
        Ok(byteorder::F64::<O>::from_bytes(self.read_array()?).get())
    }

    fn read_tag(&mut self) -> Result<Tag> {
        Tag::try_from(self.read_array::<1>()?[0])
    }

    /// Validates a decoded length prefix.
    fn checked_len(len: i32) -> Result<usize> {
        if len < 0 {
            cold_path();
            return Err(Error::NegativeLength(len));
        }
        Ok(len as usize)
    }

    /// Reads exactly `len` bytes without trusting `len` for the allocation.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
        if buf.len() != len {
            cold_path();
            return Err(Error::EndOfFile);
        }
        Ok(buf)
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.read_i16()?;
        let len = Self::checked_len(len as i32)?;
        let bytes = self.read_bytes(len)?;
        simd_cesu8::mutf8::decode(&bytes)
            .map(|text| text.into_owned())
            .map_err(|_| Error::InvalidString)
    }

    fn read_byte_array(&mut self) -> Result<Vec<i8>> {
        let len = self.read_i32()?;
        let len = Self::checked_len(len)?;
        Ok(self
            .read_bytes(len)?
            .into_iter()
            .map(|byte| byte as i8)
            .collect())
    }

    fn read_int_array(&mut self) -> Result<Vec<i32>> {
        let len = self.read_i32()?;
        let len = Self::checked_len(len)?;
        let size = len.checked_mul(4).ok_or(Error::LengthOverflow(len))?;
        let bytes = self.read_bytes(size)?;
        let values = <[byteorder::I32<O>]>::ref_from_bytes(&bytes).map_err(|_| Error::EndOfFile)?;
        Ok(values.iter().map(|value| value.get()).collect())
    }

    /// Reads a named tag header. The name is absent for `End`.
    fn read_header(&mut self) -> Result<(Tag, String)> {
        let tag = self.read_tag()?;
        if tag == Tag::End {
            return Ok((tag, String::new()));
        }
        Ok((tag, self.read_string()?))
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            cold_path();
            return Err(Error::DepthLimitExceeded(self.options.max_depth));
        }
        Ok(())
    }

    fn read_payload(&mut self, tag: Tag) -> Result<Payload> {
        Ok(match tag {
            Tag::End => return Err(Error::InvalidTagType(Tag::End as u8)),
            Tag::Byte => Payload::Byte(self.read_i8()?),
            Tag::Short => Payload::Short(self.read_i16()?),
            Tag::Int => Payload::Int(self.read_i32()?),
            Tag::Long => Payload::Long(self.read_i64()?),
            Tag::Float => Payload::Float(self.read_f32()?),
            Tag::Double => Payload::Double(self.read_f64()?),
            Tag::ByteArray => Payload::ByteArray(self.read_byte_array()?),
            Tag::String => Payload::String(self.read_string()?),
            Tag::List => {
                self.enter()?;
                let list = self.read_list()?;
                self.depth -= 1;
                Payload::List(list)
            }
            Tag::Compound => {
                self.enter()?;
                let compound = self.read_compound()?;
                self.depth -= 1;
                Payload::Compound(compound)
            }
            Tag::IntArray => Payload::IntArray(self.read_int_array()?),
        })
    }

    fn read_list(&mut self) -> Result<List> {
        let element_type = self.read_tag()?;
        let len = self.read_i32()?;
        let len = Self::checked_len(len)?;
        if element_type == Tag::End && len != 0 {
            cold_path();
            return Err(Error::InvalidTagType(Tag::End as u8));
        }
        trace!("list of {len} {element_type} at depth {}", self.depth);

        // Cap the up-front allocation; the stream may lie about `len`.
        let mut list = List::with_capacity(element_type, len.min(1024));
        for _ in 0..len {
            let payload = self.read_payload(element_type)?;
            list.push_unchecked(payload);
        }
        Ok(list)
    }

    fn read_compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::new();
        loop {
            let (tag, name) = self.read_header()?;
            if tag == Tag::End {
                trace!("compound of {} at depth {}", compound.len(), self.depth);
                return Ok(compound);
            }
            let payload = self.read_payload(tag)?;
            compound.set(&name, payload);
        }
    }

    /// Reads one complete named tag, which must be a compound.
    pub(crate) fn read_root(&mut self) -> Result<Root> {
        let (tag, name) = self.read_header()?;
        if tag != Tag::Compound {
            cold_path();
            return Err(Error::UnexpectedRootTag(tag));
        }
        let compound = self.read_compound()?;
        debug!(
            "loaded root '{name}' with {} children ({})",
            compound.len(),
            std::any::type_name::<O>()
        );
        Ok(Root::from_parts(name, compound))
    }
}

/// Reads a big-endian tree from `reader`.
///
/// The stream must start with a named compound. Reading stops at the
/// compound's `End` byte; anything after it is left unread.
///
/// # Example
///
/// ```
/// use nbt_tree::load;
///
/// // Compound "" { Byte "flag" = 1 }
/// let data = [
///     0x0A, 0x00, 0x00, 0x01, 0x00, 0x04, b'f', b'l', b'a', b'g', 0x01, 0x00,
/// ];
/// let root = load(&data[..]).unwrap();
/// assert_eq!(root.at("flag").unwrap().byte(), 1);
/// ```
pub fn load<R: Read>(reader: R) -> Result<Root> {
    load_with::<BigEndian, R>(reader, ReadOptions::default())
}

/// Reads a tree in byte order `O` with explicit decoder options.
pub fn load_with<O: ByteOrder, R: Read>(reader: R, options: ReadOptions) -> Result<Root> {
    Reader::<R, O>::new(reader, options).read_root()
}
