use std::{io::Write, marker::PhantomData};

use log::debug;
use zerocopy::{BigEndian, IntoBytes, byteorder};

use crate::{
    ByteOrder, Compound, Error, List, Payload, Result, Root, Tag, cold_path,
    error::contract_fault,
};

/// Depth-first NBT encoder over any byte sink.
pub(crate) struct Writer<W, O: ByteOrder> {
    inner: W,
    _marker: PhantomData<O>,
}

impl<W: Write, O: ByteOrder> Writer<W, O> {
    pub(crate) fn new(inner: W) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    #[inline]
    fn write_tag(&mut self, tag: Tag) -> Result<()> {
        self.inner.write_all(&[tag as u8])?;
        Ok(())
    }

    fn write_i32_len(&mut self, len: usize) -> Result<()> {
        let Ok(len) = i32::try_from(len) else {
            cold_path();
            return Err(Error::LengthOverflow(len));
        };
        self.inner
            .write_all(&byteorder::I32::<O>::new(len).to_bytes())?;
        Ok(())
    }

    fn write_string(&mut self, value: &str) -> Result<()> {
        let data = simd_cesu8::mutf8::encode(value);
        let Ok(len) = i16::try_from(data.len()) else {
            cold_path();
            return Err(Error::LengthOverflow(data.len()));
        };
        self.inner
            .write_all(&byteorder::I16::<O>::new(len).to_bytes())?;
        self.inner.write_all(&data)?;
        Ok(())
    }

    fn write_byte_array(&mut self, value: &[i8]) -> Result<()> {
        self.write_i32_len(value.len())?;
        self.inner.write_all(value.as_bytes())?;
        Ok(())
    }

    fn write_int_array(&mut self, value: &[i32]) -> Result<()> {
        self.write_i32_len(value.len())?;
        let data: Vec<byteorder::I32<O>> = value
            .iter()
            .map(|&value| byteorder::I32::<O>::new(value))
            .collect();
        self.inner.write_all(data.as_bytes())?;
        Ok(())
    }

    fn write_header(&mut self, tag: Tag, name: &str) -> Result<()> {
        self.write_tag(tag)?;
        self.write_string(name)
    }

    fn write_payload(&mut self, payload: &Payload) -> Result<()> {
        match payload {
            Payload::Byte(value) => self.inner.write_all(&[*value as u8])?,
            Payload::Short(value) => self
                .inner
                .write_all(&byteorder::I16::<O>::new(*value).to_bytes())?,
            Payload::Int(value) => self
                .inner
                .write_all(&byteorder::I32::<O>::new(*value).to_bytes())?,
            Payload::Long(value) => self
                .inner
                .write_all(&byteorder::I64::<O>::new(*value).to_bytes())?,
            Payload::Float(value) => self
                .inner
                .write_all(&byteorder::F32::<O>::new(*value).to_bytes())?,
            Payload::Double(value) => self
                .inner
                .write_all(&byteorder::F64::<O>::new(*value).to_bytes())?,
            Payload::ByteArray(value) => self.write_byte_array(value)?,
            Payload::String(value) => self.write_string(value)?,
            Payload::List(list) => self.write_list(list)?,
            Payload::Compound(compound) => self.write_compound(compound)?,
            Payload::IntArray(value) => self.write_int_array(value)?,
        }
        Ok(())
    }

    fn write_list(&mut self, list: &List) -> Result<()> {
        let element_type = list.element_type();
        self.write_tag(element_type)?;
        self.write_i32_len(list.len())?;
        for element in list {
            if element.tag() != element_type {
                contract_fault(format_args!(
                    "list of {element_type} holds a {} element",
                    element.tag()
                ));
            }
            self.write_payload(element.payload())?;
        }
        Ok(())
    }

    fn write_compound(&mut self, compound: &Compound) -> Result<()> {
        for child in compound {
            self.write_named(child.name(), child.payload())?;
        }
        self.write_tag(Tag::End)
    }

    pub(crate) fn write_named(&mut self, name: &str, payload: &Payload) -> Result<()> {
        self.write_header(payload.tag(), name)?;
        self.write_payload(payload)
    }

    pub(crate) fn write_named_compound(&mut self, name: &str, compound: &Compound) -> Result<()> {
        self.write_header(Tag::Compound, name)?;
        self.write_compound(compound)?;
        self.inner.flush()?;
        debug!(
            "saved compound '{name}' with {} children ({})",
            compound.len(),
            std::any::type_name::<O>()
        );
        Ok(())
    }
}

/// Writes `root` to `writer` in big-endian order.
///
/// Many small writes are issued; wrap unbuffered sinks in a
/// [`BufWriter`](std::io::BufWriter).
pub fn save<W: Write>(root: &Root, writer: W) -> Result<()> {
    save_with::<BigEndian, W>(root, writer)
}

pub fn save_with<O: ByteOrder, W: Write>(root: &Root, writer: W) -> Result<()> {
    root.save_with::<O, W>(writer)
}
