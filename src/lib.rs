//! A mutable, type-checked tree for NBT (Named Binary Tag) data.
//!
//! [`load`] decodes a byte stream into a [`Root`] compound, the tree is
//! navigated and edited through [`Compound`], [`List`] and [`MutValue`], and
//! [`save`] encodes it back. Children keep their order, so an unmodified tree
//! saves to the exact bytes it was loaded from.
//!
//! Compression is not handled here; wrap the reader or writer in a
//! decoder/encoder (e.g. `flate2`) for gzipped files.
//!
//! # Example
//!
//! ```
//! use nbt_tree::{List, Tag, load, make_root};
//!
//! let mut nums = List::new(Tag::Int);
//! for n in [1i32, 2, 3] {
//!     nums.add(n).unwrap();
//! }
//!
//! let mut root = make_root("");
//! root.set("flag", 1i8);
//! root.set("name", "test");
//! root.set("nums", nums);
//!
//! let bytes = root.to_vec().unwrap();
//! let loaded = load(&bytes[..]).unwrap();
//! assert_eq!(loaded, root);
//! assert_eq!(loaded.path("nums").unwrap().list().at(1).unwrap().int(), 2);
//! ```

pub use zerocopy::BigEndian;
pub use zerocopy::LittleEndian;

mod compound;
mod display;
mod error;
mod list;
mod read;
mod root;
#[cfg(feature = "serde")]
mod ser;
mod tag;
mod util;
mod value;
mod value_mut;
mod write;

pub use compound::*;
pub use error::{Error, Result, catch};
pub use list::*;
pub use read::{load, load_with};
pub use root::*;
pub use tag::*;
pub use util::{ByteOrder, ReadOptions};
pub(crate) use util::cold_path;
pub use value::*;
pub use value_mut::MutValue;
pub use write::{save, save_with};
