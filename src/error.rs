//! Error types for NBT decoding, encoding and tree mutation.
//!
//! Failures come in two tiers. Conditions a caller can trigger (a missing
//! child, a bad index, a payload of the wrong kind, a malformed stream) are
//! returned as [`Error`]. Contract violations (calling [`Value::int`] on a
//! string, calling [`MutValue::set`] on a list element) panic, and [`catch`]
//! turns those panics back into [`Error::Fault`] at a boundary of the
//! caller's choosing.
//!
//! # Example
//!
//! ```
//! use nbt_tree::{Error, load};
//!
//! // Compound header, then a String child whose length prefix is negative.
//! let data = [0x0A, 0x00, 0x00, 0x08, 0x00, 0x01, b's', 0xFF, 0xFF];
//! match load(&data[..]) {
//!     Err(Error::NegativeLength(len)) => assert_eq!(len, -1),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! [`Value::int`]: crate::Value::int
//! [`MutValue::set`]: crate::MutValue::set

use std::{
    any::Any,
    fmt::{self, Display},
    io,
    panic::{self, AssertUnwindSafe},
};

use crate::Tag;

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// All recoverable failures of this crate.
#[derive(Debug)]
pub enum Error {
    /// An I/O error other than a short read.
    IO(io::Error),

    /// The input ended inside a tag.
    EndOfFile,

    /// A discriminant byte outside `0..=11`, or a non-empty list typed `End`.
    InvalidTagType(u8),

    /// A length prefix below zero.
    NegativeLength(i32),

    /// The stream does not start with a compound.
    UnexpectedRootTag(Tag),

    /// A name or string payload is not valid modified UTF-8.
    InvalidString,

    /// A string, array or list is too long for its length prefix.
    LengthOverflow(usize),

    /// Containers nest deeper than [`ReadOptions::max_depth`](crate::ReadOptions).
    DepthLimitExceeded(usize),

    /// No child with this name (or path segment) exists.
    ChildNotFound(String),

    /// A path walked through a child that is not a compound.
    ChildNotACompound { child: String, path: String },

    IndexOutOfRange { index: usize, len: usize },

    /// No payload can be built for this discriminant.
    InvalidPayloadType(Tag),

    /// A payload's kind differs from the list's element type.
    TagMismatch { expected: Tag, found: Tag },

    /// A contract fault caught by [`catch`].
    Fault(String),
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::UnexpectedEof {
            Error::EndOfFile
        } else {
            Error::IO(error)
        }
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::IO(error) => formatter.write_str(&error.to_string()),
            Error::EndOfFile => formatter.write_str("unexpected end of input"),
            Error::InvalidTagType(tag) => {
                formatter.write_str(&format!("invalid NBT tag type: {tag:#04x}"))
            }
            Error::NegativeLength(len) => {
                formatter.write_str(&format!("negative length prefix: {len}"))
            }
            Error::UnexpectedRootTag(tag) => {
                formatter.write_str(&format!("root tag must be Compound, got {tag}"))
            }
            Error::InvalidString => formatter.write_str("string is not valid modified UTF-8"),
            Error::LengthOverflow(len) => {
                formatter.write_str(&format!("length {len} does not fit its prefix"))
            }
            Error::DepthLimitExceeded(depth) => {
                formatter.write_str(&format!("nesting deeper than {depth} levels"))
            }
            Error::ChildNotFound(name) => formatter.write_str(&format!("'{name}' not found")),
            Error::ChildNotACompound { child, path } => formatter.write_str(&format!(
                "child '{child}' was found by path \"{path}\" but is not a Compound"
            )),
            Error::IndexOutOfRange { index, len } => formatter.write_str(&format!(
                "index {index} out of range for list of length {len}"
            )),
            Error::InvalidPayloadType(tag) => {
                formatter.write_str(&format!("no payload can be built for tag {tag}"))
            }
            Error::TagMismatch { expected, found } => formatter.write_str(&format!(
                "tag in list mismatch: expected {expected}, got {found}"
            )),
            Error::Fault(message) => formatter.write_str(message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IO(error) => Some(error),
            _ => None,
        }
    }
}

/// Aborts the current operation on a contract violation.
#[cold]
#[track_caller]
pub(crate) fn contract_fault(args: fmt::Arguments) -> ! {
    panic!("{args}")
}

/// Runs `f`, converting any panic raised inside it into [`Error::Fault`].
///
/// Errors returned by `f` itself pass through unchanged, so a whole block of
/// tree manipulation can use `?` and still report accessor misuse as a plain
/// error.
///
/// The default panic hook still prints the fault to stderr.
///
/// # Example
///
/// ```
/// use nbt_tree::{Error, catch, make_root};
///
/// let mut root = make_root("");
/// root.set("name", "test");
///
/// let result = catch(|| Ok(root.path("name")?.int()));
/// assert!(matches!(result, Err(Error::Fault(_))));
/// ```
pub fn catch<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(Error::Fault(fault_message(payload))),
    }
}

fn fault_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => (*message).to_owned(),
            Err(_) => "unknown fault".to_owned(),
        },
    }
}
