//! The [`Deserializable`] trait, [`Cursor`] buffer, and primitive impls.

use std::fmt;

use crate::schema::id;

// ─── Error ───────────────────────────────────────────────────────────────────

/// Errors that can occur during deserialization.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Ran out of bytes before the value was fully read.
    UnexpectedEof,
    /// Decoded a constructor ID that doesn't match any expected variant.
    UnexpectedConstructor { id: u32 },
    /// A string field did not hold valid UTF-8.
    InvalidUtf8,
    /// A vector announced a negative length.
    NegativeLength(i32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected end of buffer"),
            Self::UnexpectedConstructor { id } => {
                write!(f, "unexpected constructor id: {id:#010x}")
            }
            Self::InvalidUtf8 => write!(f, "string is not valid UTF-8"),
            Self::NegativeLength(n) => write!(f, "negative vector length: {n}"),
        }
    }
}

impl std::error::Error for Error {}

/// Specialized `Result` for deserialization.
pub type Result<T> = std::result::Result<T, Error>;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// A zero-copy cursor over an in-memory byte slice.
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the start of `buf`.
    pub fn from_slice(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize { self.pos }

    /// Remaining bytes.
    pub fn remaining(&self) -> usize { self.buf.len() - self.pos }

    /// Borrow the next `n` bytes and advance past them.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(Error::UnexpectedEof)?;
        let slice = self.buf.get(self.pos..end).ok_or(Error::UnexpectedEof)?;
        self.pos = end;
        Ok(slice)
    }

    /// Look at the next constructor ID without consuming it.
    pub fn peek_u32(&self) -> Result<u32> {
        let bytes = self.buf.get(self.pos..self.pos + 4).ok_or(Error::UnexpectedEof)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Consume all remaining bytes.
    pub fn take_rest(&mut self) -> Vec<u8> {
        let rest = self.buf[self.pos..].to_vec();
        self.pos = self.buf.len();
        rest
    }
}

/// Alias used by the object impls: `crate::deserialize::Buffer<'_, '_>`.
pub type Buffer<'a, 'b> = &'a mut Cursor<'b>;

/// Read a constructor ID and fail unless it equals `expected`.
pub fn expect_constructor(buf: Buffer, expected: u32) -> Result<()> {
    match u32::deserialize(buf)? {
        id if id == expected => Ok(()),
        id => Err(Error::UnexpectedConstructor { id }),
    }
}

// ─── Deserializable ──────────────────────────────────────────────────────────

/// Deserialize a value from TL binary format.
pub trait Deserializable: Sized {
    /// Read `Self` from `buf`, advancing its position.
    fn deserialize(buf: Buffer) -> Result<Self>;

    /// Convenience: deserialize from a byte slice.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::from_slice(bytes);
        Self::deserialize(&mut cursor)
    }
}

// ─── Primitives ──────────────────────────────────────────────────────────────

impl Deserializable for bool {
    fn deserialize(buf: Buffer) -> Result<Self> {
        match u32::deserialize(buf)? {
            id::BOOL_TRUE => Ok(true),
            id::BOOL_FALSE => Ok(false),
            id => Err(Error::UnexpectedConstructor { id }),
        }
    }
}

macro_rules! impl_le_int {
    ($($ty:ty),*) => {$(
        impl Deserializable for $ty {
            fn deserialize(buf: Buffer) -> Result<Self> {
                let mut b = [0u8; size_of::<$ty>()];
                b.copy_from_slice(buf.take(size_of::<$ty>())?);
                Ok(<$ty>::from_le_bytes(b))
            }
        }
    )*};
}

impl_le_int!(i32, u32, i64);

impl Deserializable for String {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let first = buf.take(1)?[0];
        let (header, len) = if first < 254 {
            (1, first as usize)
        } else {
            let l = buf.take(3)?;
            (4, l[0] as usize | (l[1] as usize) << 8 | (l[2] as usize) << 16)
        };

        let data = buf.take(len)?.to_vec();
        buf.take((4 - (header + len) % 4) % 4)?;

        String::from_utf8(data).map_err(|_| Error::InvalidUtf8)
    }
}

impl<T: Deserializable> Deserializable for Vec<T> {
    fn deserialize(buf: Buffer) -> Result<Self> {
        expect_constructor(buf, id::VECTOR)?;
        let len = i32::deserialize(buf)?;
        if len < 0 {
            return Err(Error::NegativeLength(len));
        }
        (0..len).map(|_| T::deserialize(buf)).collect()
    }
}

impl<T: Deserializable> Deserializable for Option<T> {
    fn deserialize(buf: Buffer) -> Result<Self> {
        if buf.peek_u32()? == id::NULL {
            buf.take(4)?;
            return Ok(None);
        }
        T::deserialize(buf).map(Some)
    }
}
