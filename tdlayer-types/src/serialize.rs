//! The [`Serializable`] trait and its implementations for the primitive types
//! used by the object schema.
//!
//! Layout follows TL binary serialization: little-endian integers, 4-byte
//! aligned strings, boxed vectors and boxed objects.

use crate::schema::id;

/// Serialize `self` into TL binary format.
pub trait Serializable {
    /// Appends the serialized form of `self` to `buf`.
    fn serialize(&self, buf: &mut impl Extend<u8>);

    /// Convenience: allocate a fresh `Vec<u8>` and serialize into it.
    fn to_bytes(&self) -> Vec<u8> {
        let mut v = Vec::new();
        self.serialize(&mut v);
        v
    }
}

// ─── Bool ────────────────────────────────────────────────────────────────────

impl Serializable for bool {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        let id = if *self { id::BOOL_TRUE } else { id::BOOL_FALSE };
        id.serialize(buf);
    }
}

// ─── int32 / int53 ───────────────────────────────────────────────────────────

macro_rules! impl_le_int {
    ($($ty:ty),*) => {$(
        impl Serializable for $ty {
            fn serialize(&self, buf: &mut impl Extend<u8>) {
                buf.extend(self.to_le_bytes());
            }
        }
    )*};
}

impl_le_int!(i32, u32, i64);

// ─── string ──────────────────────────────────────────────────────────────────

/// Short strings (< 254 bytes) carry a one-byte length; longer ones a `0xfe`
/// marker followed by a 3-byte length. The whole record is zero-padded to a
/// multiple of four.
impl Serializable for str {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        let data = self.as_bytes();
        let len = data.len();
        let header = if len < 254 { 1 } else { 4 };

        if header == 1 {
            buf.extend([len as u8]);
        } else {
            buf.extend([0xfe, len as u8, (len >> 8) as u8, (len >> 16) as u8]);
        }
        buf.extend(data.iter().copied());

        let padding = (4 - (header + len) % 4) % 4;
        buf.extend(std::iter::repeat_n(0u8, padding));
    }
}

impl Serializable for String {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.as_str().serialize(buf);
    }
}

// ─── Vector ──────────────────────────────────────────────────────────────────

impl<T: Serializable> Serializable for Vec<T> {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        id::VECTOR.serialize(buf);
        (self.len() as i32).serialize(buf);
        for item in self {
            item.serialize(buf);
        }
    }
}

// ─── Nullable objects ────────────────────────────────────────────────────────

/// Absent objects are written as the bare `null` constructor.
///
/// Only meaningful for boxed objects: a `None` integer would be
/// indistinguishable from a value.
impl<T: Serializable> Serializable for Option<T> {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Some(v) => v.serialize(buf),
            None => id::NULL.serialize(buf),
        }
    }
}
