/// Declare a TL constructor: the struct itself plus its [`Identifiable`],
/// [`Serializable`] and [`Deserializable`] impls.
///
/// Objects are always boxed on the wire: the constructor ID is written first
/// and checked on read. Enums that already consumed the ID call the generated
/// `deserialize_body` directly.
///
/// [`Identifiable`]: crate::Identifiable
/// [`Serializable`]: crate::Serializable
/// [`Deserializable`]: crate::Deserializable
macro_rules! tl_constructor {
    (
        $(#[$meta:meta])*
        pub struct $name:ident = $id:path {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        #[cfg_attr(feature = "impl-serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl crate::Identifiable for $name {
            const CONSTRUCTOR_ID: u32 = $id;
        }

        impl crate::Serializable for $name {
            #[allow(unused_variables)]
            fn serialize(&self, buf: &mut impl Extend<u8>) {
                crate::Serializable::serialize(&$id, buf);
                $( crate::Serializable::serialize(&self.$field, buf); )*
            }
        }

        impl $name {
            #[allow(unused_variables)]
            pub(crate) fn deserialize_body(
                buf: crate::deserialize::Buffer,
            ) -> crate::deserialize::Result<Self> {
                ::std::result::Result::Ok(Self {
                    $( $field: crate::Deserializable::deserialize(buf)?, )*
                })
            }
        }

        impl crate::Deserializable for $name {
            fn deserialize(buf: crate::deserialize::Buffer) -> crate::deserialize::Result<Self> {
                crate::deserialize::expect_constructor(buf, $id)?;
                Self::deserialize_body(buf)
            }
        }
    };
}
