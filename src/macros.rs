/// Declares a signature type backed by the raw big-endian signature bytes.
///
/// Keeping the bytes rather than an integer preserves leading zero octets,
/// so the encoding is always exactly as long as the modulus.
macro_rules! byte_signature {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name {
            pub(super) inner: ::alloc::boxed::Box<[u8]>,
        }

        impl ::signature::SignatureEncoding for $name {
            type Repr = ::alloc::boxed::Box<[u8]>;
        }

        impl TryFrom<&[u8]> for $name {
            type Error = ::signature::Error;

            fn try_from(bytes: &[u8]) -> ::signature::Result<Self> {
                if bytes.is_empty() {
                    return Err(::signature::Error::new());
                }
                Ok(Self {
                    inner: bytes.into(),
                })
            }
        }

        impl From<$name> for ::alloc::boxed::Box<[u8]> {
            fn from(signature: $name) -> ::alloc::boxed::Box<[u8]> {
                signature.inner
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.inner
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_tuple(stringify!($name))
                    .field(&format_args!("{:X}", self))
                    .finish()
            }
        }

        impl ::core::fmt::LowerHex for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                self.inner.iter().try_for_each(|b| write!(f, "{:02x}", b))
            }
        }

        impl ::core::fmt::UpperHex for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                self.inner.iter().try_for_each(|b| write!(f, "{:02X}", b))
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{:X}", self)
            }
        }
    };
}
