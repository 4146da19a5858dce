use std::borrow::Borrow;
use std::fmt::{Debug, Display};
use std::str::FromStr;

use subtle::ConstantTimeEq;

use crate::{InvalidLength, ParseDigestError};

/// The length in bytes of every Spark digest
pub const DIGEST_LEN: usize = 32;

/// Decode a hex string, ignoring an optional `0x` prefix
///
/// Both upper and lower case digits are accepted
///
/// ```rust
/// # use spark_primitives::*;
/// assert_eq!(decode_hex("0x0aFF").unwrap(), vec![0x0a, 0xff]);
/// assert_eq!(decode_hex("0aff").unwrap(), vec![0x0a, 0xff]);
/// assert!(decode_hex("0xzz").is_err());
/// ```
pub fn decode_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s)
}

macro_rules! digest_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "borsh", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        // serialize as a bare hex string rather than a single element tuple
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(
            #[cfg_attr(feature = "serde", serde(with = "crate::hex_serde"))] [u8; DIGEST_LEN],
        );

        impl $name {
            /// The size of this digest in bytes
            pub const SIZE: usize = DIGEST_LEN;

            #[doc = concat!("Create a [`", stringify!($name), "`] from its raw bytes")]
            #[inline]
            #[must_use]
            pub const fn new(bytes: [u8; DIGEST_LEN]) -> Self {
                Self(bytes)
            }

            #[doc = concat!("Create a [`", stringify!($name), "`] from a slice of exactly [`DIGEST_LEN`] bytes")]
            pub fn from_slice(slice: &[u8]) -> Result<Self, InvalidLength> {
                <[u8; DIGEST_LEN]>::try_from(slice)
                    .map(Self)
                    .map_err(|_| InvalidLength {
                        expected: DIGEST_LEN,
                        got: slice.len(),
                    })
            }

            /// The raw bytes
            #[inline]
            #[must_use]
            pub fn inner(&self) -> &[u8; DIGEST_LEN] {
                &self.0
            }

            /// The raw bytes
            #[inline]
            #[must_use]
            pub fn into_inner(self) -> [u8; DIGEST_LEN] {
                self.0
            }

            /// The raw bytes as a slice
            #[inline]
            #[must_use]
            pub fn as_slice(&self) -> &[u8] {
                &self.0
            }

            /// Copy the raw bytes into a [`Vec`]
            #[must_use]
            pub fn to_vec(self) -> Vec<u8> {
                self.0.to_vec()
            }

            /// Lowercase hex encoding of all the bytes
            #[must_use]
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            /// Lowercase hex encoding of the first 8 bytes, for logs and display
            #[must_use]
            pub fn short_hex(&self) -> String {
                hex::encode(&self.0[..8])
            }

            /// Compare with another value in constant time
            #[must_use]
            pub fn ct_eq(&self, other: &Self) -> bool {
                self.0.ct_eq(&other.0).into()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.short_hex())
            }
        }

        impl Borrow<[u8]> for $name {
            fn borrow(&self) -> &[u8] {
                &self.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; DIGEST_LEN]> for $name {
            fn from(bytes: [u8; DIGEST_LEN]) -> Self {
                Self(bytes)
            }
        }

        impl From<$name> for [u8; DIGEST_LEN] {
            fn from(digest: $name) -> Self {
                digest.0
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = InvalidLength;

            fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
                Self::from_slice(slice)
            }
        }

        impl FromStr for $name {
            type Err = ParseDigestError;

            #[inline]
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bytes = decode_hex(s)?;
                Ok(Self::from_slice(&bytes)?)
            }
        }

        #[cfg(any(test, feature = "proptest"))]
        impl ::proptest::arbitrary::Arbitrary for $name {
            type Parameters = ();
            type Strategy = ::proptest::strategy::Map<
                ::proptest::arbitrary::StrategyFor<[u8; DIGEST_LEN]>,
                fn([u8; DIGEST_LEN]) -> Self,
            >;

            fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
                use ::proptest::strategy::Strategy;

                ::proptest::arbitrary::any::<[u8; DIGEST_LEN]>().prop_map(|bytes| Self(bytes))
            }
        }
    };
}

digest_type! {
    /// A commitment to a note's value and secret
    ///
    /// Commitments are public: they bind a note's contents without revealing them
    Commitment
}

digest_type! {
    /// A nullifier, revealed when a note is spent
    ///
    /// A note has exactly one nullifier for a given spending secret. Publishing it marks the note
    /// as spent without revealing which commitment it belongs to
    Nullifier
}
