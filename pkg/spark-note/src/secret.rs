use std::fmt::Debug;

use rand::{rngs::OsRng, CryptoRng, RngCore};
use spark_primitives::decode_hex;

use crate::{Error, MalformedInput, Result, SecretError};

/// The private bytes that hide a note's value
///
/// A [`Secret`] is never empty. Its [`Debug`] output is redacted, so a secret can't end up in
/// logs by accident, but it is otherwise a plain byte buffer: it is not zeroed on drop, callers
/// that need erasure must manage the memory themselves.
///
/// ```rust
/// # use spark_note::*;
/// let secret = Secret::new(vec![1, 2, 3]).unwrap();
///
/// assert_eq!(secret.as_bytes(), &[1, 2, 3]);
/// assert_eq!(format!("{secret:?}"), "Secret(<3 bytes>)");
/// assert!(Secret::new(vec![]).is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Secret(Vec<u8>);

impl Secret {
    /// The length of secrets created by [`Secret::generate`]
    pub const DEFAULT_LEN: usize = 32;

    /// Create a [`Secret`], failing if `bytes` is empty
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();

        if bytes.is_empty() {
            return Err(SecretError::Empty.into());
        }

        Ok(Self(bytes))
    }

    /// Generate a [`Secret`] of [`Secret::DEFAULT_LEN`] bytes using the operating system's RNG
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = vec![0; Self::DEFAULT_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Generate a [`Secret`] of `len` bytes using a cryptographically secure RNG
    ///
    /// ```rust
    /// # use spark_note::*;
    /// let secret = Secret::random(&mut rand::rngs::OsRng, 16).unwrap();
    /// assert_eq!(secret.len(), 16);
    ///
    /// assert!(Secret::random(&mut rand::rngs::OsRng, 0).is_err());
    /// ```
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(SecretError::Empty.into());
        }

        let mut bytes = vec![0; len];
        rng.fill_bytes(&mut bytes);
        Ok(Self(bytes))
    }

    /// Decode a [`Secret`] from hex, with an optional `0x` prefix
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = decode_hex(s).map_err(|e| MalformedInput::Encoding {
            field: "secret",
            reason: e.to_string(),
        })?;

        Self::new(bytes)
    }

    /// Wrap bytes that have already been checked to be non-empty
    pub(crate) fn from_checked(bytes: Vec<u8>) -> Self {
        debug_assert!(!bytes.is_empty());
        Self(bytes)
    }

    /// The secret bytes
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The number of bytes in this secret (always at least 1)
    #[inline]
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Lowercase hex encoding of the secret bytes
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Take the secret bytes
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret(<{} bytes>)", self.0.len())
    }
}

impl AsRef<[u8]> for Secret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<Vec<u8>> for Secret {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::new(bytes)
    }
}

impl TryFrom<&[u8]> for Secret {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::new(bytes)
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::{rand_core::SeedableRng, ChaChaRng};

    use super::*;

    #[test]
    fn rejects_empty() {
        assert_eq!(Secret::new(Vec::new()), Err(Error::InvalidSecret(SecretError::Empty)));
        assert_eq!(
            Secret::try_from(&[][..]),
            Err(Error::InvalidSecret(SecretError::Empty))
        );
        assert_eq!(
            Secret::from_hex("0x"),
            Err(Error::InvalidSecret(SecretError::Empty))
        );
    }

    #[test]
    fn hex_round_trip() {
        let secret = Secret::from_hex("0x0102030405060708").unwrap();

        assert_eq!(secret.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(secret.to_hex(), "0102030405060708");
    }

    #[test]
    fn bad_hex_is_malformed() {
        let error = Secret::from_hex("abc").unwrap_err();

        assert!(error.is_malformed_input());
        assert_eq!(error.code(), "MALFORMED_ENCODING");
    }

    #[test]
    fn debug_is_redacted() {
        let secret = Secret::new(vec![0xde, 0xad, 0xbe, 0xef]).unwrap();
        let debug = format!("{secret:?}");

        assert_eq!(debug, "Secret(<4 bytes>)");
        assert!(!debug.contains("de"));
    }

    #[test]
    fn random_is_seeded_by_rng() {
        let mut rng_a = ChaChaRng::from_seed([0; 32]);
        let mut rng_b = ChaChaRng::from_seed([0; 32]);

        let a = Secret::random(&mut rng_a, 24).unwrap();
        let b = Secret::random(&mut rng_b, 24).unwrap();
        let c = Secret::random(&mut rng_a, 24).unwrap();

        assert_eq!(a.len(), 24);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn generated_secrets_differ() {
        let a = Secret::generate();
        let b = Secret::generate();

        assert_eq!(a.len(), Secret::DEFAULT_LEN);
        assert_ne!(a, b);
    }
}
