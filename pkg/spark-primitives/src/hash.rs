use sha2::Digest as _;

use crate::DIGEST_LEN;

#[cfg(feature = "test-api")]
thread_local! {
    static DIGEST_COUNTER: core::cell::Cell<usize> = const { core::cell::Cell::new(0) };
}

/// The number of digests computed on the current thread
///
/// The counter is thread-local so that tests running in parallel don't see each other's hashes
#[cfg(feature = "test-api")]
#[must_use]
pub fn digest_count() -> usize {
    DIGEST_COUNTER.with(core::cell::Cell::get)
}

/// Reset the count returned by [`digest_count`] to 0
#[cfg(feature = "test-api")]
pub fn reset_digest_count() {
    DIGEST_COUNTER.with(|counter| counter.set(0));
}

#[inline]
fn record_digest() {
    #[cfg(feature = "test-api")]
    DIGEST_COUNTER.with(|counter| counter.set(counter.get() + 1));
}

/// A cryptographic hash function with a 32-byte output
///
/// Implementors are zero-sized markers, the hash is selected by type:
///
/// ```rust
/// # use spark_primitives::*;
/// fn hash_twice<H: DigestFunction>(bytes: &[u8]) -> [u8; 32] {
///     H::digest(&H::digest(bytes))
/// }
///
/// assert_ne!(hash_twice::<Sha256Digest>(b"abc"), hash_twice::<Blake3Digest>(b"abc"));
/// ```
pub trait DigestFunction {
    /// A short, human readable name for this hash function
    const NAME: &'static str;

    /// Hash the concatenation of `parts`
    ///
    /// The parts are fed to the hasher back to back, with no separators or length prefixes, so
    /// this is equivalent to hashing `parts.concat()`:
    ///
    /// ```rust
    /// # use spark_primitives::*;
    /// let split = Sha256Digest::digest_parts(&[&b"ab"[..], &b"c"[..]]);
    /// let joined = Sha256Digest::digest(b"abc");
    ///
    /// assert_eq!(split, joined);
    /// ```
    fn digest_parts(parts: &[&[u8]]) -> [u8; DIGEST_LEN];

    /// Hash a single slice of bytes
    #[inline]
    #[must_use]
    fn digest(bytes: &[u8]) -> [u8; DIGEST_LEN] {
        Self::digest_parts(&[bytes])
    }
}

/// SHA-256
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Digest;

impl DigestFunction for Sha256Digest {
    const NAME: &'static str = "sha256";

    fn digest_parts(parts: &[&[u8]]) -> [u8; DIGEST_LEN] {
        record_digest();

        let mut hasher = sha2::Sha256::new();
        for part in parts {
            hasher.update(part);
        }

        hasher.finalize().into()
    }
}

/// BLAKE3 in its default (unkeyed) hashing mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake3Digest;

impl DigestFunction for Blake3Digest {
    const NAME: &'static str = "blake3";

    fn digest_parts(parts: &[&[u8]]) -> [u8; DIGEST_LEN] {
        record_digest();

        let mut hasher = blake3::Hasher::new();
        for part in parts {
            hasher.update(part);
        }

        *hasher.finalize().as_bytes()
    }
}
