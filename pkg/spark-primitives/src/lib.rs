#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![deny(missing_docs)]

//! Fixed-size digests and the hash functions that produce them
//!
//! Spark uses two separate 32-byte hash domains: note commitments are SHA-256 digests and
//! nullifiers are BLAKE3 digests. Each domain gets its own newtype ([`Commitment`] and
//! [`Nullifier`]) and its own [`DigestFunction`], so a value from one domain can't be passed
//! where the other is expected.
//!
//! ```rust
//! # use spark_primitives::*;
//! let commitment = Commitment::new(CommitmentHash::digest(b"hello"));
//! let nullifier = Nullifier::new(NullifierHash::digest(b"hello"));
//!
//! // same input, different hash domains
//! assert_ne!(commitment.inner(), nullifier.inner());
//! ```

mod digest;
mod error;
mod hash;
#[cfg(feature = "serde")]
mod hex_serde;

pub use digest::{decode_hex, Commitment, Nullifier, DIGEST_LEN};
pub use error::{InvalidLength, ParseDigestError};
pub use hash::{Blake3Digest, DigestFunction, Sha256Digest};

#[cfg(feature = "test-api")]
pub use hash::{digest_count, reset_digest_count};

/// The hash function used to compute note commitments
pub type CommitmentHash = Sha256Digest;

/// The hash function used to compute nullifiers
///
/// This must never be the same function as [`CommitmentHash`]
pub type NullifierHash = Blake3Digest;
