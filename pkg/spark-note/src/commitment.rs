use spark_primitives::{Commitment, CommitmentHash, DigestFunction};

use crate::{Result, SecretError};

/// Commit to a value and a secret
///
/// The commitment is `SHA-256(value_be || secret)`, where `value_be` is the 8-byte big-endian
/// encoding of `value`. The fixed-width encoding makes the preimage canonical: there is exactly
/// one byte string for each `(value, secret)` pair.
///
/// Fails if `secret` is empty.
///
/// ```rust
/// # use spark_note::*;
/// let a = commit(1000, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
/// let b = commit(1000, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
/// let c = commit(1001, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
///
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// assert!(commit(1000, &[]).is_err());
/// ```
pub fn commit(value: u64, secret: &[u8]) -> Result<Commitment> {
    if secret.is_empty() {
        return Err(SecretError::Empty.into());
    }

    Ok(compute_commitment(value, secret))
}

/// [`commit`] without the secret check
pub(crate) fn compute_commitment(value: u64, secret: &[u8]) -> Commitment {
    let value = value.to_be_bytes();
    Commitment::new(CommitmentHash::digest_parts(&[&value[..], secret]))
}
