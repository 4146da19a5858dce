use spark_primitives::{Commitment, DigestFunction, Nullifier, NullifierHash};

use crate::{Note, Result, SecretError};

/// Derive the nullifier for `note` under `secret`
///
/// The nullifier is `BLAKE3(commitment || secret)`. It uses a different hash function from the
/// commitment, so a nullifier can never be mistaken for a commitment, and it can't be linked back
/// to the note's commitment without the secret.
///
/// `secret` is usually the note's own secret (see [`Note::nullifier`]), but any non-empty secret
/// is accepted. Fails if `secret` is empty.
///
/// ```rust
/// # use spark_note::*;
/// let note = create_note(1000, b"secret").unwrap();
///
/// let nullifier = generate_nullifier(&note, b"secret").unwrap();
/// assert_eq!(nullifier, note.nullifier());
/// assert_ne!(nullifier, generate_nullifier(&note, b"other").unwrap());
/// ```
pub fn generate_nullifier(note: &Note, secret: &[u8]) -> Result<Nullifier> {
    if secret.is_empty() {
        return Err(SecretError::Empty.into());
    }

    Ok(compute_nullifier(&note.commitment(), secret))
}

/// [`generate_nullifier`] without the secret check
pub(crate) fn compute_nullifier(commitment: &Commitment, secret: &[u8]) -> Nullifier {
    Nullifier::new(NullifierHash::digest_parts(&[commitment.as_slice(), secret]))
}
