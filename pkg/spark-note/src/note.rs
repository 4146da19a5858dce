use spark_primitives::{Commitment, Nullifier};

use crate::commitment::compute_commitment;
use crate::json::NoteJson;
use crate::nullifier::compute_nullifier;
use crate::{NotePolicy, Result, Secret};

/// A private note: a value, the secret that hides it, and the commitment that binds them
///
/// The commitment is computed once, when the note is created, and the fields can't be changed
/// afterwards, so a [`Note`] always satisfies `commitment == commit(value, secret)`. Notes
/// decoded from json are recomputed and checked unless the [`NotePolicy`] says otherwise.
///
/// ```rust
/// # use spark_note::*;
/// let note = create_note(1000, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
///
/// assert_eq!(note.value(), 1000);
/// assert_eq!(note.commitment(), commit(1000, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap());
/// assert!(note.verify());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "NoteJson", try_from = "NoteJson")]
pub struct Note {
    value: u64,
    secret: Secret,
    commitment: Commitment,
}

impl Note {
    /// Create a [`Note`], computing its commitment
    #[must_use]
    pub fn new(value: u64, secret: Secret) -> Self {
        let commitment = compute_commitment(value, secret.as_bytes());
        tracing::trace!(commitment = %commitment.short_hex(), "created note");

        Self {
            value,
            secret,
            commitment,
        }
    }

    /// Build a [`Note`] from parts without recomputing the commitment
    ///
    /// Only used when decoding with commitment verification turned off
    pub(crate) fn from_parts_unchecked(value: u64, secret: Secret, commitment: Commitment) -> Self {
        Self {
            value,
            secret,
            commitment,
        }
    }

    /// The hidden value
    #[inline]
    #[must_use]
    pub fn value(&self) -> u64 {
        self.value
    }

    /// The secret that hides the value
    #[inline]
    #[must_use]
    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    /// The commitment to the value and secret
    #[inline]
    #[must_use]
    pub fn commitment(&self) -> Commitment {
        self.commitment
    }

    /// The nullifier of this note under its own secret
    ///
    /// This is the nullifier a holder of the note publishes when they spend it
    #[must_use]
    pub fn nullifier(&self) -> Nullifier {
        compute_nullifier(&self.commitment, self.secret.as_bytes())
    }

    /// Recompute the commitment and compare it (in constant time) with the stored one
    ///
    /// Always true for notes built by [`Note::new`] or decoded with verification on
    #[must_use]
    pub fn verify(&self) -> bool {
        compute_commitment(self.value, self.secret.as_bytes()).ct_eq(&self.commitment)
    }

    /// Take the parts of this note
    #[must_use]
    pub fn into_parts(self) -> (u64, Secret, Commitment) {
        (self.value, self.secret, self.commitment)
    }
}

/// Create a [`Note`] from a value and secret bytes
///
/// Fails with [`Error::InvalidSecret`](crate::Error::InvalidSecret) if `secret` is empty. Every
/// `u64` value is accepted, including zero. Use [`NotePolicy::create_note`] for stricter rules.
///
/// ```rust
/// # use spark_note::*;
/// let note = create_note(0, b"seed").unwrap();
/// assert_eq!(note.value(), 0);
///
/// let error = create_note(1000, b"").unwrap_err();
/// assert!(error.is_invalid_secret());
/// ```
pub fn create_note(value: u64, secret: &[u8]) -> Result<Note> {
    NotePolicy::default().create_note(value, secret)
}

/// The commitment stored in a note
#[inline]
#[must_use]
pub fn note_commitment(note: &Note) -> Commitment {
    note.commitment()
}
