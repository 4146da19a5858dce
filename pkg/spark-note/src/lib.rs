#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![deny(missing_docs)]

//! Private notes for Spark
//!
//! A [`Note`] hides a `u64` value behind a secret. The note's [`Commitment`] can be published
//! without revealing either. When the note is spent, its holder publishes a [`Nullifier`], which
//! marks the note as spent without linking back to the commitment.
//!
//! ```rust
//! # use std::collections::HashSet;
//! # use spark_note::*;
//! let note = create_note(1000, b"a secret only the owner knows").unwrap();
//! let nullifier = generate_nullifier(&note, note.secret().as_bytes()).unwrap();
//!
//! let mut spent: HashSet<Nullifier> = HashSet::new();
//! assert!(!is_nullifier_spent(&nullifier, &spent));
//!
//! spent.insert(nullifier);
//! assert!(is_nullifier_spent(&nullifier, &spent));
//!
//! // notes travel as json
//! let json = to_json(&note);
//! assert_eq!(from_json(&json).unwrap(), note);
//! ```
//!
//! Everything here is a pure function of its inputs. There is no global state, and the spent set
//! belongs to the caller.

mod commitment;
mod error;
mod json;
mod note;
mod nullifier;
mod policy;
mod secret;
mod spent;

#[cfg(any(test, feature = "proptest"))]
mod arbitrary;

pub use commitment::commit;
pub use error::{Error, MalformedInput, PolicyError, Result, SecretError, ValueError};
pub use json::{from_json, to_json, NoteJson};
pub use note::{create_note, note_commitment, Note};
pub use nullifier::generate_nullifier;
pub use policy::NotePolicy;
pub use secret::Secret;
pub use spent::{check_multiple_nullifiers, is_nullifier_spent, SpentSet};

pub use spark_primitives::{Commitment, InvalidLength, Nullifier, ParseDigestError, DIGEST_LEN};
