use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

use spark_primitives::Nullifier;

/// A read-only view of the nullifiers that have already been spent
///
/// Implemented for the std collections a caller is likely to keep nullifiers in, holding either
/// [`Nullifier`]s or their raw `[u8; 32]` bytes. Lookups never modify the set: recording a spend
/// is the caller's job.
pub trait SpentSet {
    /// Is `nullifier` a member of this set
    fn contains_nullifier(&self, nullifier: &Nullifier) -> bool;
}

impl<S: BuildHasher> SpentSet for HashSet<Nullifier, S> {
    fn contains_nullifier(&self, nullifier: &Nullifier) -> bool {
        self.contains(nullifier)
    }
}

impl<S: BuildHasher> SpentSet for HashSet<[u8; 32], S> {
    fn contains_nullifier(&self, nullifier: &Nullifier) -> bool {
        self.contains(nullifier.inner())
    }
}

impl SpentSet for BTreeSet<Nullifier> {
    fn contains_nullifier(&self, nullifier: &Nullifier) -> bool {
        self.contains(nullifier)
    }
}

impl SpentSet for [Nullifier] {
    fn contains_nullifier(&self, nullifier: &Nullifier) -> bool {
        self.contains(nullifier)
    }
}

impl<const N: usize> SpentSet for [Nullifier; N] {
    fn contains_nullifier(&self, nullifier: &Nullifier) -> bool {
        self.contains(nullifier)
    }
}

impl SpentSet for Vec<Nullifier> {
    fn contains_nullifier(&self, nullifier: &Nullifier) -> bool {
        self.contains(nullifier)
    }
}

impl SpentSet for BTreeSet<[u8; 32]> {
    fn contains_nullifier(&self, nullifier: &Nullifier) -> bool {
        self.contains(nullifier.inner())
    }
}

impl SpentSet for [[u8; 32]] {
    fn contains_nullifier(&self, nullifier: &Nullifier) -> bool {
        self.contains(nullifier.inner())
    }
}

impl<const N: usize> SpentSet for [[u8; 32]; N] {
    fn contains_nullifier(&self, nullifier: &Nullifier) -> bool {
        self.contains(nullifier.inner())
    }
}

impl SpentSet for Vec<[u8; 32]> {
    fn contains_nullifier(&self, nullifier: &Nullifier) -> bool {
        self.contains(nullifier.inner())
    }
}

impl<T: SpentSet + ?Sized> SpentSet for &T {
    fn contains_nullifier(&self, nullifier: &Nullifier) -> bool {
        (**self).contains_nullifier(nullifier)
    }
}

/// Check whether `nullifier` has already been spent
///
/// ```rust
/// # use std::collections::HashSet;
/// # use spark_note::*;
/// let note = create_note(1000, b"secret").unwrap();
/// let mut spent: HashSet<Nullifier> = HashSet::new();
///
/// assert!(!is_nullifier_spent(&note.nullifier(), &spent));
///
/// spent.insert(note.nullifier());
/// assert!(is_nullifier_spent(&note.nullifier(), &spent));
/// ```
#[inline]
pub fn is_nullifier_spent<S: SpentSet + ?Sized>(nullifier: &Nullifier, spent: &S) -> bool {
    spent.contains_nullifier(nullifier)
}

/// Check a batch of nullifiers against `spent`, returning one flag per nullifier in input order
///
/// Duplicates within `nullifiers` are each looked up independently, so a nullifier that appears
/// twice in an unspent batch is reported unspent both times.
pub fn check_multiple_nullifiers<S: SpentSet + ?Sized>(
    nullifiers: &[Nullifier],
    spent: &S,
) -> Vec<bool> {
    let results: Vec<bool> = nullifiers
        .iter()
        .map(|nullifier| spent.contains_nullifier(nullifier))
        .collect();

    tracing::debug!(
        checked = results.len(),
        spent = results.iter().filter(|spent| **spent).count(),
        "checked nullifiers"
    );

    results
}
