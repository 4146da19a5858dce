use std::collections::{BTreeSet, HashSet};

use rand_chacha::{rand_core::SeedableRng, ChaChaRng};
use spark_note::{
    check_multiple_nullifiers, commit, create_note, from_json, generate_nullifier,
    is_nullifier_spent, note_commitment, to_json, Error, MalformedInput, Note, Nullifier, Secret,
    SecretError,
};
use spark_primitives::{digest_count, reset_digest_count};

const SECRET: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
const COMMITMENT: &str = "1f695d7438a1761bed36cc98e824dd5389ab562262b7c54a6bf5fd648d554b17";
const NULLIFIER: &str = "54892b0da143875c5cb86c7340c00f78d30c76f8b467e932c01719ff38ce5175";

#[test]
fn golden_vectors() {
    let note = create_note(1000, &SECRET).unwrap();

    assert_eq!(note_commitment(&note).to_hex(), COMMITMENT);
    assert_eq!(commit(1000, &SECRET).unwrap().to_hex(), COMMITMENT);

    let nullifier = generate_nullifier(&note, &SECRET).unwrap();
    assert_eq!(nullifier.to_hex(), NULLIFIER);

    let mut spent: HashSet<Nullifier> = HashSet::new();
    assert!(!is_nullifier_spent(&nullifier, &spent));

    spent.insert(nullifier);
    assert!(is_nullifier_spent(&nullifier, &spent));
}

#[test]
fn empty_secret_is_invalid() {
    assert_eq!(
        create_note(1000, b""),
        Err(Error::InvalidSecret(SecretError::Empty))
    );
}

#[test]
fn spend_lifecycle() {
    let mut rng = ChaChaRng::from_seed([7; 32]);
    let notes: Vec<Note> = (1..=5u64)
        .map(|value| Note::new(value * 100, Secret::random(&mut rng, 32).unwrap()))
        .collect();

    let mut spent: HashSet<Nullifier> = HashSet::new();
    let nullifiers: Vec<Nullifier> = notes
        .iter()
        .map(|note| generate_nullifier(note, note.secret().as_bytes()).unwrap())
        .collect();

    assert_eq!(check_multiple_nullifiers(&nullifiers, &spent), vec![false; 5]);

    spent.insert(nullifiers[1]);
    spent.insert(nullifiers[3]);

    assert_eq!(
        check_multiple_nullifiers(&nullifiers, &spent),
        vec![false, true, false, true, false]
    );

    // an ordered set gives the same answers
    let ordered: BTreeSet<Nullifier> = spent.iter().copied().collect();
    for nullifier in &nullifiers {
        assert_eq!(
            is_nullifier_spent(nullifier, &ordered),
            is_nullifier_spent(nullifier, &spent)
        );
    }
}

#[test]
fn nullifier_needs_the_right_secret() {
    let note = create_note(1000, &SECRET).unwrap();
    let spent: HashSet<Nullifier> = [note.nullifier()].into_iter().collect();

    let wrong = generate_nullifier(&note, b"guess").unwrap();

    assert!(!is_nullifier_spent(&wrong, &spent));
}

#[test]
fn json_round_trip_recomputes_commitment() {
    let note = create_note(1000, &SECRET).unwrap();
    let json = to_json(&note);

    reset_digest_count();
    let decoded = from_json(&json).unwrap();

    assert_eq!(decoded, note);
    assert_eq!(digest_count(), 1);
}

#[test]
fn tampered_json_is_rejected() {
    let note = create_note(1000, &SECRET).unwrap();
    let tampered = to_json(&note).replace("\"1000\"", "\"1000000\"");

    assert_eq!(
        from_json(&tampered),
        Err(Error::MalformedInput(MalformedInput::CommitmentMismatch))
    );

    let swapped_secret = to_json(&note).replace("0102030405060708", "0102030405060709");
    assert_eq!(
        from_json(&swapped_secret).unwrap_err().code(),
        "COMMITMENT_MISMATCH"
    );
}

#[test]
fn notes_are_interchangeable_through_serde() {
    let note = create_note(42, b"serde").unwrap();

    let value = serde_json::to_value(&note).unwrap();
    assert_eq!(value["value"], "42");

    let decoded: Note = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, note);
}
