use serde::{Deserialize, Serialize};
use spark_primitives::{decode_hex, Commitment};

use crate::{MalformedInput, Note, NotePolicy, Result, Secret};

/// The json wire form of a [`Note`]
///
/// ```json
/// {
///   "value": "1000",
///   "secret": "0102030405060708",
///   "commitment": "1f695d7438a1761bed36cc98e824dd5389ab562262b7c54a6bf5fd648d554b17"
/// }
/// ```
///
/// `value` is written as a decimal string so it survives json parsers that read numbers as
/// doubles. A bare json number is also accepted when decoding. Byte fields are hex, written in
/// lowercase without a prefix and read in either case with an optional `0x` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoteJson {
    /// The note value
    #[serde(with = "wire_value")]
    pub value: u64,
    /// Hex encoded secret
    pub secret: String,
    /// Hex encoded commitment
    pub commitment: String,
}

impl From<Note> for NoteJson {
    fn from(note: Note) -> Self {
        Self::from(&note)
    }
}

impl From<&Note> for NoteJson {
    fn from(note: &Note) -> Self {
        Self {
            value: note.value(),
            secret: note.secret().to_hex(),
            commitment: note.commitment().to_hex(),
        }
    }
}

impl TryFrom<NoteJson> for Note {
    type Error = crate::Error;

    fn try_from(json: NoteJson) -> Result<Self> {
        decode(&NotePolicy::default(), json)
    }
}

/// Encode a note as json
///
/// ```rust
/// # use spark_note::*;
/// let note = create_note(1000, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
///
/// assert_eq!(
///     to_json(&note),
///     r#"{"value":"1000","secret":"0102030405060708","commitment":"1f695d7438a1761bed36cc98e824dd5389ab562262b7c54a6bf5fd648d554b17"}"#
/// );
/// ```
#[must_use]
pub fn to_json(note: &Note) -> String {
    // serde_json only fails on non-string map keys or a failing Serialize impl. NoteJson has
    // neither: two String fields and a u64 written through collect_str
    serde_json::to_string(&NoteJson::from(note)).expect("note json is infallible")
}

/// Decode a note from json, recomputing and checking its commitment
///
/// Every failure is reported as [`Error::MalformedInput`](crate::Error::MalformedInput),
/// including a commitment that doesn't match the value and secret.
///
/// ```rust
/// # use spark_note::*;
/// let note = create_note(1000, b"secret").unwrap();
/// assert_eq!(from_json(&to_json(&note)).unwrap(), note);
///
/// let error = from_json(r#"{"value":"1000","secret":"","commitment":"00"}"#).unwrap_err();
/// assert!(error.is_malformed_input());
/// ```
pub fn from_json(json: &str) -> Result<Note> {
    NotePolicy::default().note_from_json(json)
}

pub(crate) fn parse(json: &str) -> Result<NoteJson> {
    serde_json::from_str(json).map_err(|e| MalformedInput::Json(e.to_string()).into())
}

pub(crate) fn decode(policy: &NotePolicy, json: NoteJson) -> Result<Note> {
    let secret = decode_field("secret", &json.secret)?;
    let commitment = Commitment::from_slice(&decode_field("commitment", &json.commitment)?)?;

    policy
        .validate_secret(&secret)
        .map_err(MalformedInput::Secret)?;
    policy
        .validate_value(json.value)
        .map_err(MalformedInput::Value)?;

    let secret = Secret::from_checked(secret);

    if !policy.verify_commitment_on_decode {
        return Ok(Note::from_parts_unchecked(json.value, secret, commitment));
    }

    let note = Note::new(json.value, secret);

    if !note.commitment().ct_eq(&commitment) {
        tracing::warn!(
            expected = %commitment.short_hex(),
            computed = %note.commitment().short_hex(),
            "decoded note has a mismatched commitment"
        );
        return Err(MalformedInput::CommitmentMismatch.into());
    }

    Ok(note)
}

fn decode_field(field: &'static str, hex: &str) -> Result<Vec<u8>, MalformedInput> {
    decode_hex(hex).map_err(|e| MalformedInput::Encoding {
        field,
        reason: e.to_string(),
    })
}

mod wire_value {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub(super) fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }

    struct ValueVisitor;

    impl<'de> Visitor<'de> for ValueVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an unsigned 64-bit integer or its decimal string")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
            Ok(value)
        }

        fn visit_str<E: de::Error>(self, s: &str) -> Result<u64, E> {
            parse_canonical(s).ok_or_else(|| E::invalid_value(de::Unexpected::Str(s), &self))
        }
    }

    /// Digits only, no sign, and no leading zeros
    fn parse_canonical(s: &str) -> Option<u64> {
        let digits = !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        let leading_zero = s.len() > 1 && s.starts_with('0');

        if !digits || leading_zero {
            return None;
        }

        s.parse().ok()
    }

    #[cfg(test)]
    mod tests {
        use super::parse_canonical;

        #[test]
        fn canonical_decimal() {
            assert_eq!(parse_canonical("0"), Some(0));
            assert_eq!(parse_canonical("1000"), Some(1000));
            assert_eq!(
                parse_canonical("18446744073709551615"),
                Some(u64::MAX)
            );

            for bad in ["", "01", "+1", "-1", " 1", "1.0", "1e3", "18446744073709551616"] {
                assert_eq!(parse_canonical(bad), None, "{bad:?}");
            }
        }
    }
}
