use serde::{Deserialize, Deserializer, Serializer};

use crate::{decode_hex, DIGEST_LEN};

pub(crate) fn serialize<S>(bytes: &[u8; DIGEST_LEN], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    hex::serde::serialize(bytes, serializer)
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<[u8; DIGEST_LEN], D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let vec = decode_hex(&s).map_err(serde::de::Error::custom)?;
    <[u8; DIGEST_LEN]>::try_from(vec).map_err(|vec| {
        serde::de::Error::custom(format!(
            "invalid length: expected {DIGEST_LEN} bytes, got {}",
            vec.len()
        ))
    })
}
