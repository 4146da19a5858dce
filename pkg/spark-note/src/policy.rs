use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::json::{decode, parse};
use crate::{Note, PolicyError, Result, Secret, SecretError, ValueError};

/// Rules for accepting secrets and values
///
/// The default policy accepts any non-empty secret and any `u64` value, and checks commitments
/// when decoding json. It is the policy used by [`create_note`](crate::create_note) and
/// [`from_json`](crate::from_json).
///
/// A policy can be loaded from a toml file and `SPARK_NOTE_*` environment variables:
///
/// ```toml
/// min_secret_len = 16
/// max_secret_len = 64
/// allow_zero_value = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotePolicy {
    /// Minimum secret length in bytes. A secret is never allowed to be empty, so anything below 1
    /// behaves as 1
    pub min_secret_len: usize,
    /// Maximum secret length in bytes, if any
    pub max_secret_len: Option<usize>,
    /// Whether notes with a value of zero are allowed
    pub allow_zero_value: bool,
    /// Whether decoding recomputes the commitment and rejects notes where it doesn't match
    pub verify_commitment_on_decode: bool,
}

impl Default for NotePolicy {
    fn default() -> Self {
        Self {
            min_secret_len: 1,
            max_secret_len: None,
            allow_zero_value: true,
            verify_commitment_on_decode: true,
        }
    }
}

impl NotePolicy {
    /// Prefix of the environment variables read by [`NotePolicy::figment`]
    pub const ENV_PREFIX: &'static str = "SPARK_NOTE_";

    /// The largest secret [`NotePolicy::generate_note`] will create, and the largest allowed
    /// `min_secret_len`
    pub const SECRET_LEN_LIMIT: usize = 1024;

    /// Layered configuration: defaults, then the toml file at `path` (if given and present), then
    /// `SPARK_NOTE_*` environment variables
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(Self::ENV_PREFIX))
    }

    /// Load a policy from [`NotePolicy::figment`], rejecting inconsistent bounds
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let policy: Self = Self::figment(path).extract()?;
        policy
            .check()
            .map_err(<figment::Error as serde::de::Error>::custom)?;

        tracing::debug!(?policy, "loaded note policy");
        Ok(policy)
    }

    /// Check that the secret length bounds can be satisfied
    ///
    /// ```rust
    /// # use spark_note::*;
    /// let policy = NotePolicy {
    ///     min_secret_len: 64,
    ///     max_secret_len: Some(32),
    ///     ..NotePolicy::default()
    /// };
    ///
    /// assert_eq!(policy.check(), Err(PolicyError::MinAboveMax { min: 64, max: 32 }));
    /// ```
    pub fn check(&self) -> Result<(), PolicyError> {
        let min = self.min_secret_len;

        if min > Self::SECRET_LEN_LIMIT {
            return Err(PolicyError::MinAboveLimit {
                min,
                limit: Self::SECRET_LEN_LIMIT,
            });
        }

        match self.max_secret_len {
            Some(max) if min > max => Err(PolicyError::MinAboveMax { min, max }),
            _ => Ok(()),
        }
    }

    /// Check a secret against this policy
    pub fn validate_secret(&self, secret: &[u8]) -> Result<(), SecretError> {
        let len = secret.len();

        if len == 0 {
            return Err(SecretError::Empty);
        }

        let min = self.min_secret_len.max(1);
        if len < min {
            return Err(SecretError::TooShort { min, len });
        }

        match self.max_secret_len {
            Some(max) if len > max => Err(SecretError::TooLong { max, len }),
            _ => Ok(()),
        }
    }

    /// Check a value against this policy
    pub fn validate_value(&self, value: u64) -> Result<(), ValueError> {
        if value == 0 && !self.allow_zero_value {
            return Err(ValueError::Zero);
        }

        Ok(())
    }

    /// Create a [`Note`], checking the value and secret against this policy
    ///
    /// ```rust
    /// # use spark_note::*;
    /// let policy = NotePolicy {
    ///     min_secret_len: 16,
    ///     ..NotePolicy::default()
    /// };
    ///
    /// assert!(policy.create_note(1000, &[7; 16]).is_ok());
    /// assert_eq!(policy.create_note(1000, &[7; 8]).unwrap_err().code(), "SECRET_TOO_SHORT");
    /// ```
    #[tracing::instrument(level = "debug", skip_all, fields(secret_len = secret.len()), err)]
    pub fn create_note(&self, value: u64, secret: &[u8]) -> Result<Note> {
        self.validate_secret(secret)?;
        self.validate_value(value)?;

        Ok(Note::new(value, Secret::from_checked(secret.to_vec())))
    }

    /// Create a [`Note`] with a freshly generated secret
    ///
    /// The secret is [`Secret::DEFAULT_LEN`] bytes, adjusted to fit the policy's length bounds.
    /// Fails rather than generate more than [`NotePolicy::SECRET_LEN_LIMIT`] bytes.
    pub fn generate_note(&self, value: u64) -> Result<Note> {
        let mut len = self.min_secret_len.max(Secret::DEFAULT_LEN);
        if let Some(max) = self.max_secret_len {
            len = len.min(max);
        }

        if len > Self::SECRET_LEN_LIMIT {
            return Err(SecretError::TooLong {
                max: Self::SECRET_LEN_LIMIT,
                len,
            }
            .into());
        }

        let secret = Secret::random(&mut OsRng, len)?;
        self.create_note(value, secret.as_bytes())
    }

    /// Decode a [`Note`] from json, checking it against this policy
    ///
    /// Every failure is reported as [`Error::MalformedInput`](crate::Error::MalformedInput).
    #[tracing::instrument(level = "debug", skip_all, err)]
    pub fn note_from_json(&self, json: &str) -> Result<Note> {
        decode(self, parse(json)?)
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;
    use crate::Error;

    #[test]
    fn default_accepts_everything_but_empty() {
        let policy = NotePolicy::default();

        assert_eq!(policy.validate_secret(&[]), Err(SecretError::Empty));
        assert_eq!(policy.validate_secret(&[1]), Ok(()));
        assert_eq!(policy.validate_secret(&[1; 4096]), Ok(()));
        assert_eq!(policy.validate_value(0), Ok(()));
        assert_eq!(policy.validate_value(u64::MAX), Ok(()));
    }

    #[test]
    fn zero_minimum_still_rejects_empty() {
        let policy = NotePolicy {
            min_secret_len: 0,
            ..NotePolicy::default()
        };

        assert_eq!(policy.validate_secret(&[]), Err(SecretError::Empty));
    }

    #[test]
    fn length_bounds() {
        let policy = NotePolicy {
            min_secret_len: 4,
            max_secret_len: Some(8),
            ..NotePolicy::default()
        };

        assert_eq!(
            policy.validate_secret(&[1; 3]),
            Err(SecretError::TooShort { min: 4, len: 3 })
        );
        assert_eq!(policy.validate_secret(&[1; 4]), Ok(()));
        assert_eq!(policy.validate_secret(&[1; 8]), Ok(()));
        assert_eq!(
            policy.validate_secret(&[1; 9]),
            Err(SecretError::TooLong { max: 8, len: 9 })
        );
    }

    #[test]
    fn zero_values() {
        let policy = NotePolicy {
            allow_zero_value: false,
            ..NotePolicy::default()
        };

        assert_eq!(
            policy.create_note(0, b"secret"),
            Err(Error::InvalidValue(ValueError::Zero))
        );
        assert!(policy.create_note(1, b"secret").is_ok());
    }

    #[test]
    fn secret_is_checked_before_value() {
        let policy = NotePolicy {
            allow_zero_value: false,
            ..NotePolicy::default()
        };

        assert_eq!(
            policy.create_note(0, b""),
            Err(Error::InvalidSecret(SecretError::Empty))
        );
    }

    #[test]
    fn generated_notes_fit_the_policy() {
        let bounded = NotePolicy {
            max_secret_len: Some(16),
            ..NotePolicy::default()
        };
        let long = NotePolicy {
            min_secret_len: 48,
            ..NotePolicy::default()
        };

        assert_eq!(
            NotePolicy::default().generate_note(5).unwrap().secret().len(),
            Secret::DEFAULT_LEN
        );
        assert_eq!(bounded.generate_note(5).unwrap().secret().len(), 16);
        assert_eq!(long.generate_note(5).unwrap().secret().len(), 48);
    }

    #[test]
    fn impossible_bounds_fail_generation() {
        let policy = NotePolicy {
            min_secret_len: 16,
            max_secret_len: Some(8),
            ..NotePolicy::default()
        };

        assert_eq!(
            policy.generate_note(5),
            Err(Error::InvalidSecret(SecretError::TooShort { min: 16, len: 8 }))
        );
    }

    #[test]
    fn oversized_minimum_fails_generation() {
        let huge = NotePolicy {
            min_secret_len: usize::MAX,
            ..NotePolicy::default()
        };
        let over = NotePolicy {
            min_secret_len: NotePolicy::SECRET_LEN_LIMIT + 1,
            ..NotePolicy::default()
        };
        let at_limit = NotePolicy {
            min_secret_len: NotePolicy::SECRET_LEN_LIMIT,
            ..NotePolicy::default()
        };

        assert_eq!(
            huge.generate_note(5),
            Err(Error::InvalidSecret(SecretError::TooLong {
                max: NotePolicy::SECRET_LEN_LIMIT,
                len: usize::MAX,
            }))
        );
        assert_eq!(
            over.generate_note(5).unwrap_err().code(),
            "SECRET_TOO_LONG"
        );
        assert_eq!(
            at_limit.generate_note(5).unwrap().secret().len(),
            NotePolicy::SECRET_LEN_LIMIT
        );
    }

    #[test]
    fn check_bounds() {
        assert_eq!(NotePolicy::default().check(), Ok(()));
        assert_eq!(
            NotePolicy {
                min_secret_len: 8,
                max_secret_len: Some(4),
                ..NotePolicy::default()
            }
            .check(),
            Err(PolicyError::MinAboveMax { min: 8, max: 4 })
        );
        assert_eq!(
            NotePolicy {
                min_secret_len: usize::MAX,
                ..NotePolicy::default()
            }
            .check(),
            Err(PolicyError::MinAboveLimit {
                min: usize::MAX,
                limit: NotePolicy::SECRET_LEN_LIMIT,
            })
        );
    }

    #[test]
    fn load_rejects_bad_bounds() {
        Jail::expect_with(|jail| {
            jail.create_file("spark.toml", "min_secret_len = 64\nmax_secret_len = 32")?;
            assert!(NotePolicy::load(Some(Path::new("spark.toml"))).is_err());

            jail.set_env("SPARK_NOTE_MIN_SECRET_LEN", "100000000");
            assert!(NotePolicy::load(None).is_err());

            Ok(())
        });
    }

    #[test]
    fn load_defaults() {
        Jail::expect_with(|_| {
            assert_eq!(NotePolicy::load(None)?, NotePolicy::default());
            Ok(())
        });
    }

    #[test]
    fn load_from_file_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "spark.toml",
                r"
                min_secret_len = 8
                max_secret_len = 64
                allow_zero_value = false
                ",
            )?;

            let policy = NotePolicy::load(Some(Path::new("spark.toml")))?;
            assert_eq!(
                policy,
                NotePolicy {
                    min_secret_len: 8,
                    max_secret_len: Some(64),
                    allow_zero_value: false,
                    verify_commitment_on_decode: true,
                }
            );

            jail.set_env("SPARK_NOTE_MIN_SECRET_LEN", "16");
            jail.set_env("SPARK_NOTE_VERIFY_COMMITMENT_ON_DECODE", "false");

            let policy = NotePolicy::load(Some(Path::new("spark.toml")))?;
            assert_eq!(policy.min_secret_len, 16);
            assert_eq!(policy.max_secret_len, Some(64));
            assert!(!policy.verify_commitment_on_decode);

            Ok(())
        });
    }

    #[test]
    fn missing_file_uses_defaults() {
        Jail::expect_with(|_| {
            let policy = NotePolicy::load(Some(Path::new("missing.toml")))?;
            assert_eq!(policy, NotePolicy::default());
            Ok(())
        });
    }

    #[test]
    fn bad_config_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("spark.toml", "min_secret_len = \"lots\"")?;

            assert!(NotePolicy::load(Some(Path::new("spark.toml"))).is_err());
            Ok(())
        });
    }
}
