use spark_primitives::InvalidLength;

/// An error produced by spark-note
///
/// Every operation is a pure function of its inputs, so none of these errors are retryable:
/// the same input will always fail in the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A secret was empty, or outside the bounds of the active [`NotePolicy`]
    ///
    /// [`NotePolicy`]: crate::NotePolicy
    #[error("invalid secret: {0}")]
    InvalidSecret(#[from] SecretError),

    /// A value was rejected by the active [`NotePolicy`]
    ///
    /// [`NotePolicy`]: crate::NotePolicy
    #[error("invalid value: {0}")]
    InvalidValue(#[from] ValueError),

    /// The input was not a valid encoding
    #[error("malformed input: {0}")]
    MalformedInput(#[from] MalformedInput),
}

/// Result type for spark-note operations
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Why a secret was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SecretError {
    /// The secret had no bytes
    #[error("secret must not be empty")]
    Empty,

    /// The secret was shorter than the policy minimum
    #[error("secret must be at least {min} bytes, got {len}")]
    TooShort {
        /// The policy minimum
        min: usize,
        /// The length of the rejected secret
        len: usize,
    },

    /// The secret was longer than the policy maximum
    #[error("secret must be at most {max} bytes, got {len}")]
    TooLong {
        /// The policy maximum
        max: usize,
        /// The length of the rejected secret
        len: usize,
    },
}

/// Why a value was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// The value was zero, and the policy forbids zero-valued notes
    #[error("value must not be zero")]
    Zero,
}

/// Why some input could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedInput {
    /// The input was not valid json, or did not have the expected shape
    #[error("invalid json: {0}")]
    Json(String),

    /// A byte field was not valid hex
    #[error("invalid {field} encoding: {reason}")]
    Encoding {
        /// The name of the field
        field: &'static str,
        /// A description of the encoding error
        reason: String,
    },

    /// A fixed-size byte field had the wrong length
    #[error("invalid length: {0}")]
    Length(#[from] InvalidLength),

    /// The encoded secret was rejected
    #[error("invalid secret: {0}")]
    Secret(SecretError),

    /// The encoded value was rejected
    #[error("invalid value: {0}")]
    Value(ValueError),

    /// The encoded commitment does not match the encoded value and secret
    #[error("commitment does not match value and secret")]
    CommitmentMismatch,
}

/// Why a [`NotePolicy`] was rejected when it was loaded
///
/// [`NotePolicy`]: crate::NotePolicy
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// The minimum secret length is greater than the maximum
    #[error("min_secret_len ({min}) is greater than max_secret_len ({max})")]
    MinAboveMax {
        /// The configured minimum
        min: usize,
        /// The configured maximum
        max: usize,
    },

    /// The minimum secret length is above the limit for secrets
    #[error("min_secret_len ({min}) is above the limit of {limit} bytes")]
    MinAboveLimit {
        /// The configured minimum
        min: usize,
        /// The limit, [`NotePolicy::SECRET_LEN_LIMIT`]
        ///
        /// [`NotePolicy::SECRET_LEN_LIMIT`]: crate::NotePolicy::SECRET_LEN_LIMIT
        limit: usize,
    },
}

impl From<InvalidLength> for Error {
    fn from(error: InvalidLength) -> Self {
        Self::MalformedInput(error.into())
    }
}

impl Error {
    /// A stable, machine readable code for this error
    ///
    /// ```rust
    /// # use spark_note::*;
    /// let error = create_note(1000, &[]).unwrap_err();
    ///
    /// assert_eq!(error.code(), "SECRET_EMPTY");
    /// ```
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSecret(error) | Self::MalformedInput(MalformedInput::Secret(error)) => {
                match error {
                    SecretError::Empty => "SECRET_EMPTY",
                    SecretError::TooShort { .. } => "SECRET_TOO_SHORT",
                    SecretError::TooLong { .. } => "SECRET_TOO_LONG",
                }
            }
            Self::InvalidValue(ValueError::Zero)
            | Self::MalformedInput(MalformedInput::Value(ValueError::Zero)) => "VALUE_ZERO",
            Self::MalformedInput(MalformedInput::Json(_)) => "MALFORMED_JSON",
            Self::MalformedInput(MalformedInput::Encoding { .. }) => "MALFORMED_ENCODING",
            Self::MalformedInput(MalformedInput::Length(_)) => "MALFORMED_LENGTH",
            Self::MalformedInput(MalformedInput::CommitmentMismatch) => "COMMITMENT_MISMATCH",
        }
    }

    /// Was this error caused by input that could not be decoded
    #[inline]
    #[must_use]
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput(_))
    }

    /// Was this error caused by a rejected secret
    #[inline]
    #[must_use]
    pub fn is_invalid_secret(&self) -> bool {
        matches!(self, Self::InvalidSecret(_))
    }
}
