/// A byte string had the wrong length for the type it was converted into
///
/// ```rust
/// # use spark_primitives::*;
/// let error = Nullifier::from_slice(&[0; 31]).unwrap_err();
///
/// assert_eq!(error, InvalidLength { expected: 32, got: 31 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} bytes, got {got}")]
pub struct InvalidLength {
    /// The required number of bytes
    pub expected: usize,
    /// The number of bytes that were provided
    pub got: usize,
}

/// An error produced when parsing a digest from a hex string
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseDigestError {
    /// The string was not valid hex
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The string was valid hex, but decoded to the wrong number of bytes
    #[error(transparent)]
    Length(#[from] InvalidLength),
}
