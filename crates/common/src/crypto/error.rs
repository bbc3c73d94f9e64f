//! Error taxonomy shared by the curve, key and protocol layers
//!
//! Every fallible operation in [`crate::crypto`] and [`crate::text`] reports one
//! of these variants. None of the messages carry key material.

/// Errors that can occur during key handling, encryption or decryption
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EciesError {
    /// Malformed text or byte input (bad hex/base64, wrong length, non UTF-8)
    #[error("invalid encoding")]
    InvalidEncoding,
    /// Private key value is zero or not below the group order
    #[error("invalid scalar")]
    InvalidScalar,
    /// Public key bytes fail curve validation or resolve to the identity
    #[error("invalid point")]
    InvalidPoint,
    /// The secure random source could not produce output
    #[error("secure randomness unavailable")]
    RandomnessFailure,
    /// Envelope could not be authenticated under the given private key
    ///
    /// Deliberately carries no detail: tag mismatch, a corrupted ephemeral
    /// key and a wrong recipient are the same outcome to the caller.
    #[error("authentication failed")]
    AuthenticationFailed,
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, EciesError>;

impl From<hex::FromHexError> for EciesError {
    fn from(_: hex::FromHexError) -> Self {
        EciesError::InvalidEncoding
    }
}

impl From<base64::DecodeError> for EciesError {
    fn from(_: base64::DecodeError) -> Self {
        EciesError::InvalidEncoding
    }
}

impl From<std::string::FromUtf8Error> for EciesError {
    fn from(_: std::string::FromUtf8Error) -> Self {
        EciesError::InvalidEncoding
    }
}

impl From<rand::Error> for EciesError {
    fn from(_: rand::Error) -> Self {
        EciesError::RandomnessFailure
    }
}
