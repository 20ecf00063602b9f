//! Token decoding errors.

use thiserror::Error;

/// Reasons a token fails to decode.
///
/// Callers must treat every variant as "invalid token"; the distinction
/// exists for logging only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The token is not valid base64.
    #[error("token is not valid base64")]
    InvalidBase64,

    /// The ciphertext is empty or not a whole number of cipher blocks.
    #[error("ciphertext length {0} is not a multiple of the block size")]
    InvalidBlockLength(usize),

    /// Decryption produced invalid padding.
    #[error("ciphertext padding is invalid")]
    InvalidPadding,

    /// The decrypted payload is not a millisecond timestamp.
    #[error("decrypted payload is not a timestamp")]
    InvalidPayload,
}
