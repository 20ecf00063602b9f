//! Time-window codec: seals a mint instant into an opaque string.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use chrono::{DateTime, Utc};
use tracing::debug;

use sharelink_core::config::cipher::CipherConfig;
use sharelink_core::error::{AppError, ErrorKind};

use crate::error::DecodeError;
use crate::format;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES block size in bytes.
const BLOCK_SIZE: usize = 16;

/// Encrypts and decrypts share-link mint instants.
///
/// The plaintext is the decimal millisecond epoch of the mint instant, so
/// decoding reproduces the exact millisecond that was encoded. Built once
/// at start-up from [`CipherConfig`] and shared read-only afterwards.
#[derive(Clone)]
pub struct TokenCodec {
    encryptor: Aes256CbcEnc,
    decryptor: Aes256CbcDec,
}

impl TokenCodec {
    /// Creates a codec from cipher configuration.
    pub fn new(config: &CipherConfig) -> Result<Self, AppError> {
        config.validate()?;

        let key = config.key.as_bytes();
        let iv = config.iv.as_bytes();
        let encryptor = Aes256CbcEnc::new_from_slices(key, iv).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid cipher key or IV", e)
        })?;
        let decryptor = Aes256CbcDec::new_from_slices(key, iv).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid cipher key or IV", e)
        })?;

        Ok(Self {
            encryptor,
            decryptor,
        })
    }

    /// Seals `now` into standard base64 ciphertext.
    pub fn encode(&self, now: DateTime<Utc>) -> String {
        let plaintext = now.timestamp_millis().to_string();
        let ciphertext = self
            .encryptor
            .clone()
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
        STANDARD.encode(ciphertext)
    }

    /// Opens ciphertext produced by [`TokenCodec::encode`].
    pub fn decode(&self, cipher_text: &str) -> Result<DateTime<Utc>, DecodeError> {
        let ciphertext = STANDARD
            .decode(cipher_text)
            .map_err(|_| DecodeError::InvalidBase64)?;

        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(DecodeError::InvalidBlockLength(ciphertext.len()));
        }

        let plaintext = self
            .decryptor
            .clone()
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| DecodeError::InvalidPadding)?;

        let millis = std::str::from_utf8(&plaintext)
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or(DecodeError::InvalidPayload)?;

        DateTime::from_timestamp_millis(millis).ok_or(DecodeError::InvalidPayload)
    }

    /// Encodes `now` and renders it as a URL-safe token.
    pub fn mint(&self, now: DateTime<Utc>) -> String {
        let token = format::format(&self.encode(now));
        debug!(mint_ms = now.timestamp_millis(), token = %token, "Minted share token");
        token
    }

    /// Recovers the mint instant from a URL-safe token.
    pub fn open(&self, token: &str) -> Result<DateTime<Utc>, DecodeError> {
        self.decode(&format::unformat(token))
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("cipher", &"aes-256-cbc")
            .finish_non_exhaustive()
    }
}
