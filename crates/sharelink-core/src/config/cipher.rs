//! Token cipher configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Required key length in bytes (AES-256).
pub const CIPHER_KEY_LEN: usize = 32;

/// Required IV length in bytes (one AES block).
pub const CIPHER_IV_LEN: usize = 16;

/// Symmetric key material used to seal share-link timestamps.
///
/// Both values are taken as raw UTF-8 bytes. Changing either one
/// invalidates every outstanding share link.
#[derive(Clone, Serialize, Deserialize)]
pub struct CipherConfig {
    /// 32-byte AES-256 key.
    pub key: String,
    /// 16-byte CBC initialisation vector.
    pub iv: String,
}

impl CipherConfig {
    /// Check that the key and IV have the lengths the cipher requires.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.key.len() != CIPHER_KEY_LEN {
            return Err(AppError::configuration(format!(
                "cipher.key must be {CIPHER_KEY_LEN} bytes, got {}",
                self.key.len()
            )));
        }
        if self.iv.len() != CIPHER_IV_LEN {
            return Err(AppError::configuration(format!(
                "cipher.iv must be {CIPHER_IV_LEN} bytes, got {}",
                self.iv.len()
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for CipherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherConfig")
            .field("key", &"****")
            .field("iv", &"****")
            .finish()
    }
}
