//! URL-safe token rendering and public share paths.

use sharelink_entity::share::ShareCategory;

/// Maps standard base64 ciphertext to a URL-safe token.
///
/// `+` becomes `-` and `/` becomes `_`; padding is kept, `=` is legal in a
/// path segment.
pub fn format(cipher_text: &str) -> String {
    cipher_text.replace('+', "-").replace('/', "_")
}

/// Inverse of [`format`].
pub fn unformat(token: &str) -> String {
    token.replace('-', "+").replace('_', "/")
}

/// Public redemption path for a token, `/<segment>/<token>`.
pub fn public_path(category: ShareCategory, token: &str) -> String {
    format!("/{}/{token}", category.path_segment())
}
