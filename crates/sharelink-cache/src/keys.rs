//! Cache key builders for share link entries.
//!
//! Every key the redemption engine touches is built here. Keys must stay
//! stable for as long as any issued token is alive.

use sharelink_entity::share::ShareCategory;

/// Prefix of the remaining-uses counter kept for count-bound links.
const COUNT_PREFIX: &str = "count-";

/// Prefix of the marker that claims a token for a single link.
const MINT_PREFIX: &str = "mint-";

/// Cache key holding the protected value of a share link.
pub fn share_value(category: ShareCategory, token: &str) -> String {
    format!("{}{token}", category.namespace())
}

/// Cache key holding the remaining-uses counter of a share link.
///
/// Counters are not namespaced by category; the mint marker keeps tokens
/// unique across categories.
pub fn share_count(token: &str) -> String {
    format!("{COUNT_PREFIX}{token}")
}

/// Cache key claimed when a token is minted, shared by all categories.
pub fn share_mint(token: &str) -> String {
    format!("{MINT_PREFIX}{token}")
}
