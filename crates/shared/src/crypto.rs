//! Bot API key generation.

use rand::Rng;

/// Prefix identifying bot API keys.
pub const API_KEY_PREFIX: &str = "bk_";

const KEY_LEN: usize = 32;
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Mints a fresh bot API key: `bk_` followed by 32 random alphanumerics.
pub fn generate_api_key() -> String {
    let mut rng = rand::thread_rng();
    let body: String = (0..KEY_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    format!("{}{}", API_KEY_PREFIX, body)
}

/// Returns the first 8 characters after the prefix, for log lines that must
/// not leak the full key.
pub fn key_prefix(key: &str) -> Option<&str> {
    let rest = key.strip_prefix(API_KEY_PREFIX)?;
    if rest.len() >= 8 {
        Some(&rest[..8])
    } else {
        None
    }
}
