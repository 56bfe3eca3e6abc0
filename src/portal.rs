//! Tokens and links for published read-only trip portals.

use rand::Rng;

const TOKEN_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Default portal token length.
pub const DEFAULT_TOKEN_LEN: usize = 12;

/// Random lowercase alphanumeric token of `len` characters.
pub fn make_token(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

/// Public hash-routed URL for a portal token.
pub fn portal_url(origin: &str, base: &str, token: &str) -> String {
    let base = if base.is_empty() { "/" } else { base };
    format!("{}{base}#/v/{token}", origin.trim_end_matches('/'))
}
