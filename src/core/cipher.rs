//! A reversible byte-shift cipher keyed by a passphrase. It obfuscates, it
//! does not protect.

use crate::utils::error::{RecipeError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

const FALLBACK_SEED: &str = "Recipe";

/// md5 hex of the server name, or of a fixed seed when there is none.
pub fn server_specific_hash(server_name: Option<&str>) -> String {
    let seed = server_name.filter(|name| !name.is_empty()).unwrap_or(FALLBACK_SEED);
    format!("{:x}", md5::compute(seed))
}

fn resolve_key(passkey: Option<&str>) -> Vec<u8> {
    match passkey.filter(|key| !key.is_empty()) {
        Some(key) => key.as_bytes().to_vec(),
        None => server_specific_hash(None).into_bytes(),
    }
}

/// Byte `i` pairs with key byte `(i % len) - 1`; index -1 wraps to the last byte.
fn key_byte(key: &[u8], i: usize) -> u8 {
    match i % key.len() {
        0 => key[key.len() - 1],
        n => key[n - 1],
    }
}

pub fn simple_encode(text: &str, passkey: Option<&str>) -> String {
    let key = resolve_key(passkey);
    let shifted: Vec<u8> = text
        .bytes()
        .enumerate()
        .map(|(i, byte)| byte.wrapping_add(key_byte(&key, i)))
        .collect();
    STANDARD.encode(shifted)
}

pub fn simple_decode(encoded: &str, passkey: Option<&str>) -> Result<String> {
    let key = resolve_key(passkey);
    let shifted = STANDARD
        .decode(encoded.trim())
        .map_err(|e| RecipeError::DecodeError {
            message: format!("invalid base64: {}", e),
        })?;

    let plain: Vec<u8> = shifted
        .iter()
        .enumerate()
        .map(|(i, byte)| byte.wrapping_sub(key_byte(&key, i)))
        .collect();

    String::from_utf8(plain).map_err(|_| RecipeError::DecodeError {
        message: "decoded bytes are not valid UTF-8, wrong passkey?".to_string(),
    })
}
