//! Deterministic password-to-token derivation. A token is a verifier, never
//! a reversible encoding of the password: equal passwords always reproduce
//! the same token, and re-deriving is the only way to check a password
//! without storing it.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroize;

use super::ALPHABET;

type HmacSha256 = Hmac<Sha256>;

/// Domain label mixed into every key-stream block so the token stream can
/// never collide with another HMAC use of the same password.
const BLOCK_LABEL: &[u8] = b"uman.token.v1";

/// Expands `password` into a token of `length` alphabet characters.
///
/// The expansion is an HMAC-SHA256 stream keyed by the password, reduced
/// into the alphabet per byte. Same password and length give a bit-identical
/// token every time; any change to the password reseeds the whole stream.
pub fn derive(password: &str, length: usize) -> String {
    let mut stream = keystream(password.as_bytes(), length);
    let token = stream
        .iter()
        .map(|&b| ALPHABET[b as usize % ALPHABET.len()] as char)
        .collect();
    stream.zeroize();
    token
}

/// Counter-mode HMAC stream: block `i` is `HMAC(key, label || i)`. Unbounded
/// output length, unlike a single-shot HKDF expand.
fn keystream(key: &[u8], length: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(length);
    let mut block: u32 = 0;
    while out.len() < length {
        let mut mac = HmacSha256::new_from_slice(key)
            .expect("hmac-sha256 accepts keys of any length");
        mac.update(BLOCK_LABEL);
        mac.update(&block.to_be_bytes());
        out.extend_from_slice(&mac.finalize().into_bytes());
        block += 1;
    }
    out.truncate(length);
    out
}
