//! Central cryptography module that exposes token derivation and the
//! character cipher. Both submodules work over one fixed alphabet so the two
//! halves of the credential scheme stay interoperable: the password that
//! seeds a user's token is the same string that keys the cipher.

pub mod cipher;
pub mod token;

/// The fixed alphabet shared by token derivation and the cipher: the 62
/// ASCII alphanumerics, uppercase first.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Returns the alphabet index of `c`, or `None` for characters outside it.
pub(crate) fn alphabet_index(c: char) -> Option<usize> {
    match c {
        'A'..='Z' => Some(c as usize - 'A' as usize),
        'a'..='z' => Some(c as usize - 'a' as usize + 26),
        '0'..='9' => Some(c as usize - '0' as usize + 52),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{alphabet_index, ALPHABET};

    #[test]
    fn indexes_match_the_table() {
        for (i, &b) in ALPHABET.iter().enumerate() {
            assert_eq!(alphabet_index(b as char), Some(i));
        }
    }

    #[test]
    fn rejects_foreign_characters() {
        for c in [' ', '!', '@', 'ä', '\n'] {
            assert_eq!(alphabet_index(c), None);
        }
    }
}
