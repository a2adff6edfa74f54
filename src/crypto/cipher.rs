//! Character-wise additive cipher over the shared alphabet. Encryption adds
//! the repeating key's alphabet indices to the text's, decryption subtracts
//! them again, so `transform(transform(t, k, Encrypt), k, Decrypt) == t`
//! holds for every alphabet text and key.

use thiserror::Error;

use super::{alphabet_index, ALPHABET};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    #[error("cipher key must not be empty")]
    EmptyKey,
    #[error("character '{0}' is outside the supported alphabet")]
    UnsupportedCharacter(char),
}

/// Whether [`transform`] combines alphabet indices by addition or
/// subtraction. A tagged pair rather than two free functions, so call sites
/// show which half of the round trip they are.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Applies the additive cipher to `text` under `key`.
///
/// Every character of both `text` and `key` must come from the shared
/// alphabet; anything else is rejected rather than passed through, since
/// the index arithmetic is undefined for it.
pub fn transform(text: &str, key: &str, direction: Direction) -> Result<String, CipherError> {
    if key.is_empty() {
        return Err(CipherError::EmptyKey);
    }

    let key_indices: Vec<usize> = key
        .chars()
        .map(|c| alphabet_index(c).ok_or(CipherError::UnsupportedCharacter(c)))
        .collect::<Result<_, _>>()?;

    let modulus = ALPHABET.len();
    text.chars()
        .enumerate()
        .map(|(i, c)| {
            let text_index = alphabet_index(c).ok_or(CipherError::UnsupportedCharacter(c))?;
            let key_index = key_indices[i % key_indices.len()];
            let combined = match direction {
                Direction::Encrypt => (text_index + key_index) % modulus,
                Direction::Decrypt => (text_index + modulus - key_index) % modulus,
            };
            Ok(ALPHABET[combined] as char)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{transform, CipherError, Direction};

    #[test]
    fn round_trips() {
        let ciphertext = transform("HelloWorld42", "sesame", Direction::Encrypt)
            .expect("encryption should succeed");
        let plaintext = transform(&ciphertext, "sesame", Direction::Decrypt)
            .expect("decryption should succeed");
        assert_eq!(plaintext, "HelloWorld42");
    }

    #[test]
    fn shifts_by_the_key_index() {
        // 'b' is index 27, so 'A' (0) becomes 'b' and 'B' (1) becomes 'c'.
        assert_eq!(transform("AB", "b", Direction::Encrypt).unwrap(), "bc");
        assert_eq!(transform("bc", "b", Direction::Decrypt).unwrap(), "AB");
    }

    #[test]
    fn wraps_around_the_alphabet() {
        // '9' is the last index (61); adding 'B' (1) wraps to 'A' (0).
        assert_eq!(transform("9", "B", Direction::Encrypt).unwrap(), "A");
        assert_eq!(transform("A", "B", Direction::Decrypt).unwrap(), "9");
    }

    #[test]
    fn changes_the_text() {
        let ciphertext = transform("Hello", "sesame", Direction::Encrypt).unwrap();
        assert_ne!(ciphertext, "Hello");
    }

    #[test]
    fn rejects_foreign_text_characters() {
        let err = transform("hello world", "sesame", Direction::Encrypt).unwrap_err();
        assert_eq!(err, CipherError::UnsupportedCharacter(' '));
    }

    #[test]
    fn rejects_foreign_key_characters() {
        let err = transform("hello", "p@ss", Direction::Encrypt).unwrap_err();
        assert_eq!(err, CipherError::UnsupportedCharacter('@'));
    }

    #[test]
    fn rejects_an_empty_key() {
        assert_eq!(
            transform("hello", "", Direction::Encrypt).unwrap_err(),
            CipherError::EmptyKey
        );
    }
}
