//! Password-protected user records. A user never stores its password;
//! construction derives a token from it and every later access re-derives
//! and compares. Data values are held encrypted under the password that was
//! valid when they were written.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::cipher::{self, CipherError, Direction};
use crate::crypto::token;

/// Token length used by [`User::new`].
pub const DEFAULT_TOKEN_LENGTH: usize = 128;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("password length may not be greater than token length")]
    PasswordTooLong,
    #[error("invalid password")]
    InvalidPassword,
    #[error("no data stored under key '{0}'")]
    UnknownKey(String),
    #[error(transparent)]
    Cipher(#[from] CipherError),
}

/// A user with password-protected access to its data.
///
/// Serializes without ever containing a raw password: only the identity,
/// the derived token, and already-encrypted data values reach disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    identity: String,
    token_length: usize,
    token: String,
    data: HashMap<String, String>,
}

impl User {
    /// Constructs a user with the [`DEFAULT_TOKEN_LENGTH`].
    pub fn new(identity: impl Into<String>, password: &str) -> Result<Self, UserError> {
        Self::with_token_length(identity, password, DEFAULT_TOKEN_LENGTH)
    }

    /// Constructs a user whose verifier token is `token_length` characters
    /// long. The password is dropped after token derivation; it only ever
    /// exists again when the caller submits it for validation.
    pub fn with_token_length(
        identity: impl Into<String>,
        password: &str,
        token_length: usize,
    ) -> Result<Self, UserError> {
        if password.len() > token_length {
            return Err(UserError::PasswordTooLong);
        }

        Ok(Self {
            identity: identity.into(),
            token_length,
            token: token::derive(password, token_length),
            data: HashMap::new(),
        })
    }

    /// The unique id of the user.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// The derived verifier token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Checks whether `password` is valid for this user by re-deriving the
    /// token and comparing. A wrong password passes only when its token
    /// collides with the stored one, roughly a 62^-n chance for an
    /// n-character token. Repeated calls are not counted or throttled.
    pub fn is_valid(&self, password: &str) -> bool {
        token::derive(password, self.token_length) == self.token
    }

    /// Encrypts `plaintext` under `password` and stores it under `key`,
    /// replacing any previous value. Nothing is stored when the password is
    /// invalid or the cipher rejects the input.
    pub fn set_data(
        &mut self,
        key: impl Into<String>,
        plaintext: &str,
        password: &str,
    ) -> Result<(), UserError> {
        if !self.is_valid(password) {
            return Err(UserError::InvalidPassword);
        }

        let ciphertext = cipher::transform(plaintext, password, Direction::Encrypt)?;
        self.data.insert(key.into(), ciphertext);
        Ok(())
    }

    /// Decrypts and returns the value stored under `key`.
    ///
    /// A value round-trips only through the password it was written with;
    /// in the normal case that is the same password used for the whole
    /// session.
    pub fn get_data(&self, key: &str, password: &str) -> Result<String, UserError> {
        if !self.is_valid(password) {
            return Err(UserError::InvalidPassword);
        }

        let ciphertext = self
            .data
            .get(key)
            .ok_or_else(|| UserError::UnknownKey(key.to_string()))?;
        Ok(cipher::transform(ciphertext, password, Direction::Decrypt)?)
    }

    /// The ciphertext stored under `key`, if any. Plaintext only ever comes
    /// out of [`User::get_data`].
    pub fn stored_ciphertext(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity)
    }
}
