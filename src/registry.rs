//! Registry of unique users bound to one on-disk data file, with an
//! optional single logged-in session. Saving writes the whole user map as a
//! JSON snapshot; loading replaces the in-memory map wholesale.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use crate::user::{User, UserError};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("user '{0}' already registered")]
    AlreadyRegistered(String),
    #[error("user '{0}' is not registered")]
    NotRegistered(String),
    #[error(transparent)]
    User(#[from] UserError),
    #[error("data file unreadable or unwritable: {0}")]
    Io(String),
    #[error("data file contains invalid JSON: {0}")]
    Parse(String),
    #[error("snapshot serialization failed: {0}")]
    Serialize(String),
}

/// Manages a set of unique users and at most one logged-in session.
///
/// Registry state is single-owner; the mutex around the session slot only
/// exists so [`UserRegistry::login`] can take `&self` and accept a reference
/// borrowed from the registry itself.
pub struct UserRegistry {
    users: HashMap<String, User>,
    data_file: PathBuf,
    active: Mutex<Option<String>>,
}

impl UserRegistry {
    /// Creates an empty registry bound to `data_file_path`. Missing parent
    /// directories are created up front so `save` only has to write the
    /// file itself.
    pub fn new(data_file_path: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let data_file = data_file_path.into();
        if let Some(parent) = data_file.parent() {
            fs::create_dir_all(parent).map_err(|e| RegistryError::Io(format!("{e}")))?;
        }

        Ok(Self {
            users: HashMap::new(),
            data_file,
            active: Mutex::new(None),
        })
    }

    /// Adds a new user. The identity must not already be registered; a
    /// duplicate never replaces the existing record.
    pub fn add_user(&mut self, user: User) -> Result<(), RegistryError> {
        if self.users.contains_key(user.identity()) {
            return Err(RegistryError::AlreadyRegistered(user.identity().to_string()));
        }

        self.users.insert(user.identity().to_string(), user);
        Ok(())
    }

    /// The registered record for `identity`, if any.
    pub fn user(&self, identity: &str) -> Option<&User> {
        self.users.get(identity)
    }

    /// Mutable access to the registered record for `identity`; this is how
    /// callers reach [`User::set_data`].
    pub fn user_mut(&mut self, identity: &str) -> Option<&mut User> {
        self.users.get_mut(identity)
    }

    /// Read-only view of all registered users.
    pub fn users(&self) -> &HashMap<String, User> {
        &self.users
    }

    /// Marks `user` as logged in.
    ///
    /// `user` must be the registry's own record, i.e. the reference obtained
    /// from [`UserRegistry::user`]. A record constructed outside the
    /// registry is rejected even when its identity and password match the
    /// registered one.
    pub fn login(&self, user: &User, password: &str) -> Result<(), RegistryError> {
        let is_registered_instance = self
            .users
            .get(user.identity())
            .is_some_and(|stored| std::ptr::eq(stored, user));
        if !is_registered_instance {
            return Err(RegistryError::NotRegistered(user.identity().to_string()));
        }

        if !user.is_valid(password) {
            return Err(UserError::InvalidPassword.into());
        }

        *self.session() = Some(user.identity().to_string());
        Ok(())
    }

    /// Logs out the current session. Never errors, even with nobody logged
    /// in.
    pub fn logout(&self) {
        *self.session() = None;
    }

    /// The currently logged-in user, or `None`.
    pub fn logged_in_user(&self) -> Option<&User> {
        let identity = self.session().clone()?;
        self.users.get(&identity)
    }

    /// Writes every registered user to the data file as a JSON snapshot,
    /// overwriting any previous one. Tokens and ciphertexts are written; raw
    /// passwords never exist to be written. The session is not part of the
    /// snapshot.
    pub fn save(&self) -> Result<(), RegistryError> {
        let snapshot = serde_json::to_vec_pretty(&self.users)
            .map_err(|e| RegistryError::Serialize(format!("{e}")))?;
        fs::write(&self.data_file, snapshot).map_err(|e| RegistryError::Io(format!("{e}")))
    }

    /// Replaces the in-memory user map with the data file's contents. The
    /// previous map is discarded wholesale, never merged, and the session is
    /// cleared since the loaded map need not contain the previously active
    /// identity.
    pub fn load(&mut self) -> Result<(), RegistryError> {
        let raw =
            fs::read_to_string(&self.data_file).map_err(|e| RegistryError::Io(format!("{e}")))?;
        self.users =
            serde_json::from_str(&raw).map_err(|e| RegistryError::Parse(format!("{e}")))?;
        *self.session() = None;
        Ok(())
    }

    // The slot behind the lock is a bare Option, so a lock poisoned by a
    // panicking thread still holds a consistent value.
    fn session(&self) -> MutexGuard<'_, Option<String>> {
        self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
