//! File-backed credential store.
//!
//! Credentials live in a JSON object mapping username to Argon2id PHC
//! hash string. The file is read once at startup into memory; every
//! mutation rewrites it wholesale under a single writer lock. This is
//! sized for one process and a handful of operators, not for
//! multi-instance deployments.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use driftwood_core::Username;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors from credential store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A user with this name already exists.
    #[error("user already exists: {0}")]
    DuplicateUser(Username),

    /// No user with this name exists.
    #[error("no such user: {0}")]
    UnknownUser(Username),

    /// The protected administrator account cannot be deleted.
    #[error("the admin account cannot be deleted")]
    ProtectedUser,

    /// Password doesn't meet requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// The credential file could not be read or written.
    #[error("credential file error: {0}")]
    Io(#[from] std::io::Error),

    /// The credential file is not a valid JSON username->hash object.
    #[error("credential file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The interior lock was poisoned by a panicking writer.
    #[error("credential store lock poisoned")]
    Poisoned,
}

/// In-memory credential store flushed to a JSON file on every mutation.
pub struct UserStore {
    path: PathBuf,
    users: RwLock<BTreeMap<Username, String>>,
}

impl UserStore {
    /// Open the store backed by the file at `path`.
    ///
    /// A missing file is an empty store; the file is created on the
    /// first mutation.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file exists but cannot be read,
    /// or `StoreError::Malformed` if it is not a JSON object of
    /// username to hash string.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let users = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            users: RwLock::new(users),
        })
    }

    /// Path of the backing credential file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check a username/password pair.
    ///
    /// Unknown user and wrong password are indistinguishable to the
    /// caller; both are a plain `false`.
    #[must_use]
    pub fn verify(&self, username: &Username, password: &str) -> bool {
        let Ok(users) = self.users.read() else {
            return false;
        };
        users
            .get(username)
            .is_some_and(|hash| verify_password(password, hash).is_ok())
    }

    /// Add a new user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateUser` if the name is taken,
    /// `StoreError::WeakPassword` if the password is too short, and
    /// I/O errors from flushing the file.
    pub fn add(&self, username: &Username, password: &str) -> Result<(), StoreError> {
        validate_password(password)?;
        let hash = hash_password(password)?;

        let mut users = self.users.write().map_err(|_| StoreError::Poisoned)?;
        if users.contains_key(username) {
            return Err(StoreError::DuplicateUser(username.clone()));
        }
        users.insert(username.clone(), hash);
        self.flush(&users)?;

        tracing::info!(user = %username, "user added");
        Ok(())
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ProtectedUser` for the admin account,
    /// `StoreError::UnknownUser` if the name is absent, and I/O errors
    /// from flushing the file.
    pub fn delete(&self, username: &Username) -> Result<(), StoreError> {
        if username.is_admin() {
            return Err(StoreError::ProtectedUser);
        }

        let mut users = self.users.write().map_err(|_| StoreError::Poisoned)?;
        if users.remove(username).is_none() {
            return Err(StoreError::UnknownUser(username.clone()));
        }
        self.flush(&users)?;

        tracing::info!(user = %username, "user deleted");
        Ok(())
    }

    /// Overwrite a user's password.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownUser` if the name is absent,
    /// `StoreError::WeakPassword` if the password is too short, and
    /// I/O errors from flushing the file.
    pub fn reset_password(&self, username: &Username, new_password: &str) -> Result<(), StoreError> {
        validate_password(new_password)?;
        let hash = hash_password(new_password)?;

        let mut users = self.users.write().map_err(|_| StoreError::Poisoned)?;
        let entry = users
            .get_mut(username)
            .ok_or_else(|| StoreError::UnknownUser(username.clone()))?;
        *entry = hash;
        self.flush(&users)?;

        tracing::info!(user = %username, "password reset");
        Ok(())
    }

    /// All usernames, sorted, for administrative display.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if a writer panicked while
    /// holding the lock.
    pub fn usernames(&self) -> Result<Vec<Username>, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::Poisoned)?;
        Ok(users.keys().cloned().collect())
    }

    /// Rewrite the credential file from the given map.
    ///
    /// Writes a sibling temp file first and renames it into place so a
    /// crash mid-write never leaves a truncated credential file.
    fn flush(&self, users: &BTreeMap<Username, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(users)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), StoreError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(StoreError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| StoreError::PasswordHash)
}

/// Verify a password against a PHC hash string.
fn verify_password(password: &str, hash: &str) -> Result<(), StoreError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| StoreError::PasswordHash)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| StoreError::PasswordHash)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_store_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "driftwood-users-{tag}-{}.json",
            std::process::id()
        ))
    }

    fn open_fresh(tag: &str) -> UserStore {
        let path = temp_store_path(tag);
        let _ = fs::remove_file(&path);
        UserStore::open(path).unwrap()
    }

    fn user(name: &str) -> Username {
        Username::parse(name).unwrap()
    }

    #[test]
    fn test_add_then_verify_roundtrip() {
        let store = open_fresh("roundtrip");
        store.add(&user("j.doe"), "hunter2-hunter2").unwrap();

        assert!(store.verify(&user("j.doe"), "hunter2-hunter2"));
        assert!(!store.verify(&user("j.doe"), "wrong-password"));
        assert!(!store.verify(&user("nobody"), "hunter2-hunter2"));
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let store = open_fresh("duplicate");
        store.add(&user("j.doe"), "hunter2-hunter2").unwrap();

        let err = store.add(&user("j.doe"), "another-pass").unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUser(_)));
    }

    #[test]
    fn test_add_weak_password_rejected() {
        let store = open_fresh("weak");
        let err = store.add(&user("j.doe"), "short").unwrap_err();
        assert!(matches!(err, StoreError::WeakPassword(_)));
        assert!(store.usernames().unwrap().is_empty());
    }

    #[test]
    fn test_delete_admin_rejected() {
        let store = open_fresh("admin");
        store.add(&user("admin"), "root-password").unwrap();

        let err = store.delete(&user("admin")).unwrap_err();
        assert!(matches!(err, StoreError::ProtectedUser));
        assert!(store.verify(&user("admin"), "root-password"));
    }

    #[test]
    fn test_delete_unknown_user() {
        let store = open_fresh("unknown");
        let err = store.delete(&user("ghost")).unwrap_err();
        assert!(matches!(err, StoreError::UnknownUser(_)));
    }

    #[test]
    fn test_delete_existing_user() {
        let store = open_fresh("delete");
        store.add(&user("j.doe"), "hunter2-hunter2").unwrap();
        store.delete(&user("j.doe")).unwrap();

        assert!(!store.verify(&user("j.doe"), "hunter2-hunter2"));
        assert!(store.usernames().unwrap().is_empty());
    }

    #[test]
    fn test_reset_password() {
        let store = open_fresh("reset");
        store.add(&user("j.doe"), "hunter2-hunter2").unwrap();
        store.reset_password(&user("j.doe"), "new-password-9").unwrap();

        assert!(!store.verify(&user("j.doe"), "hunter2-hunter2"));
        assert!(store.verify(&user("j.doe"), "new-password-9"));
    }

    #[test]
    fn test_reset_password_unknown_user() {
        let store = open_fresh("reset-unknown");
        let err = store
            .reset_password(&user("ghost"), "new-password-9")
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownUser(_)));
    }

    #[test]
    fn test_persists_across_reopen() {
        let path = temp_store_path("reopen");
        let _ = fs::remove_file(&path);

        {
            let store = UserStore::open(path.clone()).unwrap();
            store.add(&user("j.doe"), "hunter2-hunter2").unwrap();
        }

        let reopened = UserStore::open(path).unwrap();
        assert!(reopened.verify(&user("j.doe"), "hunter2-hunter2"));
    }

    #[test]
    fn test_usernames_sorted() {
        let store = open_fresh("sorted");
        store.add(&user("zelda"), "hunter2-hunter2").unwrap();
        store.add(&user("alice"), "hunter2-hunter2").unwrap();

        let names: Vec<String> = store
            .usernames()
            .unwrap()
            .into_iter()
            .map(Username::into_inner)
            .collect();
        assert_eq!(names, ["alice", "zelda"]);
    }
}
