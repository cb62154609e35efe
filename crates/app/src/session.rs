//! Session store.
//!
//! Persists the bearer token and the logged-in user's profile snapshot
//! under two fixed keys in the state directory. Both keys are written on
//! login and removed together on logout; no other durable client state
//! exists. The cart in particular is never stored here.

use std::{fs, io, path::PathBuf};

use haat::order::Role;
use thiserror::Error;

use crate::users::UserProfile;

/// File name of the persisted bearer token.
pub const TOKEN_KEY: &str = "token";

/// File name of the persisted profile snapshot.
pub const USER_KEY: &str = "user.json";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage error")]
    Io(#[from] io::Error),

    #[error("stored session is corrupt")]
    Corrupt(#[from] serde_json::Error),
}

/// File-backed store for the authenticated session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// A store rooted at the given state directory.
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Persist a fresh session: the token and the profile snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the state directory or either key cannot be
    /// written.
    pub fn save(&self, token: &str, user: &UserProfile) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(TOKEN_KEY), token)?;
        fs::write(self.dir.join(USER_KEY), serde_json::to_vec_pretty(user)?)?;

        Ok(())
    }

    /// Replace the profile snapshot, e.g. after a profile update.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be written.
    pub fn update_user(&self, user: &UserProfile) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(USER_KEY), serde_json::to_vec_pretty(user)?)?;

        Ok(())
    }

    /// The stored token, if a session exists.
    ///
    /// # Errors
    ///
    /// Returns an error when the key exists but cannot be read.
    pub fn token(&self) -> Result<Option<String>, SessionError> {
        match fs::read_to_string(self.dir.join(TOKEN_KEY)) {
            Ok(token) => Ok(Some(token.trim().to_string())),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    /// The stored profile snapshot, if a session exists.
    ///
    /// # Errors
    ///
    /// Returns an error when the key exists but cannot be read or parsed.
    pub fn user(&self) -> Result<Option<UserProfile>, SessionError> {
        match fs::read(self.dir.join(USER_KEY)) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    /// Whether a token is stored.
    ///
    /// # Errors
    ///
    /// Returns an error when the key exists but cannot be read.
    pub fn is_authenticated(&self) -> Result<bool, SessionError> {
        Ok(self.token()?.is_some())
    }

    /// The stored user's role, if a session exists.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot exists but cannot be read.
    pub fn role(&self) -> Result<Option<Role>, SessionError> {
        Ok(self.user()?.map(|user| user.role))
    }

    /// Remove both session keys. Removing an absent session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error when an existing key cannot be removed.
    pub fn clear(&self) -> Result<(), SessionError> {
        for key in [TOKEN_KEY, USER_KEY] {
            match fs::remove_file(self.dir.join(key)) {
                Ok(()) => {}
                Err(error) if error.kind() == io::ErrorKind::NotFound => {}
                Err(error) => return Err(error.into()),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use haat::ids::UserId;
    use testresult::TestResult;

    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: UserId::from_raw(1),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            role: Role::Buyer,
            address: None,
            state: Some("Karnataka".to_string()),
            district: None,
            phone: None,
        }
    }

    #[test]
    fn save_then_load_round_trips() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = SessionStore::new(dir.path().to_path_buf());

        store.save("tk_abc", &profile())?;

        assert_eq!(store.token()?.as_deref(), Some("tk_abc"));
        assert_eq!(store.user()?, Some(profile()));
        assert_eq!(store.role()?, Some(Role::Buyer));
        assert!(store.is_authenticated()?);

        Ok(())
    }

    #[test]
    fn clear_removes_both_keys() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = SessionStore::new(dir.path().to_path_buf());

        store.save("tk_abc", &profile())?;
        store.clear()?;

        assert_eq!(store.token()?, None);
        assert_eq!(store.user()?, None);
        assert!(!store.is_authenticated()?);

        Ok(())
    }

    #[test]
    fn missing_session_reads_as_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = SessionStore::new(dir.path().to_path_buf());

        assert_eq!(store.token()?, None);
        assert_eq!(store.user()?, None);

        Ok(())
    }

    #[test]
    fn clearing_an_absent_session_is_a_noop() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = SessionStore::new(dir.path().to_path_buf());

        store.clear()?;

        Ok(())
    }
}
