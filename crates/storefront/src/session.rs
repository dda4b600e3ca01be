//! The signed-in user, persisted under [`SESSION_KEY`].
//!
//! Stored separately from the catalog: clearing one never touches the other.
//! At most one user is signed in at a time.

use tracing::{debug, error, info, warn};

use crate::models::User;
use crate::storage::{SESSION_KEY, Storage};

/// Current session, mirrored to a [`Storage`] backend.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    current: Option<User>,
}

impl<S: Storage> SessionStore<S> {
    /// Restore the session from `storage`.
    ///
    /// A missing, malformed or id-less value means nobody is signed in.
    pub fn restore(storage: S) -> Self {
        let current = match storage.get_item(SESSION_KEY) {
            Ok(Some(raw)) => parse_user(&raw),
            Ok(None) => None,
            Err(e) => {
                error!(error = %e, "Could not read stored session");
                None
            }
        };
        if let Some(user) = &current {
            debug!(user_id = %user.id, role = %user.role, "Session restored");
        }
        Self { storage, current }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    /// Make `user` the signed-in user, replacing any previous session.
    ///
    /// A failed write is logged; the in-memory session still changes.
    pub fn sign_in(&mut self, user: User) -> &User {
        match serde_json::to_string(&user) {
            Ok(json) => {
                if let Err(e) = self.storage.set_item(SESSION_KEY, &json) {
                    error!(error = %e, "Could not save session");
                }
            }
            Err(e) => error!(error = %e, "Could not encode session"),
        }
        info!(user_id = %user.id, role = %user.role, "User signed in");
        self.current.insert(user)
    }

    /// Clear the session. Returns the user that was signed in, if any.
    ///
    /// The stored session is removed even if nobody was signed in.
    pub fn sign_out(&mut self) -> Option<User> {
        let previous = self.current.take();
        if let Err(e) = self.storage.remove_item(SESSION_KEY) {
            error!(error = %e, "Could not remove stored session");
        }
        if let Some(user) = &previous {
            info!(user_id = %user.id, "User signed out");
        }
        previous
    }
}

/// Parse a stored session; anything but an object with an `id` is ignored.
fn parse_user(raw: &str) -> Option<User> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Stored session is not JSON, ignoring");
            return None;
        }
    };
    if value.get("id").is_none() {
        warn!("Stored session has no id, ignoring");
        return None;
    }
    serde_json::from_value(value)
        .inspect_err(|e| warn!(error = %e, "Stored session is unreadable, ignoring"))
        .ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use heen_core::{Email, Role, UserId};

    use super::*;
    use crate::storage::{CATALOG_KEY, MemoryStorage};

    fn user() -> User {
        User {
            id: UserId::new(1_700_000_000_000),
            name: "Usuário".to_string(),
            email: Email::parse("cliente@exemplo.com").unwrap(),
            role: Role::User,
        }
    }

    #[test]
    fn test_restore_empty() {
        let session = SessionStore::restore(MemoryStorage::new());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_sign_in_persists_and_restores() {
        let storage = MemoryStorage::new();
        let mut session = SessionStore::restore(&storage);
        session.sign_in(user());
        assert!(session.is_signed_in());

        let restored = SessionStore::restore(&storage);
        assert_eq!(restored.current_user(), Some(&user()));
    }

    #[test]
    fn test_sign_out_removes_key() {
        let storage = MemoryStorage::new();
        let mut session = SessionStore::restore(&storage);
        session.sign_in(user());

        assert_eq!(session.sign_out(), Some(user()));
        assert!(storage.get_item(SESSION_KEY).unwrap().is_none());
        assert_eq!(session.sign_out(), None);
    }

    #[test]
    fn test_sign_out_leaves_catalog_alone() {
        let storage = MemoryStorage::with_item(CATALOG_KEY, r#"{"products":[]}"#);
        let mut session = SessionStore::restore(&storage);
        session.sign_in(user());
        session.sign_out();
        assert!(storage.get_item(CATALOG_KEY).unwrap().is_some());
    }

    #[test]
    fn test_restore_ignores_bad_values() {
        for raw in [
            "not json",
            "null",
            r#"{"name":"Sem id","email":"a@b.c","role":"user"}"#,
            r#"{"id":"abc","name":"x","email":"a@b.c","role":"user"}"#,
            r#"{"id":1,"name":"x","email":"sem-arroba","role":"user"}"#,
        ] {
            let session = SessionStore::restore(MemoryStorage::with_item(SESSION_KEY, raw));
            assert!(session.current_user().is_none(), "{raw}");
        }
    }
}
