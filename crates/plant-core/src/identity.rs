//! Who is using the tracker.
//!
//! Plant logic never looks at identity; callers use an [`IdentityProvider`] to
//! decide whether to let a command through at all.

use crate::error::{PlantError, Result};
use crate::snapshot::{SnapshotStore, SESSION_KEY};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::User => f.write_str("user"),
        }
    }
}

/// The signed-in user as seen by the rest of the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// Name if set, otherwise the email address.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A credential entry from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Role,
    pub password: String,
}

impl LocalUser {
    fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

pub trait IdentityProvider {
    fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    fn current_user(&self) -> Option<&User>;

    fn login(&mut self, email: &str, password: &str) -> Result<User>;

    fn logout(&mut self);

    fn require_user(&self) -> Result<&User> {
        self.current_user().ok_or(PlantError::NotAuthenticated)
    }
}

// ---------------------------------------------------------------------------
// LocalIdentity
// ---------------------------------------------------------------------------

/// Email/password check against configured users, with the session kept in
/// the snapshot store so it survives between invocations.
pub struct LocalIdentity {
    users: Vec<LocalUser>,
    sessions: Box<dyn SnapshotStore>,
    current: Option<User>,
}

impl LocalIdentity {
    pub fn new(users: Vec<LocalUser>, sessions: Box<dyn SnapshotStore>) -> Self {
        let current = restore_session(sessions.as_ref(), &users);
        Self {
            users,
            sessions,
            current,
        }
    }

    fn find(&self, email: &str) -> Option<&LocalUser> {
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
    }
}

impl IdentityProvider for LocalIdentity {
    fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    fn login(&mut self, email: &str, password: &str) -> Result<User> {
        let user = match self.find(email) {
            Some(u) if u.password == password => u.to_user(),
            _ => {
                tracing::info!(email, "rejected login");
                return Err(PlantError::InvalidCredentials);
            }
        };
        match serde_json::to_string(&user) {
            Ok(data) => {
                if let Err(e) = self.sessions.save(SESSION_KEY, &data) {
                    tracing::warn!(error = %e, "failed to save session");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode session"),
        }
        self.current = Some(user.clone());
        Ok(user)
    }

    fn logout(&mut self) {
        self.current = None;
        if let Err(e) = self.sessions.remove(SESSION_KEY) {
            tracing::warn!(error = %e, "failed to clear session");
        }
    }
}

/// A stored session only counts if its user is still configured.
fn restore_session(sessions: &dyn SnapshotStore, users: &[LocalUser]) -> Option<User> {
    let data = match sessions.load(SESSION_KEY) {
        Ok(data) => data?,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load session");
            return None;
        }
    };
    let user: User = match serde_json::from_str(&data) {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "stored session is unreadable");
            return None;
        }
    };
    users
        .iter()
        .find(|u| u.id == user.id && u.email.eq_ignore_ascii_case(&user.email))
        .map(LocalUser::to_user)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::MemorySnapshotStore;

    fn users() -> Vec<LocalUser> {
        vec![LocalUser {
            id: "u1".to_string(),
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
            role: Role::Admin,
            password: "hunter2".to_string(),
        }]
    }

    #[test]
    fn login_with_valid_credentials() {
        let mut identity = LocalIdentity::new(users(), Box::new(MemorySnapshotStore::new()));
        assert!(!identity.is_authenticated());
        let user = identity.login("ANA@example.com", "hunter2").unwrap();
        assert_eq!(user.display_name(), "Ana");
        assert!(user.is_admin());
        assert!(identity.is_authenticated());
    }

    #[test]
    fn login_with_wrong_password() {
        let mut identity = LocalIdentity::new(users(), Box::new(MemorySnapshotStore::new()));
        assert!(matches!(
            identity.login("ana@example.com", "nope"),
            Err(PlantError::InvalidCredentials)
        ));
        assert!(matches!(
            identity.require_user(),
            Err(PlantError::NotAuthenticated)
        ));
    }

    #[test]
    fn session_survives_reopen_until_logout() {
        let sessions = MemorySnapshotStore::new();
        let mut identity = LocalIdentity::new(users(), Box::new(sessions.clone()));
        identity.login("ana@example.com", "hunter2").unwrap();

        let mut reopened = LocalIdentity::new(users(), Box::new(sessions.clone()));
        assert_eq!(reopened.require_user().unwrap().id, "u1");

        reopened.logout();
        assert!(sessions.get(SESSION_KEY).is_none());
        assert!(!LocalIdentity::new(users(), Box::new(sessions)).is_authenticated());
    }

    #[test]
    fn session_for_removed_user_is_ignored() {
        let sessions = MemorySnapshotStore::new();
        let mut identity = LocalIdentity::new(users(), Box::new(sessions.clone()));
        identity.login("ana@example.com", "hunter2").unwrap();
        let identity = LocalIdentity::new(Vec::new(), Box::new(sessions));
        assert!(identity.current_user().is_none());
    }
}
