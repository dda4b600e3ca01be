//! Authentication service.
//!
//! Sign-in is mocked: there is no user directory. One configured credential
//! grants the admin role, and any other complete email/password pair signs
//! in as a regular user. Sign-up always creates a regular user.

mod error;

pub use error::AuthError;

use heen_core::{Email, Role, UserId};
use tracing::{info, instrument};

use crate::config::AdminCredential;
use crate::models::{self, User};

/// Identifier of the administrator account.
pub const ADMIN_USER_ID: UserId = UserId::new(1);

/// Display name of the administrator account.
pub const ADMIN_NAME: &str = "Admin Heen";

/// Display name given to users who sign in without an account.
pub const DEFAULT_USER_NAME: &str = "Usuário";

/// Authentication service.
#[derive(Debug, Clone, Copy)]
pub struct AuthService<'a> {
    admin: &'a AdminCredential,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(admin: &'a AdminCredential) -> Self {
        Self { admin }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if either field is blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    #[instrument(skip(self, password))]
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if is_blank(email) || is_blank(password) {
            return Err(AuthError::MissingFields);
        }
        let is_admin = self.admin.matches(email, password);
        let email = Email::parse(email)?;

        let user = if is_admin {
            User {
                id: ADMIN_USER_ID,
                name: ADMIN_NAME.to_owned(),
                email,
                role: Role::Admin,
            }
        } else {
            User {
                id: UserId::new(models::now_ms()),
                name: DEFAULT_USER_NAME.to_owned(),
                email,
                role: Role::User,
            }
        };
        info!(user_id = %user.id, role = %user.role, "Login accepted");
        Ok(user)
    }

    /// Create a regular user account.
    ///
    /// Sign-up never grants the admin role, even with the admin credential.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if name, email or password is blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    #[instrument(skip(self, password))]
    pub fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        if is_blank(name) || is_blank(email) || is_blank(password) {
            return Err(AuthError::MissingFields);
        }
        let user = User {
            id: UserId::new(models::now_ms()),
            name: name.trim().to_owned(),
            email: Email::parse(email)?,
            role: Role::User,
        };
        info!(user_id = %user.id, "Account created");
        Ok(user)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
