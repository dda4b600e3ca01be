//! Role-based capability checks.

use std::fmt;

use heen_core::Role;
use thiserror::Error;

use crate::models::User;

/// Something a user may be allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Open the admin panel at all.
    ViewAdminPanel,
    /// Create, edit and delete products, brands and collections, and
    /// change prices.
    ManageCatalog,
    /// Change the logo and hero image.
    ManageSiteSettings,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ViewAdminPanel => "view admin panel",
            Self::ManageCatalog => "manage catalog",
            Self::ManageSiteSettings => "manage site settings",
        })
    }
}

/// Why a capability check failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Faça login para continuar.")]
    NotLoggedIn,

    #[error("Acesso negado: {0} requer um administrador.")]
    Forbidden(Capability),
}

/// Whether `role` grants `capability`.
#[must_use]
pub const fn grants(role: Role, capability: Capability) -> bool {
    match (role, capability) {
        (Role::Admin, _) => true,
        (
            Role::User,
            Capability::ViewAdminPanel | Capability::ManageCatalog | Capability::ManageSiteSettings,
        ) => false,
    }
}

/// Check that `user` is signed in and holds `capability`.
///
/// # Errors
///
/// Returns [`AccessError::NotLoggedIn`] without a user and
/// [`AccessError::Forbidden`] when the role lacks the capability.
pub fn authorize(user: Option<&User>, capability: Capability) -> Result<&User, AccessError> {
    let user = user.ok_or(AccessError::NotLoggedIn)?;
    if grants(user.role, capability) {
        Ok(user)
    } else {
        tracing::warn!(user_id = %user.id, %capability, "Capability denied");
        Err(AccessError::Forbidden(capability))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use heen_core::{Email, UserId};

    use super::*;

    fn user(role: Role) -> User {
        User {
            id: UserId::new(1),
            name: "Teste".to_string(),
            email: Email::parse("teste@heein.com").unwrap(),
            role,
        }
    }

    const ALL: [Capability; 3] = [
        Capability::ViewAdminPanel,
        Capability::ManageCatalog,
        Capability::ManageSiteSettings,
    ];

    #[test]
    fn test_admin_holds_every_capability() {
        let admin = user(Role::Admin);
        for capability in ALL {
            assert_eq!(authorize(Some(&admin), capability).unwrap(), &admin);
        }
    }

    #[test]
    fn test_regular_user_is_forbidden() {
        let customer = user(Role::User);
        for capability in ALL {
            assert_eq!(
                authorize(Some(&customer), capability),
                Err(AccessError::Forbidden(capability))
            );
        }
    }

    #[test]
    fn test_anonymous_is_not_logged_in() {
        assert_eq!(
            authorize(None, Capability::ViewAdminPanel),
            Err(AccessError::NotLoggedIn)
        );
    }
}
