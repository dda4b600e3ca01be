//! Session user.

use heen_core::{Email, Role, UserId};
use serde::{Deserialize, Serialize};

/// The signed-in user, as persisted under the session key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
}
