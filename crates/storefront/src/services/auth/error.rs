//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during sign-in and sign-up.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field (email, password, or name on sign-up) is blank.
    #[error("Por favor, preencha todos os campos.")]
    MissingFields,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] heen_core::EmailError),
}
