//! Unified error handling.
//!
//! Provides a unified `AppError` type over the per-module errors. Front ends
//! show [`AppError::user_message`] and log the full error.

use thiserror::Error;

use crate::access::AccessError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog validation or lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Capability check failed.
    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    /// Checkout was rejected.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Message safe to show to the shopper or admin.
    ///
    /// Validation errors carry their own (Portuguese) message; storage and
    /// configuration details are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(_) => "Configuração inválida.".to_string(),
            Self::Storage(_) => "Não foi possível salvar os dados.".to_string(),
            Self::Catalog(err) => match err {
                CatalogError::ProductNotFound(_) => "Produto não encontrado.".to_string(),
                CatalogError::BrandNotFound(_) => "Marca não encontrada.".to_string(),
                CatalogError::CollectionNotFound(_) => "Coleção não encontrada.".to_string(),
                CatalogError::InvalidImage(_) => "Imagem inválida.".to_string(),
                CatalogError::NegativePrice => "O preço não pode ser negativo.".to_string(),
                CatalogError::DuplicateCollection(_) => {
                    "Já existe uma coleção com este nome.".to_string()
                }
                _ => err.to_string(),
            },
            Self::Auth(err) => match err {
                AuthError::InvalidEmail(_) => "E-mail inválido.".to_string(),
                AuthError::MissingFields => err.to_string(),
            },
            Self::Access(err) => err.to_string(),
            Self::Checkout(err) => match err {
                CheckoutError::InvalidEmail(_) => "E-mail inválido.".to_string(),
                _ => err.to_string(),
            },
            Self::NotFound(what) => format!("{what} não encontrado."),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use heen_core::{PriceError, ProductId};

    use super::*;

    #[test]
    fn test_validation_messages_pass_through() {
        let err = AppError::from(CatalogError::InvalidBulkPrice(PriceError::Negative));
        assert_eq!(err.user_message(), "Por favor, insira um preço válido.");

        let err = AppError::from(AuthError::MissingFields);
        assert_eq!(err.user_message(), "Por favor, preencha todos os campos.");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::from(StorageError::Io {
            key: "appData".to_string(),
            source: std::io::Error::other("disk on fire"),
        });
        assert!(!err.user_message().contains("disk"));
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_not_found_messages() {
        let err = AppError::from(CatalogError::ProductNotFound(ProductId::new(9)));
        assert_eq!(err.user_message(), "Produto não encontrado.");
    }
}
