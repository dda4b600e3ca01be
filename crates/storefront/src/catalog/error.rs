//! Catalog error types.

use heen_core::{BrandId, CollectionId, PriceError, ProductId};
use thiserror::Error;

/// Errors raised by catalog reads and admin mutations.
///
/// Messages of the variants an admin can trigger from a form are in
/// Portuguese, since they are shown to them as-is.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required form field is blank.
    #[error("Por favor, preencha todos os campos. (campo vazio: {0})")]
    MissingField(&'static str),

    /// The product has no image.
    #[error("Por favor, adicione uma imagem para o produto.")]
    MissingImage,

    /// The image reference is not a usable URL.
    #[error("invalid image reference: {0}")]
    InvalidImage(String),

    /// A product price below zero.
    #[error("price cannot be negative")]
    NegativePrice,

    /// The bulk price input is not a positive number.
    #[error("Por favor, insira um preço válido.")]
    InvalidBulkPrice(#[source] PriceError),

    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("brand not found: {0}")]
    BrandNotFound(BrandId),

    /// Two brands share an id in an imported document.
    #[error("duplicate brand id: {0}")]
    DuplicateBrand(BrandId),

    #[error("collection not found: {0}")]
    CollectionNotFound(CollectionId),

    /// Two products share an id in an imported document.
    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// A collection with the same slug already exists.
    #[error("a collection with id {0:?} already exists")]
    DuplicateCollection(CollectionId),

    /// The collection name contains no slug characters.
    #[error("collection name {0:?} does not produce a usable id")]
    EmptyCollectionId(String),

    /// An imported document could not be read.
    #[error("invalid catalog document: {0}")]
    Document(#[from] DocumentError),
}

/// Why a stored or imported catalog document was rejected.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The value is not an object with a `products` field.
    #[error("document has no products field")]
    MissingProducts,
}
