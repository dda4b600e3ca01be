//! Catalog store: products, brands, collections and site settings.
//!
//! The whole catalog lives in memory as a [`CatalogDocument`] and is written
//! back wholesale under [`CATALOG_KEY`] after every successful mutation.
//!
//! # Loading
//!
//! [`CatalogStore::open`] never fails. A missing value, a read error, malformed
//! JSON or a value that is not an object with a `products` field all fall
//! back to the built-in [`default_catalog`]; the reason is logged.
//!
//! # Writing
//!
//! A failed write is logged and otherwise ignored: the in-memory catalog keeps
//! the change and the next successful write persists it. Callers that need
//! to know can call [`CatalogStore::save`] directly.

mod defaults;
mod error;

use heen_core::{BrandId, CollectionId, Price, ProductId};
use tracing::{debug, error, info, instrument, warn};

pub use defaults::default_catalog;
pub use error::{CatalogError, DocumentError};

use crate::models::{
    self, Brand, CatalogDocument, Collection, Product, ProductDraft, SiteSettings,
};
use crate::storage::{CATALOG_KEY, Storage, StorageError};

/// Parse a stored catalog document.
///
/// # Errors
///
/// Returns [`DocumentError::Json`] for malformed JSON or a shape that does not
/// match, and [`DocumentError::MissingProducts`] when the value is not an
/// object with a `products` field.
pub fn parse_document(raw: &str) -> Result<CatalogDocument, DocumentError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let has_products = value
        .as_object()
        .is_some_and(|object| object.contains_key("products"));
    if !has_products {
        return Err(DocumentError::MissingProducts);
    }
    Ok(serde_json::from_value(value)?)
}

/// In-memory catalog mirrored to a [`Storage`] backend.
#[derive(Debug)]
pub struct CatalogStore<S> {
    storage: S,
    document: CatalogDocument,
}

impl<S: Storage> CatalogStore<S> {
    /// Load the catalog from `storage`, falling back to the default catalog.
    pub fn open(storage: S) -> Self {
        let document = match storage.get_item(CATALOG_KEY) {
            Ok(Some(raw)) => parse_document(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Stored catalog is unreadable, using defaults");
                default_catalog()
            }),
            Ok(None) => {
                debug!("No stored catalog, using defaults");
                default_catalog()
            }
            Err(e) => {
                error!(error = %e, "Could not read stored catalog, using defaults");
                default_catalog()
            }
        };
        info!(
            products = document.products.len(),
            brands = document.brands.len(),
            collections = document.collections.len(),
            "Catalog loaded"
        );
        Self { storage, document }
    }

    /// The full catalog document.
    #[must_use]
    pub const fn document(&self) -> &CatalogDocument {
        &self.document
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.document.products
    }

    #[must_use]
    pub fn brands(&self) -> &[Brand] {
        &self.document.brands
    }

    #[must_use]
    pub fn collections(&self) -> &[Collection] {
        &self.document.collections
    }

    #[must_use]
    pub const fn site_settings(&self) -> &SiteSettings {
        &self.document.site_settings
    }

    /// Write the catalog document to storage.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend rejects the write.
    pub fn save(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.document).map_err(|source| StorageError::Encode {
            key: CATALOG_KEY.to_owned(),
            source,
        })?;
        self.storage.set_item(CATALOG_KEY, &json)
    }

    /// Persist after a mutation, logging failures.
    fn commit(&self) {
        if let Err(e) = self.save() {
            error!(error = %e, "Could not save catalog");
        }
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Add a product with a fresh id, a slug derived from its name and a zero rating.
    ///
    /// # Errors
    ///
    /// Returns a validation error from [`ProductDraft::validate`].
    #[instrument(skip_all, fields(name = %draft.name))]
    pub fn create_product(&mut self, draft: ProductDraft) -> Result<Product, CatalogError> {
        draft.validate()?;
        let id = models::mint_id(
            models::now_ms(),
            self.document.products.iter().map(|p| p.id.as_i64()),
        );
        let product = draft.into_product(ProductId::new(id));
        self.document.products.push(product.clone());
        self.commit();
        info!(product_id = %product.id, slug = %product.slug, "Product created");
        Ok(product)
    }

    /// Replace the editable fields of the product with `id`.
    ///
    /// # Errors
    ///
    /// Returns a validation error, or [`CatalogError::ProductNotFound`].
    #[instrument(skip(self, draft))]
    pub fn update_product(
        &mut self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Product, CatalogError> {
        draft.validate()?;
        let product = self
            .document
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CatalogError::ProductNotFound(id))?;
        draft.apply_to(product);
        let updated = product.clone();
        self.commit();
        info!("Product updated");
        Ok(updated)
    }

    /// Remove the product with `id`. Returns `None` (and writes nothing) if absent.
    #[instrument(skip(self))]
    pub fn delete_product(&mut self, id: ProductId) -> Option<Product> {
        let index = self.document.products.iter().position(|p| p.id == id)?;
        let removed = self.document.products.remove(index);
        self.commit();
        info!("Product deleted");
        Some(removed)
    }

    /// Set every product's price to the amount typed in `input`.
    ///
    /// The first `,` is read as the decimal separator. Nothing changes unless
    /// the amount is a number greater than zero.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBulkPrice`] for non-numeric or
    /// non-positive input.
    #[instrument(skip(self))]
    pub fn set_all_prices(&mut self, input: &str) -> Result<Price, CatalogError> {
        let price = Price::parse_positive(input).map_err(CatalogError::InvalidBulkPrice)?;
        for product in &mut self.document.products {
            product.price = price;
        }
        self.commit();
        info!(%price, products = self.document.products.len(), "All prices updated");
        Ok(price)
    }

    // =========================================================================
    // Brands
    // =========================================================================

    /// Add a brand with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingField`] for a blank name.
    #[instrument(skip(self))]
    pub fn create_brand(&mut self, name: &str) -> Result<Brand, CatalogError> {
        let name = required(name, "name")?;
        let id = models::mint_id(
            models::now_ms(),
            self.document.brands.iter().map(|b| b.id.as_i64()),
        );
        let brand = Brand {
            id: BrandId::new(id),
            name,
        };
        self.document.brands.push(brand.clone());
        self.commit();
        info!(brand_id = %brand.id, "Brand created");
        Ok(brand)
    }

    /// Rename the brand with `id`. Products keep the old brand name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingField`] or [`CatalogError::BrandNotFound`].
    #[instrument(skip(self))]
    pub fn update_brand(&mut self, id: BrandId, name: &str) -> Result<Brand, CatalogError> {
        let name = required(name, "name")?;
        let brand = self
            .document
            .brands
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(CatalogError::BrandNotFound(id))?;
        brand.name = name;
        let updated = brand.clone();
        self.commit();
        info!("Brand updated");
        Ok(updated)
    }

    /// Remove the brand with `id`. Products referencing it are left as they are.
    #[instrument(skip(self))]
    pub fn delete_brand(&mut self, id: BrandId) -> Option<Brand> {
        let index = self.document.brands.iter().position(|b| b.id == id)?;
        let removed = self.document.brands.remove(index);
        self.commit();
        let orphaned = self
            .document
            .products
            .iter()
            .filter(|p| p.brand == removed.name)
            .count();
        info!(orphaned, "Brand deleted");
        Some(removed)
    }

    // =========================================================================
    // Collections
    // =========================================================================

    /// Add a collection whose id is derived from its name.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::MissingField`] for a blank name or description
    /// - [`CatalogError::EmptyCollectionId`] if the name yields an empty slug
    /// - [`CatalogError::DuplicateCollection`] if the slug is taken
    #[instrument(skip(self, description))]
    pub fn create_collection(
        &mut self,
        name: &str,
        description: &str,
    ) -> Result<Collection, CatalogError> {
        let id = CollectionId::from_name(name);
        let name = required(name, "name")?;
        let description = required(description, "description")?;
        if id.is_empty() {
            return Err(CatalogError::EmptyCollectionId(name));
        }
        if self.document.collection(&id).is_some() {
            return Err(CatalogError::DuplicateCollection(id));
        }
        let collection = Collection {
            id,
            name,
            description,
        };
        self.document.collections.push(collection.clone());
        self.commit();
        info!(collection_id = %collection.id, "Collection created");
        Ok(collection)
    }

    /// Change the name and description of a collection. Its id never changes.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingField`] or [`CatalogError::CollectionNotFound`].
    #[instrument(skip(self, description))]
    pub fn update_collection(
        &mut self,
        id: &CollectionId,
        name: &str,
        description: &str,
    ) -> Result<Collection, CatalogError> {
        let name = required(name, "name")?;
        let description = required(description, "description")?;
        let collection = self
            .document
            .collections
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| CatalogError::CollectionNotFound(id.clone()))?;
        collection.name = name;
        collection.description = description;
        let updated = collection.clone();
        self.commit();
        info!("Collection updated");
        Ok(updated)
    }

    /// Remove the collection with `id`. Products keep their collection reference.
    #[instrument(skip(self))]
    pub fn delete_collection(&mut self, id: &CollectionId) -> Option<Collection> {
        let index = self.document.collections.iter().position(|c| &c.id == id)?;
        let removed = self.document.collections.remove(index);
        self.commit();
        info!("Collection deleted");
        Some(removed)
    }

    // =========================================================================
    // Site settings and whole-document operations
    // =========================================================================

    /// Replace the logo and hero image references.
    ///
    /// Empty references are allowed (no logo / no hero image).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidImage`] for a non-empty reference that is
    /// not an absolute `http`, `https` or `data` URL.
    #[instrument(skip_all)]
    pub fn update_site_settings(
        &mut self,
        settings: SiteSettings,
    ) -> Result<SiteSettings, CatalogError> {
        for image in [&settings.logo, &settings.hero_image] {
            if !image.trim().is_empty() {
                models::validate_image(image)?;
            }
        }
        self.document.site_settings = settings.clone();
        self.commit();
        info!("Site settings updated");
        Ok(settings)
    }

    /// Replace the whole catalog, e.g. from a seed file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`],
    /// [`CatalogError::DuplicateBrand`] or [`CatalogError::DuplicateCollection`]
    /// if ids repeat.
    #[instrument(skip_all, fields(products = document.products.len()))]
    pub fn replace_document(&mut self, document: CatalogDocument) -> Result<(), CatalogError> {
        let mut product_ids = std::collections::HashSet::new();
        if let Some(dup) = document.products.iter().find(|p| !product_ids.insert(p.id)) {
            return Err(CatalogError::DuplicateProduct(dup.id));
        }
        let mut brand_ids = std::collections::HashSet::new();
        if let Some(dup) = document.brands.iter().find(|b| !brand_ids.insert(b.id)) {
            return Err(CatalogError::DuplicateBrand(dup.id));
        }
        let mut collection_ids = std::collections::HashSet::new();
        if let Some(dup) = document
            .collections
            .iter()
            .find(|c| !collection_ids.insert(&c.id))
        {
            return Err(CatalogError::DuplicateCollection(dup.id.clone()));
        }
        self.document = document;
        self.commit();
        info!("Catalog replaced");
        Ok(())
    }

    /// Restore the built-in catalog.
    pub fn reset_to_defaults(&mut self) {
        self.document = default_catalog();
        self.commit();
        info!("Catalog reset to defaults");
    }
}

/// Trim a required text field.
fn required(value: &str, field: &'static str) -> Result<String, CatalogError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CatalogError::MissingField(field));
    }
    Ok(value.to_owned())
}
