//! Admin panel: the only path to catalog mutations.
//!
//! An [`AdminPanel`] can only be opened for a user holding
//! [`Capability::ViewAdminPanel`], and each operation re-checks the finer
//! capability it needs.

use heen_core::{BrandId, CollectionId, Price, ProductId};
use tracing::info;

use crate::access::{Capability, authorize};
use crate::catalog::CatalogStore;
use crate::error::Result;
use crate::models::{Brand, CatalogDocument, Collection, Product, ProductDraft, SiteSettings, User};
use crate::storage::Storage;

/// Capability-checked handle over the catalog.
#[derive(Debug)]
pub struct AdminPanel<'a, S> {
    user: &'a User,
    catalog: &'a mut CatalogStore<S>,
}

impl<'a, S: Storage> AdminPanel<'a, S> {
    /// Open the panel for `user`.
    ///
    /// # Errors
    ///
    /// Returns an access error if nobody is signed in or the user may not
    /// view the admin panel.
    pub fn open(user: Option<&'a User>, catalog: &'a mut CatalogStore<S>) -> Result<Self> {
        let user = authorize(user, Capability::ViewAdminPanel)?;
        info!(user_id = %user.id, "Admin panel opened");
        Ok(Self { user, catalog })
    }

    /// The administrator using the panel.
    #[must_use]
    pub const fn user(&self) -> &User {
        self.user
    }

    /// Read access to the catalog being edited.
    #[must_use]
    pub fn catalog(&self) -> &CatalogDocument {
        self.catalog.document()
    }

    fn require(&self, capability: Capability) -> Result<()> {
        authorize(Some(self.user), capability)?;
        Ok(())
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// # Errors
    ///
    /// Returns an access or validation error.
    pub fn create_product(&mut self, draft: ProductDraft) -> Result<Product> {
        self.require(Capability::ManageCatalog)?;
        Ok(self.catalog.create_product(draft)?)
    }

    /// # Errors
    ///
    /// Returns an access, validation or not-found error.
    pub fn update_product(&mut self, id: ProductId, draft: ProductDraft) -> Result<Product> {
        self.require(Capability::ManageCatalog)?;
        Ok(self.catalog.update_product(id, draft)?)
    }

    /// Returns `Ok(None)` if no product has `id`.
    ///
    /// # Errors
    ///
    /// Returns an access error.
    pub fn delete_product(&mut self, id: ProductId) -> Result<Option<Product>> {
        self.require(Capability::ManageCatalog)?;
        Ok(self.catalog.delete_product(id))
    }

    /// Set every product's price from text input such as `"199,90"`.
    ///
    /// # Errors
    ///
    /// Returns an access error, or the invalid-price error with no change made.
    pub fn set_all_prices(&mut self, input: &str) -> Result<Price> {
        self.require(Capability::ManageCatalog)?;
        Ok(self.catalog.set_all_prices(input)?)
    }

    // =========================================================================
    // Brands
    // =========================================================================

    /// # Errors
    ///
    /// Returns an access or validation error.
    pub fn create_brand(&mut self, name: &str) -> Result<Brand> {
        self.require(Capability::ManageCatalog)?;
        Ok(self.catalog.create_brand(name)?)
    }

    /// # Errors
    ///
    /// Returns an access, validation or not-found error.
    pub fn update_brand(&mut self, id: BrandId, name: &str) -> Result<Brand> {
        self.require(Capability::ManageCatalog)?;
        Ok(self.catalog.update_brand(id, name)?)
    }

    /// # Errors
    ///
    /// Returns an access error.
    pub fn delete_brand(&mut self, id: BrandId) -> Result<Option<Brand>> {
        self.require(Capability::ManageCatalog)?;
        Ok(self.catalog.delete_brand(id))
    }

    // =========================================================================
    // Collections
    // =========================================================================

    /// # Errors
    ///
    /// Returns an access or validation error.
    pub fn create_collection(&mut self, name: &str, description: &str) -> Result<Collection> {
        self.require(Capability::ManageCatalog)?;
        Ok(self.catalog.create_collection(name, description)?)
    }

    /// # Errors
    ///
    /// Returns an access, validation or not-found error.
    pub fn update_collection(
        &mut self,
        id: &CollectionId,
        name: &str,
        description: &str,
    ) -> Result<Collection> {
        self.require(Capability::ManageCatalog)?;
        Ok(self.catalog.update_collection(id, name, description)?)
    }

    /// # Errors
    ///
    /// Returns an access error.
    pub fn delete_collection(&mut self, id: &CollectionId) -> Result<Option<Collection>> {
        self.require(Capability::ManageCatalog)?;
        Ok(self.catalog.delete_collection(id))
    }

    // =========================================================================
    // Site settings and seeding
    // =========================================================================

    /// # Errors
    ///
    /// Returns an access error or an invalid image reference.
    pub fn update_site_settings(&mut self, settings: SiteSettings) -> Result<SiteSettings> {
        self.require(Capability::ManageSiteSettings)?;
        Ok(self.catalog.update_site_settings(settings)?)
    }

    /// Replace the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns an access error or a duplicate-id error.
    pub fn replace_catalog(&mut self, document: CatalogDocument) -> Result<()> {
        self.require(Capability::ManageCatalog)?;
        self.require(Capability::ManageSiteSettings)?;
        Ok(self.catalog.replace_document(document)?)
    }

    /// Restore the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an access error.
    pub fn reset_catalog(&mut self) -> Result<()> {
        self.require(Capability::ManageCatalog)?;
        self.require(Capability::ManageSiteSettings)?;
        self.catalog.reset_to_defaults();
        Ok(())
    }
}
