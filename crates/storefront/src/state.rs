//! Application state owned by the front end.

use std::num::NonZeroU32;
use std::rc::Rc;

use heen_core::ProductId;
use tracing::info;

use crate::admin::AdminPanel;
use crate::cart::{Cart, CartItem};
use crate::catalog::CatalogStore;
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::models::{Product, User};
use crate::search::ProductFilter;
use crate::services::auth::AuthService;
use crate::services::checkout::{self, CheckoutForm, OrderConfirmation};
use crate::session::SessionStore;
use crate::storage::{FileStorage, Storage};

/// Everything a storefront session needs.
///
/// The catalog and session stores share one storage backend through `Rc`;
/// the cart is never persisted.
#[derive(Debug)]
pub struct AppState<S> {
    config: StorefrontConfig,
    storage: Rc<S>,
    catalog: CatalogStore<Rc<S>>,
    session: SessionStore<Rc<S>>,
    cart: Cart,
}

impl AppState<FileStorage> {
    /// Open file storage in the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the data directory cannot be created.
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        let storage = FileStorage::open(&config.data_dir)?;
        Ok(Self::new(config, storage))
    }
}

impl<S: Storage> AppState<S> {
    /// Create a new application state over `storage`.
    pub fn new(config: StorefrontConfig, storage: S) -> Self {
        let storage = Rc::new(storage);
        let catalog = CatalogStore::open(Rc::clone(&storage));
        let session = SessionStore::restore(Rc::clone(&storage));
        Self {
            config,
            storage,
            catalog,
            session,
            cart: Cart::new(),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get a reference to the shared storage backend.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore<Rc<S>> {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    /// Products matching `filter`, in catalog order.
    #[must_use]
    pub fn search(&self, filter: &ProductFilter) -> Vec<&Product> {
        filter.apply(self.catalog.products())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of the product with `id` to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the catalog has no such product.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<NonZeroU32> {
        let product = self
            .catalog
            .document()
            .product(id)
            .ok_or_else(|| AppError::NotFound(format!("Produto {id}")))?;
        Ok(self.cart.add(product))
    }

    /// Remove the product with `id` from the cart; unknown ids are ignored.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Option<CartItem> {
        self.cart.remove(id)
    }

    /// Validate the cart and contact details, then empty the cart.
    ///
    /// # Errors
    ///
    /// Returns a checkout error; the cart is left as it was.
    pub fn checkout(&mut self, form: &CheckoutForm) -> Result<OrderConfirmation> {
        let confirmation = checkout::checkout(&self.cart, form)?;
        self.cart.clear();
        Ok(confirmation)
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Sign in and persist the session.
    ///
    /// # Errors
    ///
    /// Returns an auth error for blank fields or an invalid email.
    pub fn login(&mut self, email: &str, password: &str) -> Result<&User> {
        let user = AuthService::new(&self.config.admin).login(email, password)?;
        Ok(self.session.sign_in(user))
    }

    /// Create an account and sign in with it.
    ///
    /// # Errors
    ///
    /// Returns an auth error for blank fields or an invalid email.
    pub fn sign_up(&mut self, name: &str, email: &str, password: &str) -> Result<&User> {
        let user = AuthService::new(&self.config.admin).sign_up(name, email, password)?;
        Ok(self.session.sign_in(user))
    }

    /// Sign out. The cart is kept.
    pub fn logout(&mut self) -> Option<User> {
        self.session.sign_out()
    }

    /// Open the admin panel for the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an access error unless an administrator is signed in.
    pub fn admin(&mut self) -> Result<AdminPanel<'_, Rc<S>>> {
        let panel = AdminPanel::open(self.session.current_user(), &mut self.catalog)?;
        info!("Admin access granted");
        Ok(panel)
    }
}
