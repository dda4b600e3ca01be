//! Key-value persistence port.
//!
//! The storefront persists two independent documents, each as a JSON string
//! under its own key:
//!
//! - [`CATALOG_KEY`] - products, brands, collections and site settings
//! - [`SESSION_KEY`] - the signed-in user
//!
//! There is no versioning: whatever is stored is read back as-is, and
//! readers fall back to defaults when a value is missing or unreadable.
//!
//! Implementations:
//!
//! - [`FileStorage`] - one `<key>.json` file per key inside a data directory
//! - [`MemoryStorage`] - a `HashMap`, for tests and throwaway sessions

mod file;
mod memory;

use std::rc::Rc;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Key holding the serialized catalog document.
pub const CATALOG_KEY: &str = "appData";

/// Key holding the serialized session user.
pub const SESSION_KEY: &str = "currentUser";

/// Errors raised by a [`Storage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key contains characters that cannot be stored.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Reading or writing the underlying medium failed.
    #[error("storage I/O error for key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The value could not be encoded as JSON.
    #[error("could not encode value for key {key:?}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A string key-value store.
///
/// Methods take `&self` so one backend can be shared by the catalog and
/// session stores; implementations that need mutation use interior
/// mutability.
pub trait Storage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: Storage + ?Sized> Storage for Rc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<T: Storage + ?Sized> Storage for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Keys map to file names, so only `[A-Za-z0-9_-]` is allowed.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}
