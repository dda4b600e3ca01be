//! Integration tests for the Heen Fragrâncias storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p heen-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `persistence` - File storage round trips and fallback to defaults
//! - `session` - Sign-in, sign-out and access control across reopen
//! - `admin_catalog` - Admin mutations as seen by shoppers
//!
//! Every test gets its own temporary data directory from [`TestContext`].

use std::path::Path;

use heen_storefront::AppState;
use heen_storefront::config::StorefrontConfig;
use heen_storefront::storage::FileStorage;
use tempfile::TempDir;

/// A temporary data directory that can be opened repeatedly, like
/// successive launches of the storefront.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a fresh, empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Configuration pointing at this context's data directory.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            data_dir: self.data_dir().to_path_buf(),
            ..StorefrontConfig::default()
        }
    }

    /// Open the storefront, as a new launch would.
    ///
    /// # Panics
    ///
    /// Panics if the data directory cannot be opened.
    #[must_use]
    pub fn launch(&self) -> AppState<FileStorage> {
        AppState::open(self.config()).expect("open file storage")
    }

    /// Write a raw value for `key`, bypassing the stores.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_raw(&self, key: &str, value: &str) {
        std::fs::write(self.data_dir().join(format!("{key}.json")), value)
            .expect("write raw value");
    }

    /// Read the raw value stored for `key`, if any.
    #[must_use]
    pub fn read_raw(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.data_dir().join(format!("{key}.json"))).ok()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
