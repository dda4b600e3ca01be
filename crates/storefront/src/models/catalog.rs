//! Brands, collections, site settings and the catalog document.

use heen_core::{BrandId, CollectionId};
use serde::{Deserialize, Serialize};

use super::Product;

/// A perfume house.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
}

/// A curated group of products, keyed by a slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Branding images shown on every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    /// Logo image reference; empty means "show the text logo".
    #[serde(default)]
    pub logo: String,
    /// Home page hero image reference.
    #[serde(default)]
    pub hero_image: String,
}

impl SiteSettings {
    /// Hero image used until an admin uploads one.
    pub const DEFAULT_HERO_IMAGE: &'static str = "https://i.imgur.com/mWqyC7d.jpeg";
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            logo: String::new(),
            hero_image: Self::DEFAULT_HERO_IMAGE.to_owned(),
        }
    }
}

/// Everything persisted under the catalog key, written wholesale on each change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    pub products: Vec<Product>,
    #[serde(default)]
    pub brands: Vec<Brand>,
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub site_settings: SiteSettings,
}

impl CatalogDocument {
    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: heen_core::ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a product by slug.
    #[must_use]
    pub fn product_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Look up a brand by id.
    #[must_use]
    pub fn brand(&self, id: BrandId) -> Option<&Brand> {
        self.brands.iter().find(|b| b.id == id)
    }

    /// Look up a collection by id.
    #[must_use]
    pub fn collection(&self, id: &CollectionId) -> Option<&Collection> {
        self.collections.iter().find(|c| &c.id == id)
    }

    /// Products whose brand name matches no brand record.
    ///
    /// Products reference brands by name, so deleting or renaming a brand
    /// leaves them pointing at nothing.
    #[must_use]
    pub fn products_without_brand(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| !self.brands.iter().any(|b| b.name == p.brand))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_site_settings_default_hero() {
        let settings = SiteSettings::default();
        assert!(settings.logo.is_empty());
        assert_eq!(settings.hero_image, SiteSettings::DEFAULT_HERO_IMAGE);
    }

    #[test]
    fn test_document_accepts_products_only() {
        let doc: CatalogDocument = serde_json::from_str(r#"{"products":[]}"#).unwrap();
        assert!(doc.brands.is_empty());
        assert_eq!(doc.site_settings, SiteSettings::default());
    }

    #[test]
    fn test_document_uses_camel_case_keys() {
        let json = serde_json::to_value(CatalogDocument::default()).unwrap();
        assert!(json.get("siteSettings").is_some());
        assert!(json["siteSettings"].get("heroImage").is_some());
    }
}
