//! Product filtering and catalog views.
//!
//! Everything here is a pure function over borrowed catalog data: a filter is
//! applied to the full product list and yields a subsequence in catalog
//! order. There is no index, no ranking and no pagination.
//!
//! # Matching
//!
//! A product passes a [`ProductFilter`] when it satisfies every constraint:
//!
//! - brand is one of the selected brand names (if any are selected)
//! - gender is one of the selected genders (if any)
//! - category is one of the selected categories (if any)
//! - price is at most `max_price` (if set)
//! - the query, if non-blank, is a case-insensitive substring of the name,
//!   brand, category, description or any note

use std::collections::BTreeSet;

use heen_core::{CollectionId, Gender, Price};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::models::{Brand, CatalogDocument, Collection, Product};

/// Number of products shown in the home page "best sellers" strip.
pub const HOME_BEST_SELLERS: usize = 4;

/// Selected facets plus an optional free-text query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    /// Selected brand names.
    pub brands: BTreeSet<String>,
    pub genders: BTreeSet<Gender>,
    pub categories: BTreeSet<String>,
    /// Inclusive upper price bound.
    pub max_price: Option<Price>,
    pub query: Option<String>,
}

impl ProductFilter {
    /// Whether any facet (brand, gender or category) is selected.
    ///
    /// Drives the "clear filters" control; the query and price bound are
    /// not facets.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.brands.is_empty() || !self.genders.is_empty() || !self.categories.is_empty()
    }

    /// The lowercased query, or `None` if blank. Inner and surrounding
    /// whitespace is kept and must match.
    fn normalized_query(&self) -> Option<String> {
        self.query
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .map(str::to_lowercase)
    }

    /// Whether `product` satisfies every constraint.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_facets(product)
            && self
                .normalized_query()
                .is_none_or(|q| matches_query(product, &q))
    }

    fn matches_facets(&self, product: &Product) -> bool {
        (self.brands.is_empty() || self.brands.contains(&product.brand))
            && (self.genders.is_empty() || self.genders.contains(&product.gender))
            && (self.categories.is_empty() || self.categories.contains(&product.category))
            && self.max_price.is_none_or(|max| product.price <= max)
    }

    /// Products passing the filter, in their original order.
    #[instrument(skip_all, fields(products = products.len()))]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let query = self.normalized_query();
        products
            .iter()
            .filter(|p| self.matches_facets(p))
            .filter(|p| query.as_deref().is_none_or(|q| matches_query(p, q)))
            .collect()
    }
}

/// Filter `products` with `filter`, preserving order.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], filter: &ProductFilter) -> Vec<&'a Product> {
    filter.apply(products)
}

/// `query` must already be lowercased.
fn matches_query(product: &Product, query: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(query);
    contains(product.name.as_str())
        || contains(product.brand.as_str())
        || contains(product.category.as_str())
        || contains(product.description.as_str())
        || product.notes.iter().any(|note| contains(note.as_str()))
}

/// Values offered in the filter sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facets<'a> {
    /// Brand records, in catalog order.
    pub brands: Vec<&'a Brand>,
    /// Distinct genders present in the products, sorted.
    pub genders: Vec<Gender>,
    /// Distinct categories present in the products, sorted.
    pub categories: Vec<&'a str>,
}

impl<'a> Facets<'a> {
    #[must_use]
    pub fn from_document(document: &'a CatalogDocument) -> Self {
        let genders: BTreeSet<Gender> = document.products.iter().map(|p| p.gender).collect();
        let categories: BTreeSet<&str> = document
            .products
            .iter()
            .map(|p| p.category.as_str())
            .collect();
        Self {
            brands: document.brands.iter().collect(),
            genders: genders.into_iter().collect(),
            categories: categories.into_iter().collect(),
        }
    }
}

/// The first `limit` products in catalog order.
#[must_use]
pub fn best_sellers(products: &[Product], limit: usize) -> &[Product] {
    products.get(..limit).unwrap_or(products)
}

/// A collection page: the record plus its products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionView<'a> {
    pub collection: &'a Collection,
    pub products: Vec<&'a Product>,
}

impl<'a> CollectionView<'a> {
    /// Build the page for `id`, or `None` if no such collection exists.
    #[must_use]
    pub fn find(document: &'a CatalogDocument, id: &CollectionId) -> Option<Self> {
        let collection = document.collection(id)?;
        let products = document
            .products
            .iter()
            .filter(|p| p.collection.as_ref() == Some(id))
            .collect();
        Some(Self {
            collection,
            products,
        })
    }
}
