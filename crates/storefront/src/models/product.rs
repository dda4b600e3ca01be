//! Perfume records and the admin form input that creates them.

use heen_core::{CollectionId, Gender, Price, ProductId, product_slug};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::catalog::CatalogError;

/// A perfume in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    /// URL slug derived from the name at creation time.
    pub slug: String,
    pub name: String,
    /// Brand name (not id); renaming or deleting a brand does not touch it.
    pub brand: String,
    /// Olfactory family, e.g. "Amadeirado".
    pub category: String,
    pub price: Price,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    /// Image reference: an `http(s)` URL or a `data:` URL.
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<CollectionId>,
    pub gender: Gender,
}

/// Editable product fields, as submitted by the admin product form.
///
/// Identifier, slug and rating are not part of the form: they are assigned
/// on creation and preserved on update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub brand: String,
    pub gender: Gender,
    pub category: String,
    pub price: Price,
    #[serde(default)]
    pub notes: Vec<String>,
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub collection: Option<CollectionId>,
}

impl ProductDraft {
    /// Check the draft before it reaches the catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::MissingField`] if name, brand or category is blank
    /// - [`CatalogError::MissingImage`] if no image was given
    /// - [`CatalogError::InvalidImage`] if the image is not an absolute
    ///   `http`, `https` or `data` URL
    /// - [`CatalogError::NegativePrice`] if the price is below zero
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (field, value) in [
            ("name", &self.name),
            ("brand", &self.brand),
            ("category", &self.category),
        ] {
            if value.trim().is_empty() {
                return Err(CatalogError::MissingField(field));
            }
        }
        validate_image(&self.image)?;
        if self.price < Price::ZERO {
            return Err(CatalogError::NegativePrice);
        }
        Ok(())
    }

    /// Build a new product from the draft.
    pub(crate) fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            slug: product_slug(&self.name),
            name: self.name,
            brand: self.brand,
            category: self.category,
            price: self.price,
            notes: self.notes,
            rating: 0.0,
            image: self.image,
            description: self.description,
            collection: normalize_collection(self.collection),
            gender: self.gender,
        }
    }

    /// Overwrite the editable fields of `product`, keeping id, slug and rating.
    pub(crate) fn apply_to(self, product: &mut Product) {
        product.name = self.name;
        product.brand = self.brand;
        product.gender = self.gender;
        product.category = self.category;
        product.price = self.price;
        product.notes = self.notes;
        product.image = self.image;
        product.description = self.description;
        product.collection = normalize_collection(self.collection);
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            gender: product.gender,
            category: product.category.clone(),
            price: product.price,
            notes: product.notes.clone(),
            image: product.image.clone(),
            description: product.description.clone(),
            collection: product.collection.clone(),
        }
    }
}

/// Split a comma-separated notes field ("Baunilha, Âmbar, Oud") into notes.
///
/// Entries are trimmed and blank entries dropped.
#[must_use]
pub fn parse_notes(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|note| !note.is_empty())
        .map(str::to_owned)
        .collect()
}

/// An empty collection field means "no collection".
fn normalize_collection(collection: Option<CollectionId>) -> Option<CollectionId> {
    collection.filter(|id| !id.is_empty())
}

/// Image references must be absolute `http`, `https` or `data` URLs.
pub(crate) fn validate_image(image: &str) -> Result<(), CatalogError> {
    let image = image.trim();
    if image.is_empty() {
        return Err(CatalogError::MissingImage);
    }
    match Url::parse(image) {
        Ok(url) if matches!(url.scheme(), "http" | "https" | "data") => Ok(()),
        _ => Err(CatalogError::InvalidImage(truncate(image, 64))),
    }
}

/// Data URLs can be megabytes long; keep error messages short.
fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_owned();
    }
    let head: String = value.chars().take(max_chars).collect();
    format!("{head}…")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Khamrah Qahwa".to_string(),
            brand: "Lattafa".to_string(),
            gender: Gender::Unissex,
            category: "Gourmand".to_string(),
            price: Price::from_cents(34990),
            notes: parse_notes("Café, Baunilha, Praliné"),
            image: "https://picsum.photos/seed/khamrah-qahwa/600/800".to_string(),
            description: "Café torrado e especiarias.".to_string(),
            collection: Some(CollectionId::new("colecao_arabe")),
        }
    }

    #[test]
    fn test_parse_notes_trims_and_drops_blanks() {
        assert_eq!(
            parse_notes(" Oud ,Rosa,, Âmbar , "),
            vec!["Oud", "Rosa", "Âmbar"]
        );
        assert!(parse_notes("").is_empty());
    }

    #[test]
    fn test_into_product_assigns_slug_and_zero_rating() {
        let product = draft().into_product(ProductId::new(7));
        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.slug, "khamrah-qahwa");
        assert!(product.rating.abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_collection_becomes_none() {
        let mut input = draft();
        input.collection = Some(CollectionId::new(""));
        assert_eq!(input.into_product(ProductId::new(1)).collection, None);
    }

    #[test]
    fn test_apply_to_keeps_identity() {
        let mut product = draft().into_product(ProductId::new(7));
        product.rating = 4.5;
        let mut edit = draft();
        edit.name = "Khamrah".to_string();
        edit.price = Price::from_cents(29990);
        edit.apply_to(&mut product);

        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.slug, "khamrah-qahwa");
        assert!((product.rating - 4.5).abs() < f64::EPSILON);
        assert_eq!(product.name, "Khamrah");
        assert_eq!(product.price, Price::from_cents(29990));
    }

    #[test]
    fn test_validate_requires_fields() {
        let mut input = draft();
        input.brand = "  ".to_string();
        assert!(matches!(
            input.validate(),
            Err(CatalogError::MissingField("brand"))
        ));
    }

    #[test]
    fn test_validate_image() {
        let mut input = draft();
        input.image = String::new();
        assert!(matches!(input.validate(), Err(CatalogError::MissingImage)));

        input.image = "imagens/khamrah.jpg".to_string();
        assert!(matches!(
            input.validate(),
            Err(CatalogError::InvalidImage(_))
        ));

        input.image = "data:image/png;base64,iVBORw0KGgo=".to_string();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_serializes_camel_case_without_empty_collection() {
        let mut product = draft().into_product(ProductId::new(3));
        product.collection = None;
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["gender"], "Unissex");
        assert_eq!(json["price"], 349.9);
        assert!(json.get("collection").is_none());
    }

    #[test]
    fn test_truncate_long_values() {
        assert_eq!(truncate("abcdef", 3), "abc…");
        assert_eq!(truncate("abc", 3), "abc");
    }
}
