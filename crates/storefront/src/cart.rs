//! Shopping cart.
//!
//! The cart lives only in memory: it is never written to storage and starts
//! empty on every launch. Each line holds a snapshot of the product taken
//! when it was first added, so later catalog edits do not change it.

use std::num::NonZeroU32;

use heen_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Product;

/// A product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: NonZeroU32,
}

impl CartItem {
    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity.get())
    }
}

/// Cart lines, unique by product id, in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of `product`, bumping the quantity if it is already in the cart.
    ///
    /// Returns the new quantity.
    pub fn add(&mut self, product: &Product) -> NonZeroU32 {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
            debug!(product_id = %product.id, quantity = item.quantity.get(), "Cart quantity increased");
            return item.quantity;
        }
        self.items.push(CartItem {
            product: product.clone(),
            quantity: NonZeroU32::MIN,
        });
        debug!(product_id = %product.id, "Product added to cart");
        NonZeroU32::MIN
    }

    /// Remove the line for `id` entirely. Unknown ids are ignored.
    pub fn remove(&mut self, id: ProductId) -> Option<CartItem> {
        let index = self.items.iter().position(|i| i.product.id == id)?;
        debug!(product_id = %id, "Product removed from cart");
        Some(self.items.remove(index))
    }

    /// Total number of units, shown on the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity.get())).sum()
    }

    /// Sum of the line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Amount due; there is no shipping or discount, so this equals the subtotal.
    #[must_use]
    pub fn total(&self) -> Price {
        self.subtotal()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;

    fn product(id: i64) -> Product {
        default_catalog()
            .product(ProductId::new(id))
            .unwrap()
            .clone()
    }

    #[test]
    fn test_add_twice_increments_quantity() {
        let mut cart = Cart::new();
        let khamrah = product(1);
        cart.add(&khamrah);
        let quantity = cart.add(&khamrah);

        assert_eq!(quantity.get(), 2);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items().first().unwrap().quantity.get(), 2);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&product(3));
        cart.add(&product(1));
        cart.add(&product(3));
        let ids: Vec<i64> = cart.items().iter().map(|i| i.product.id.as_i64()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product(1));
        let before = cart.clone();
        assert!(cart.remove(ProductId::new(404)).is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_drops_whole_line() {
        let mut cart = Cart::new();
        let asad = product(2);
        cart.add(&asad);
        cart.add(&asad);
        let removed = cart.remove(asad.id).unwrap();
        assert_eq!(removed.quantity.get(), 2);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        assert_eq!(cart.subtotal(), Price::ZERO);

        let khamrah = product(1); // 289,90
        let delilah = product(7); // 179,90
        cart.add(&khamrah);
        cart.add(&khamrah);
        cart.add(&delilah);

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), Price::from_cents(75970));
        assert_eq!(cart.total().to_string(), "R$ 759,70");

        cart.clear();
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let mut cart = Cart::new();
        let mut expensive = product(1);
        // Largest representable amount; stored documents are not range-checked.
        expensive.price = serde_json::from_str("\"79228162514264337593543950335\"").unwrap();
        cart.add(&expensive);
        cart.add(&expensive);
        cart.add(&product(7));

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), expensive.price);
        assert_eq!(cart.total(), expensive.price);
    }

    #[test]
    fn test_line_flattens_product_fields() {
        let mut cart = Cart::new();
        cart.add(&product(1));
        let json = serde_json::to_value(cart.items().first().unwrap()).unwrap();
        assert_eq!(json["name"], "Khamrah");
        assert_eq!(json["quantity"], 1);
    }
}
