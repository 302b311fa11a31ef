//! Cart and line item types.

use crate::catalog::Product;
use crate::error::CartError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// An ordered list of line items, unique by product id, in insertion order.
/// Serializes as a bare JSON array, which is the persisted snapshot format.
///
/// Transitions return a new `Cart` and leave `self` untouched, so a store can
/// compute the next state before deciding to publish it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from raw items, restoring the cart invariants.
    ///
    /// Duplicate ids are merged into the first occurrence (amounts summed) and
    /// items with an amount below one are dropped. Snapshots written by this
    /// crate never need either fix; hand-edited or foreign ones might.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut merged: Vec<LineItem> = Vec::new();
        for item in items {
            if item.amount < 1 {
                continue;
            }
            match merged.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => existing.amount = existing.amount.saturating_add(item.amount),
                None => merged.push(item),
            }
        }
        Self { items: merged }
    }

    /// Get an item by product ID.
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Check whether the product is in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Amount held for a product, zero when absent.
    pub fn amount_of(&self, id: ProductId) -> i64 {
        self.get(id).map_or(0, |i| i.amount)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of amounts, saturating).
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, i| count.saturating_add(i.amount))
    }

    /// Sum of all line subtotals.
    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Iterate over line items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Add one unit of `product`.
    ///
    /// Appends a new line with amount 1, or increments the existing line when
    /// the product is already present.
    pub fn with_product(&self, product: Product) -> Self {
        if self.contains(product.id) {
            return self.with_incremented(product.id);
        }
        let mut items = self.items.clone();
        items.push(LineItem::from_product(product));
        Self { items }
    }

    /// Increment an existing line by one. Unknown ids leave the cart as is.
    pub fn with_incremented(&self, id: ProductId) -> Self {
        let items = self
            .items
            .iter()
            .map(|i| {
                if i.id == id {
                    LineItem {
                        amount: i.amount.saturating_add(1),
                        ..i.clone()
                    }
                } else {
                    i.clone()
                }
            })
            .collect();
        Self { items }
    }

    /// Remove a product's line.
    pub fn without(&self, id: ProductId) -> Self {
        Self {
            items: self.items.iter().filter(|i| i.id != id).cloned().collect(),
        }
    }

    /// Set a line's amount. Unknown ids leave the cart as is.
    pub fn with_amount(&self, id: ProductId, amount: i64) -> Result<Self, CartError> {
        if amount < 1 {
            return Err(CartError::InvalidAmount(amount));
        }
        let items = self
            .items
            .iter()
            .map(|i| {
                if i.id == id {
                    LineItem { amount, ..i.clone() }
                } else {
                    i.clone()
                }
            })
            .collect();
        Ok(Self { items })
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A line item in the cart.
///
/// Display fields are copied from the catalog at add time and never
/// refreshed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product ID.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub title: String,
    /// Unit price.
    pub price: f64,
    /// Image URL.
    pub image: String,
    /// Quantity, at least one while the line exists.
    pub amount: i64,
}

impl LineItem {
    /// Create a line holding one unit of `product`.
    pub fn from_product(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount: 1,
        }
    }

    /// Unit price times amount.
    pub fn subtotal(&self) -> f64 {
        self.price * self.amount as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, price: f64) -> Product {
        Product::new(id, format!("Product {id}"), price, format!("https://img/{id}.jpg"))
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.amount_of(ProductId::new(1)), 0);
    }

    #[test]
    fn test_add_product() {
        let cart = Cart::new().with_product(product(1, 10.0));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.amount_of(ProductId::new(1)), 1);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().title, "Product 1");
    }

    #[test]
    fn test_add_same_product_merges() {
        let cart = Cart::new()
            .with_product(product(1, 10.0))
            .with_product(product(1, 10.0));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_transitions_leave_original_untouched() {
        let cart = Cart::new().with_product(product(1, 10.0));
        let bumped = cart.with_incremented(ProductId::new(1));

        assert_eq!(cart.amount_of(ProductId::new(1)), 1);
        assert_eq!(bumped.amount_of(ProductId::new(1)), 2);
    }

    #[test]
    fn test_insertion_order_kept() {
        let cart = Cart::new()
            .with_product(product(3, 1.0))
            .with_product(product(1, 1.0))
            .with_product(product(3, 1.0));

        let ids: Vec<u64> = cart.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_without() {
        let cart = Cart::new()
            .with_product(product(1, 1.0))
            .with_product(product(2, 1.0));

        let cart = cart.without(ProductId::new(1));
        assert!(!cart.contains(ProductId::new(1)));
        assert_eq!(cart.len(), 1);

        let same = cart.without(ProductId::new(99));
        assert_eq!(same, cart);
    }

    #[test]
    fn test_with_amount() {
        let cart = Cart::new().with_product(product(1, 1.0));

        let cart = cart.with_amount(ProductId::new(1), 5).unwrap();
        assert_eq!(cart.amount_of(ProductId::new(1)), 5);

        let unchanged = cart.with_amount(ProductId::new(2), 5).unwrap();
        assert_eq!(unchanged, cart);

        assert!(matches!(
            cart.with_amount(ProductId::new(1), 0),
            Err(CartError::InvalidAmount(0))
        ));
    }

    #[test]
    fn test_totals() {
        let cart = Cart::new()
            .with_product(product(1, 10.0))
            .with_product(product(1, 10.0))
            .with_product(product(2, 2.5));

        assert_eq!(cart.item_count(), 3);
        assert!((cart.total() - 22.5).abs() < f64::EPSILON);
        assert!((cart.get(ProductId::new(1)).unwrap().subtotal() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_items_restores_invariants() {
        let line = |id: u64, amount: i64| LineItem {
            amount,
            ..LineItem::from_product(product(id, 1.0))
        };

        let cart = Cart::from_items(vec![line(1, 2), line(2, 0), line(1, 3), line(3, 1)]);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.amount_of(ProductId::new(1)), 5);
        assert!(!cart.contains(ProductId::new(2)));
    }

    #[test]
    fn test_item_count_saturates() {
        let line = |id: u64, amount: i64| LineItem {
            amount,
            ..LineItem::from_product(product(id, 1.0))
        };

        let cart = Cart::from_items(vec![line(1, i64::MAX), line(2, 5)]);
        assert_eq!(cart.item_count(), i64::MAX);
    }

    #[test]
    fn test_serializes_as_array() {
        let cart = Cart::new().with_product(Product::new(7, "Shoe", 99.9, "img"));
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(
            json,
            r#"[{"id":7,"title":"Shoe","price":99.9,"image":"img","amount":1}]"#
        );

        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
