use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{error::*, menu::Dish};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("a quantity must be at least 1")]
pub struct ZeroQuantity;

/// How many of a dish to order. Never below 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        self.0 = self.0.saturating_sub(1).max(1);
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = ZeroQuantity;

    fn try_from(value: u32) -> Result<Self, ZeroQuantity> {
        if value == 0 {
            return Err(ZeroQuantity);
        }
        Ok(Self(value))
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    pub dish: Dish,
    pub quantity: Quantity,
}

impl BasketItem {
    /// Listed price of the dish times the quantity, in cents. Dishes without a price count as free.
    pub fn subtotal(&self) -> u64 {
        self.dish
            .first_price()
            .map(|price| price.cents() * u64::from(self.quantity.get()))
            .unwrap_or_default()
    }
}

/// The dishes picked so far, in the order they were added.
///
/// Adding a dish that is already in the basket adds a second entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    items: Vec<BasketItem>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, dish: Dish, quantity: Quantity) -> &BasketItem {
        debug!(dish = %dish.name, quantity = quantity.get(), "adding to basket");
        self.items.push(BasketItem { dish, quantity });
        &self.items[self.items.len() - 1]
    }

    /// Remove the first entry equal to `item`. Returns whether one was found.
    pub fn delete(&mut self, item: &BasketItem) -> bool {
        match self.items.iter().position(|candidate| candidate == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<BasketItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Take back the most recent addition.
    pub fn undo_last(&mut self) -> Option<BasketItem> {
        self.items.pop()
    }

    pub fn items(&self) -> &[BasketItem] {
        &self.items
    }

    /// Number of entries, not the sum of quantities.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of the subtotals, in cents.
    pub fn total(&self) -> u64 {
        self.items.iter().map(BasketItem::subtotal).sum()
    }

    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let file_contents = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(file_contents.as_str())?)
    }

    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SaveError> {
        let serialized = serde_json::to_string(self)?;
        tokio::fs::write(path, serialized).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{format_cents, Price};
    use tempfile::NamedTempFile;

    fn dish(name: &str, amount: f32) -> Dish {
        Dish {
            name: name.to_string(),
            images: vec![],
            ingredients: vec![],
            prices: vec![Price {
                amount,
                size: "Unique".to_string(),
            }],
        }
    }

    fn quantity(value: u32) -> Quantity {
        Quantity::try_from(value).unwrap()
    }

    #[test]
    fn quantity_decrement_floors_at_one() {
        let mut quantity = Quantity::default();
        quantity.decrement();
        assert_eq!(quantity.get(), 1);
        quantity.increment();
        quantity.increment();
        assert_eq!(quantity.get(), 3);
        quantity.decrement();
        quantity.decrement();
        quantity.decrement();
        assert_eq!(quantity, Quantity::ONE);
    }

    #[test]
    fn quantity_rejects_zero() {
        assert_eq!(Quantity::try_from(0u32), Err(ZeroQuantity));
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("2").unwrap().get(), 2);
    }

    #[test]
    fn add_appends_in_order() {
        let mut basket = Basket::new();
        basket.add(dish("Pizza", 10.0), quantity(2));
        basket.add(dish("Tiramisu", 4.5), Quantity::ONE);
        let names: Vec<_> = basket.items().iter().map(|i| i.dish.name.as_str()).collect();
        assert_eq!(names, vec!["Pizza", "Tiramisu"]);
        assert_eq!(basket.count(), 2);
    }

    #[test]
    fn add_same_dish_twice_keeps_two_entries() {
        let mut basket = Basket::new();
        basket.add(dish("Pizza", 10.0), Quantity::ONE);
        basket.add(dish("Pizza", 10.0), Quantity::ONE);
        assert_eq!(basket.count(), 2);
        assert_eq!(basket.items()[0], basket.items()[1]);
    }

    #[test]
    fn delete_removes_exactly_one_entry() {
        let mut basket = Basket::new();
        let item = basket.add(dish("Pizza", 10.0), Quantity::ONE).clone();
        basket.add(dish("Pizza", 10.0), Quantity::ONE);
        basket.add(dish("Salade", 6.0), Quantity::ONE);

        assert!(basket.delete(&item));
        assert_eq!(basket.count(), 2);
        assert_eq!(basket.items()[0].dish.name, "Pizza");
        assert_eq!(basket.items()[1].dish.name, "Salade");
    }

    #[test]
    fn delete_unknown_item() {
        let mut basket = Basket::new();
        basket.add(dish("Pizza", 10.0), Quantity::ONE);
        let stranger = BasketItem {
            dish: dish("Pizza", 10.0),
            quantity: quantity(3),
        };
        assert!(!basket.delete(&stranger));
        assert_eq!(basket.count(), 1);
    }

    #[test]
    fn count_tracks_adds_minus_removes() {
        let mut basket = Basket::new();
        for i in 0..5 {
            basket.add(dish(&format!("Plat {i}"), 1.0), Quantity::ONE);
        }
        basket.remove(1);
        basket.undo_last();
        assert_eq!(basket.count(), 3);
        assert!(basket.remove(10).is_none());
        assert_eq!(basket.count(), 3);
    }

    #[test]
    fn undo_last_takes_back_latest() {
        let mut basket = Basket::new();
        basket.add(dish("Pizza", 10.0), Quantity::ONE);
        basket.add(dish("Tiramisu", 4.5), quantity(2));
        let undone = basket.undo_last().unwrap();
        assert_eq!(undone.dish.name, "Tiramisu");
        assert_eq!(basket.count(), 1);
        basket.undo_last();
        assert!(basket.undo_last().is_none());
        assert!(basket.is_empty());
    }

    #[test]
    fn total_uses_first_price() {
        let mut basket = Basket::new();
        basket.add(dish("Pizza", 10.0), quantity(2));
        basket.add(dish("Tiramisu", 4.5), Quantity::ONE);
        basket.add(
            Dish {
                name: "Eau".to_string(),
                images: vec![],
                ingredients: vec![],
                prices: vec![],
            },
            Quantity::ONE,
        );
        assert_eq!(basket.total(), 2450);
    }

    #[test]
    fn total_does_not_drift() {
        let mut basket = Basket::new();
        for _ in 0..10 {
            basket.add(dish("Café", 0.1), Quantity::ONE);
        }
        basket.add(dish("Eau", 0.7), quantity(3));
        assert_eq!(basket.total(), 310);
        assert_eq!(format_cents(basket.total()), "3.10 €");
    }

    #[tokio::test]
    async fn save_then_load() {
        let mut basket = Basket::new();
        basket.add(dish("Pizza", 10.0), quantity(2));
        let file = NamedTempFile::new().unwrap();

        basket.save(file.path()).await.unwrap();
        let loaded = Basket::load(file.path()).await.unwrap();

        assert_eq!(loaded, basket);
    }

    #[tokio::test]
    async fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Basket::load(dir.path().join("basket.json")).await;
        assert!(matches!(loaded.unwrap_err(), LoadError::ReadError(_)));
    }
}
