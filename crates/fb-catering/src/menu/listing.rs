use tracing::{error, info};

use crate::{client::Client, error::GetError};

use super::{Category, Dish, DishType};

/// The dishes shown for one section of the menu.
///
/// Failing to reach the service is logged and leaves whatever was already
/// listed in place. Failing to make sense of the menu is handed back to the
/// caller.
#[derive(Clone, Debug)]
pub struct Listing {
    dish_type: DishType,
    dishes: Vec<Dish>,
}

impl Listing {
    pub fn new(dish_type: DishType) -> Self {
        Self {
            dish_type,
            dishes: Vec::new(),
        }
    }

    pub fn dish_type(&self) -> DishType {
        self.dish_type
    }

    pub fn title(&self) -> &'static str {
        self.dish_type.title()
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    pub async fn load(&mut self, client: &mut Client) -> Result<(), GetError> {
        let result = client.get_category(self.dish_type).await;
        self.apply(result)
    }

    /// Pull-to-refresh: same as [`Listing::load`] but never served from the cache.
    pub async fn refresh(&mut self, client: &mut Client) -> Result<(), GetError> {
        let result = client.refresh_category(self.dish_type).await;
        self.apply(result)
    }

    fn apply(&mut self, result: Result<Category, GetError>) -> Result<(), GetError> {
        match result {
            Ok(category) => {
                info!(category = %category.name, dishes = category.items.len(), "menu loaded");
                self.dishes = category.items;
                Ok(())
            }
            Err(err) if err.is_transport() => {
                error!(category = self.title(), error = %err, "request failed");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}
