use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{api_interfaces::menu, constants::CURRENCY_SYMBOL, error::GetError};

/// The three sections of the menu, as the client knows them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DishType {
    Starter,
    Main,
    Dessert,
}

impl DishType {
    pub const ALL: [DishType; 3] = [DishType::Starter, DishType::Main, DishType::Dessert];

    /// The category name the service uses for this section.
    pub fn title(&self) -> &'static str {
        match self {
            DishType::Starter => "Entrées",
            DishType::Main => "Plats",
            DishType::Dessert => "Desserts",
        }
    }
}

impl fmt::Display for DishType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown dish type {0:?} (expected starter, main or dessert)")]
pub struct ParseDishTypeError(String);

impl FromStr for DishType {
    type Err = ParseDishTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        match wanted.as_str() {
            "starter" | "starters" => return Ok(DishType::Starter),
            "main" | "mains" => return Ok(DishType::Main),
            "dessert" | "desserts" => return Ok(DishType::Dessert),
            _ => {}
        }
        DishType::ALL
            .into_iter()
            .find(|dish_type| dish_type.title().to_lowercase() == wanted)
            .ok_or_else(|| ParseDishTypeError(s.to_string()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("invalid price {amount:?} for dish {dish:?}")]
    InvalidPrice { dish: String, amount: String },
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Price {
    pub amount: f32,
    pub size: String,
}

impl Price {
    /// The amount rounded to whole cents. Sums and comparisons go through this.
    pub fn cents(&self) -> u64 {
        (f64::from(self.amount) * 100.0).round() as u64
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.cents() == other.cents() && self.size == other.size
    }
}

impl Eq for Price {}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_cents(self.cents()))
    }
}

/// Render an amount of cents as "12.50 €".
pub fn format_cents(cents: u64) -> String {
    format!("{}.{:02} {}", cents / 100, cents % 100, CURRENCY_SYMBOL)
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Dish {
    pub name: String,
    pub images: Vec<String>,
    pub ingredients: Vec<String>,
    pub prices: Vec<Price>,
}

impl Dish {
    /// First usable image. The service pads some image lists with empty strings.
    pub fn thumbnail(&self) -> Option<&str> {
        self.images
            .iter()
            .map(|url| url.trim())
            .find(|url| !url.is_empty())
    }

    pub fn ingredient_summary(&self) -> String {
        self.ingredients.join(", ")
    }

    /// The price shown next to the dish in a listing.
    pub fn first_price(&self) -> Option<&Price> {
        self.prices.first()
    }

    pub fn display_price(&self) -> Option<String> {
        self.first_price().map(Price::to_string)
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub items: Vec<Dish>,
}

impl Category {
    /// Look a dish up by name, falling back to a case-insensitive match.
    pub fn dish(&self, name: &str) -> Option<&Dish> {
        self.items.iter().find(|dish| dish.name == name).or_else(|| {
            let wanted = name.to_lowercase();
            self.items
                .iter()
                .find(|dish| dish.name.to_lowercase() == wanted)
        })
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct MenuResult {
    pub categories: Vec<Category>,
}

impl MenuResult {
    /// The category whose name is exactly `name`.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Take the category backing `dish_type` out of the menu.
    pub fn into_category(self, dish_type: DishType) -> Result<Category, GetError> {
        let title = dish_type.title();
        self.categories
            .into_iter()
            .find(|category| category.name == title)
            .ok_or_else(|| GetError::CategoryNotFound(title.to_string()))
    }
}

fn parse_amount(amount: &menu::Amount) -> Option<f32> {
    let value = match amount {
        menu::Amount::Number(value) => *value,
        menu::Amount::Text(text) => text.trim().replace(',', ".").parse().ok()?,
    };
    (value.is_finite() && value >= 0.0).then_some(value)
}

impl TryFrom<menu::Item> for Dish {
    type Error = BuildError;

    fn try_from(item: menu::Item) -> Result<Self, BuildError> {
        let mut prices = Vec::with_capacity(item.prices.len());
        for price in item.prices {
            let amount = parse_amount(&price.price).ok_or_else(|| BuildError::InvalidPrice {
                dish: item.name_fr.clone(),
                amount: match &price.price {
                    menu::Amount::Text(text) => text.clone(),
                    menu::Amount::Number(value) => value.to_string(),
                },
            })?;
            prices.push(Price {
                amount,
                size: price.size,
            });
        }
        Ok(Self {
            name: item.name_fr,
            images: item.images,
            ingredients: item
                .ingredients
                .into_iter()
                .map(|ingredient| ingredient.name_fr)
                .collect(),
            prices,
        })
    }
}

impl TryFrom<menu::Response> for MenuResult {
    type Error = BuildError;

    fn try_from(response: menu::Response) -> Result<Self, BuildError> {
        let categories = response
            .data
            .into_iter()
            .map(|category| -> Result<Category, BuildError> {
                Ok(Category {
                    name: category.name_fr,
                    items: category
                        .items
                        .into_iter()
                        .map(Dish::try_from)
                        .collect::<Result<_, _>>()?,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { categories })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, amount: menu::Amount) -> menu::Item {
        menu::Item {
            name_fr: name.to_string(),
            images: vec!["".to_string(), "https://example.com/a.jpg".to_string()],
            ingredients: vec![
                menu::Ingredient {
                    name_fr: "tomate".to_string(),
                },
                menu::Ingredient {
                    name_fr: "basilic".to_string(),
                },
            ],
            prices: vec![menu::Price {
                price: amount,
                size: "Petite".to_string(),
            }],
        }
    }

    fn sample_menu() -> MenuResult {
        let dish = |name: &str| Dish {
            name: name.to_string(),
            images: vec![],
            ingredients: vec![],
            prices: vec![],
        };
        MenuResult {
            categories: vec![
                Category {
                    name: "Entrées".to_string(),
                    items: vec![dish("Salade César")],
                },
                Category {
                    name: "Plats".to_string(),
                    items: vec![dish("Burger maison"), dish("Pizza")],
                },
            ],
        }
    }

    #[test]
    fn dish_type_titles() {
        assert_eq!(DishType::Starter.title(), "Entrées");
        assert_eq!(DishType::Main.title(), "Plats");
        assert_eq!(DishType::Dessert.title(), "Desserts");
    }

    #[test]
    fn dish_type_from_str() {
        assert_eq!("starter".parse::<DishType>(), Ok(DishType::Starter));
        assert_eq!("Mains".parse::<DishType>(), Ok(DishType::Main));
        assert_eq!("entrées".parse::<DishType>(), Ok(DishType::Starter));
        assert_eq!("Plats".parse::<DishType>(), Ok(DishType::Main));
        assert!("drinks".parse::<DishType>().is_err());
    }

    #[test]
    fn dish_from_item() {
        let dish = Dish::try_from(item("Bruschetta", menu::Amount::Text("5.50".to_string())));
        assert!(dish.is_ok(), "Failed to build dish: {:?}", dish.unwrap_err());
        let dish = dish.unwrap();
        assert_eq!(dish.name, "Bruschetta");
        assert_eq!(dish.ingredients, vec!["tomate", "basilic"]);
        assert_eq!(
            dish.prices,
            vec![Price {
                amount: 5.5,
                size: "Petite".to_string()
            }]
        );
        assert_eq!(dish.thumbnail(), Some("https://example.com/a.jpg"));
        assert_eq!(dish.ingredient_summary(), "tomate, basilic");
        assert_eq!(dish.display_price().as_deref(), Some("5.50 €"));
    }

    #[test]
    fn dish_from_item_accepts_numbers_and_commas() {
        let dish = Dish::try_from(item("Tiramisu", menu::Amount::Number(4.0))).unwrap();
        assert_eq!(dish.prices[0].amount, 4.0);
        let dish = Dish::try_from(item("Tiramisu", menu::Amount::Text("4,20".to_string()))).unwrap();
        assert_eq!(dish.display_price().as_deref(), Some("4.20 €"));
    }

    #[test]
    fn dish_from_item_invalid_price() {
        let err = Dish::try_from(item("Mystère", menu::Amount::Text("gratuit".to_string())))
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidPrice {
                dish: "Mystère".to_string(),
                amount: "gratuit".to_string()
            }
        );
    }

    #[test]
    fn price_equality_is_by_cent() {
        let price = |amount: f32| Price {
            amount,
            size: "Unique".to_string(),
        };
        assert_eq!(price(4.2), price(4.20001));
        assert_ne!(price(4.2), price(4.21));
        assert_eq!(price(0.1 + 0.2).cents(), 30);
        assert_eq!(format_cents(1250), "12.50 €");
        assert_eq!(format_cents(5), "0.05 €");
    }

    #[test]
    fn dish_without_images_has_no_thumbnail() {
        let dish = Dish {
            name: "Soupe".to_string(),
            images: vec!["  ".to_string()],
            ingredients: vec![],
            prices: vec![],
        };
        assert_eq!(dish.thumbnail(), None);
        assert_eq!(dish.display_price(), None);
    }

    #[test]
    fn menu_into_category() {
        let category = sample_menu().into_category(DishType::Main).unwrap();
        assert_eq!(category.name, "Plats");
        assert_eq!(category.items.len(), 2);
    }

    #[test]
    fn menu_into_category_not_found() {
        let err = sample_menu().into_category(DishType::Dessert).unwrap_err();
        assert!(matches!(err, GetError::CategoryNotFound(name) if name == "Desserts"));
    }

    #[test]
    fn category_dish_lookup() {
        let menu = sample_menu();
        let category = menu.category("Plats").unwrap();
        assert_eq!(category.dish("Pizza").map(|d| d.name.as_str()), Some("Pizza"));
        assert_eq!(
            category.dish("burger MAISON").map(|d| d.name.as_str()),
            Some("Burger maison")
        );
        assert!(category.dish("Salade César").is_none());
        assert!(menu.category("plats").is_none());
    }
}
