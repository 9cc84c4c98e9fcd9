mod api_interfaces;
pub mod basket;
pub mod cache;
pub mod client;
pub mod constants;
pub mod error;
pub mod menu;
mod util;

pub use basket::{Basket, BasketItem, Quantity};
pub use cache::ResponseCache;
pub use client::Client;
pub use menu::{
    format_cents, Category, Dish, DishType, Endpoint, EndpointBuilder, Listing, MenuResult, Price,
};
pub use util::default_http_client;
