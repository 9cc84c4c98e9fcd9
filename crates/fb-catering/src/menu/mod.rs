pub mod get;
mod listing;
mod model;

pub use get::{Endpoint, EndpointBuilder, EndpointBuilderError};
pub use listing::Listing;
pub use model::{
    format_cents, BuildError, Category, Dish, DishType, MenuResult, ParseDishTypeError, Price,
};
