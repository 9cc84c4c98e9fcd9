use serde::{Deserialize, Serialize};

/// Raw request body. The service only wants to know which shop to serve.
#[derive(Serialize)]
pub struct Request<'a> {
    pub id_shop: &'a str,
}

/// Raw menu document from API.
#[derive(Deserialize)]
pub struct Response {
    pub data: Vec<Category>,
}

/// Raw category from API.
#[derive(Deserialize)]
pub struct Category {
    pub name_fr: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Raw dish from API.
#[derive(Deserialize)]
pub struct Item {
    pub name_fr: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub prices: Vec<Price>,
}

/// Raw ingredient from API.
#[derive(Deserialize)]
pub struct Ingredient {
    pub name_fr: String,
}

/// Raw price variant from API.
#[derive(Deserialize)]
pub struct Price {
    pub price: Amount,
    #[serde(default)]
    pub size: String,
}

/// The service sends amounts as decimal strings, but a bare number is accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Text(String),
    Number(f32),
}
