use derive_builder::Builder;
use tracing::debug;

use crate::{
    api_interfaces::menu,
    constants::{DEFAULT_MENU_SERVICE_URL, DEFAULT_SHOP_ID},
    error::GetError,
};

use super::MenuResult;

/// Where the menu lives and which shop to ask it for.
#[derive(Builder, Clone, Debug, PartialEq, Eq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Endpoint {
    #[builder(setter(into), default = "DEFAULT_MENU_SERVICE_URL.to_string()")]
    pub url: String,
    #[builder(setter(into), default = "DEFAULT_SHOP_ID.to_string()")]
    pub shop_id: String,
}

impl EndpointBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(url) = &self.url {
            if url.is_empty() {
                return Err("the endpoint url is missing".to_string());
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("the endpoint url {url:?} is not http(s)"));
            }
        }
        if let Some(shop_id) = &self.shop_id {
            if shop_id.trim().is_empty() {
                return Err("the shop id is missing".to_string());
            }
        }
        Ok(())
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            url: DEFAULT_MENU_SERVICE_URL.to_string(),
            shop_id: DEFAULT_SHOP_ID.to_string(),
        }
    }
}

/// Post the shop id to the menu service and return the raw response body.
pub async fn post(client: &reqwest::Client, endpoint: &Endpoint) -> Result<String, GetError> {
    let body = serde_json::to_string(&menu::Request {
        id_shop: &endpoint.shop_id,
    })?;
    debug!(url = %endpoint.url, shop_id = %endpoint.shop_id, "requesting menu");
    let response = client
        .post(&endpoint.url)
        .header("Content-Type", "application/json")
        .body(body)
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(GetError::ResponseError(response.status()));
    }
    response.text().await.map_err(GetError::ResponseBodyError)
}

/// Parse a raw menu document into display models.
pub fn parse(body: &str) -> Result<MenuResult, GetError> {
    let parsed_body: menu::Response = serde_json::from_str(body).map_err(GetError::ParseError)?;
    Ok(MenuResult::try_from(parsed_body)?)
}

/// Get the whole menu from the menu service.
pub async fn get(client: &reqwest::Client, endpoint: &Endpoint) -> Result<MenuResult, GetError> {
    let body = post(client, endpoint).await?;
    parse(&body)
}
