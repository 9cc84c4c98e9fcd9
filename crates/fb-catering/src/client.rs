use tracing::{debug, warn};

use crate::{
    cache::ResponseCache,
    error::GetError,
    menu::{self, Category, DishType, Endpoint, MenuResult},
};

#[derive(Clone, Debug)]
pub struct Client {
    http_client: reqwest::Client,
    endpoint: Endpoint,
    cache: ResponseCache,
}

impl Client {
    pub fn new(http_client: reqwest::Client, endpoint: Option<Endpoint>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.unwrap_or_default(),
            cache: ResponseCache::default(),
        }
    }

    /// Start from a previously saved cache instead of an empty one.
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Get the whole menu, from the cache when a fresh copy is there.
    pub async fn get_menu(&mut self) -> Result<MenuResult, GetError> {
        let cached = self.cache.get(&self.endpoint).map(menu::get::parse);
        match cached {
            Some(Ok(menu)) => {
                debug!(url = %self.endpoint.url, "serving menu from cache");
                return Ok(menu);
            }
            Some(Err(err)) => {
                warn!(error = %err, "discarding unreadable cached menu");
                self.cache.clear();
            }
            None => {}
        }
        let body = menu::get::post(&self.http_client, &self.endpoint).await?;
        let menu = menu::get::parse(&body)?;
        self.cache.put(&self.endpoint, body);
        Ok(menu)
    }

    pub async fn get_category(&mut self, dish_type: DishType) -> Result<Category, GetError> {
        self.get_menu().await?.into_category(dish_type)
    }

    /// Drop the cached menu and ask the service again.
    pub async fn refresh_category(&mut self, dish_type: DishType) -> Result<Category, GetError> {
        self.cache.clear();
        self.get_category(dish_type).await
    }
}
